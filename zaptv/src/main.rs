use std::{env, sync::Arc};

use anyhow::Result;
use axum::Router;
use log::{info, warn};
use tokio::net::TcpListener;
use zaptv_rs::{AppState, AppStateRef, load_config, routes, transfer};

async fn build_app(app_state: &AppStateRef) -> Result<Router> {
    let root = Router::new().merge(routes::get_routes(app_state));

    Ok(root)
}

/// Reopen the most recently loaded playlist, like the UI does on launch, so
/// the first visible-list request has channels to show. Failures leave the
/// manager running with an empty list.
async fn autoload_recent(app_state: &AppStateRef) {
    let Some(origin) = app_state.storage.history().await.into_iter().next() else {
        return;
    };

    let text = match transfer::fetch_playlist(&app_state.http_client, &origin).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to reload {}: {}", origin, e);
            return;
        }
    };

    match transfer::parse_channels_async(text).await {
        Ok(mut list) => {
            transfer::resolve_locations(&mut list, &origin);
            info!("Restored {} channel(s) from {}", list.len(), origin);
            app_state.store.write().await.load(list.channels);
        }
        Err(e) => warn!("Failed to parse {}: {}", origin, e),
    }
}

async fn app_entry() -> Result<()> {
    let config = load_config(env::var("ZT_CONFIG_PATH").unwrap_or_else(|_| "config.yml".into()))?;
    let app_state = Arc::new(AppState::new(config).await?);

    if app_state.config.autoload.unwrap_or(true) {
        autoload_recent(&app_state).await;
    }

    let tcp_listener = TcpListener::bind(&app_state.config.listen_addr).await?;
    axum::serve(tcp_listener, build_app(&app_state).await?).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(e) = app_entry().await {
        panic!("Fatal error: {}", e);
    }
}
