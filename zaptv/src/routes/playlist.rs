use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    AppStateRef, bad_gateway_with_log, internal_error_with_log,
    transfer::{fetch_playlist, parse_channels_async, resolve_locations},
};

#[derive(Deserialize)]
pub struct PlaylistQuery {
    pub origin: String,
}

#[derive(Serialize)]
pub struct LoadResult {
    pub count: usize,
}

/// Fetch, parse and load a playlist. The store is only replaced once the
/// whole pipeline has succeeded; a playlist without a single well-formed
/// entry is a successful load of zero channels, not an error.
pub async fn load_playlist(
    State(state): State<AppStateRef>,
    Query(query): Query<PlaylistQuery>,
) -> Result<Json<LoadResult>, StatusCode> {
    let text = fetch_playlist(&state.http_client, &query.origin)
        .await
        .map_err(bad_gateway_with_log!("Request origin"))?;

    let mut list = parse_channels_async(text)
        .await
        .map_err(internal_error_with_log!("Parse channel list"))?;
    resolve_locations(&mut list, &query.origin);

    let count = list.len();
    state.store.write().await.load(list.channels);

    // history is best-effort, the load already happened
    if let Err(e) = state.storage.push_history(&query.origin).await {
        warn!("Failed to record {} in history: {}", query.origin, e);
    }

    info!("Loaded {} channel(s) from {}", count, query.origin);
    Ok(Json(LoadResult { count }))
}
