use std::sync::Arc;

use anyhow::Result;
use log::info;
use reqwest::{Client, Proxy};
use tokio::sync::RwLock;

use crate::{
    Config,
    storage::{DEFAULT_HISTORY_LIMIT, FavoritesWriter, Storage},
    store::ChannelStore,
};

pub type AppStateRef = Arc<AppState>;

pub struct AppState {
    pub config: Arc<Config>,
    pub storage: Arc<Storage>,
    /// Single-writer: every mutation goes through this lock
    pub store: RwLock<ChannelStore>,
    pub http_client: Client,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        let mut builder = Client::builder();
        if let Some(user_agent) = &config.http.user_agent {
            builder = builder.user_agent(user_agent)
        }

        if let Some(proxy) = &config.http.proxy {
            info!("With proxy: {}", proxy);
            builder = builder.proxy(Proxy::all(proxy)?);
        }
        let http_client = builder.build()?;

        let storage = Storage::open(
            config.storage_path.as_deref().unwrap_or("zaptv-state.json"),
            config.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        );

        let favorites = storage.favorites().await;
        info!("Loaded {} favorite channel(s)", favorites.len());

        let store = ChannelStore::new(favorites, Arc::new(FavoritesWriter(storage.clone())));

        Ok(Self {
            config: config.clone(),
            storage,
            store: RwLock::new(store),
            http_client,
        })
    }
}
