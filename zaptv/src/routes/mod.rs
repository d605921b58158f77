use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::AppStateRef;

mod channels;
mod favorites;
mod history;
mod playlist;

pub fn get_routes(app_state: &AppStateRef) -> Router {
    Router::new()
        .route("/channels", get(channels::get_channels))
        .route("/filter", put(channels::put_filter))
        .route("/playlist", post(playlist::load_playlist))
        .route("/favorites", get(favorites::get_favorites))
        .route("/favorites/toggle", post(favorites::toggle_favorite))
        .route("/favorites/export", get(favorites::export_favorites))
        .route("/history", get(history::get_history))
        .route("/state", delete(history::clear_state))
        .with_state(app_state.clone())
}
