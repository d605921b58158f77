use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use zaplist_rs::format::{Channel, ChannelList};

use crate::AppStateRef;

#[derive(Serialize)]
pub struct ToggleResult {
    pub favorite: bool,
}

pub async fn get_favorites(State(state): State<AppStateRef>) -> Json<Vec<Channel>> {
    Json(state.store.read().await.favorite_channels())
}

pub async fn toggle_favorite(
    State(state): State<AppStateRef>,
    Json(channel): Json<Channel>,
) -> Result<Json<ToggleResult>, StatusCode> {
    if channel.url.is_empty() || channel.title.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let favorite = state.store.write().await.toggle_favorite(&channel);
    Ok(Json(ToggleResult { favorite }))
}

/// The favorite set as an M3U document, for use in any other player.
pub async fn export_favorites(State(state): State<AppStateRef>) -> Response {
    let mut channels = state.store.read().await.favorite_channels();
    // membership order is undefined, keep the exported document stable
    channels.sort_by(|a, b| a.title.cmp(&b.title));

    let list = ChannelList {
        channels,
        ..ChannelList::default()
    };
    list.to_string().into_response()
}
