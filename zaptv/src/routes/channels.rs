use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use zaplist_rs::format::Channel;

use crate::{AppStateRef, store::FilterUpdate};

/// One row of the visible list: the channel plus its membership in the
/// favorite set, so the renderer can draw the star without a second call.
#[derive(Serialize)]
pub struct ChannelView {
    #[serde(flatten)]
    pub channel: Channel,
    pub favorite: bool,
}

pub async fn get_channels(State(state): State<AppStateRef>) -> Json<Vec<ChannelView>> {
    let store = state.store.read().await;
    let views = store
        .visible_channels()
        .into_iter()
        .map(|channel| ChannelView {
            favorite: store.is_favorite(&channel),
            channel,
        })
        .collect();

    Json(views)
}

pub async fn put_filter(
    State(state): State<AppStateRef>,
    Json(update): Json<FilterUpdate>,
) -> StatusCode {
    state.store.write().await.set_filter(update);
    StatusCode::NO_CONTENT
}
