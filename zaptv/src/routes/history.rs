use axum::{Json, extract::State, http::StatusCode};
use log::info;

use crate::{AppStateRef, internal_error_with_log};

pub async fn get_history(State(state): State<AppStateRef>) -> Json<Vec<String>> {
    Json(state.storage.history().await)
}

/// Wipe history, favorites and the loaded list, mirroring the clear button
/// of the UI. The active filter is left as the user set it.
pub async fn clear_state(State(state): State<AppStateRef>) -> Result<StatusCode, StatusCode> {
    state
        .storage
        .clear()
        .await
        .map_err(internal_error_with_log!("Clear state"))?;

    state.store.write().await.clear();
    info!("State cleared");

    Ok(StatusCode::NO_CONTENT)
}
