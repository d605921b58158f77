use std::{error::Error, fmt::Display};

use reqwest::Client;

#[derive(Debug)]
pub enum FetchError {
    RequestFailed(reqwest::Error),
    RequestNotSuccess(u16),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestFailed(e) => e.fmt(f),
            Self::RequestNotSuccess(status) => write!(f, "Request failed with status {}", status),
        }
    }
}

impl Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        Self::RequestFailed(value)
    }
}

/// Fetch the raw playlist document. Callers only touch the store after the
/// whole fetch-and-parse pipeline succeeds, so a failure here leaves the
/// loaded list unchanged.
pub async fn fetch_playlist(
    client: &Client,
    origin: impl AsRef<str>,
) -> Result<String, FetchError> {
    let response = client.get(origin.as_ref()).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::RequestNotSuccess(response.status().as_u16()));
    }

    Ok(response.text().await?)
}
