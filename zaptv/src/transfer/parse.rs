use log::warn;
use tokio::task::JoinError;
use url::Url;
use zaplist_rs::format::ChannelList;

/// Parse off the async runtime; large playlists run to the hundreds of
/// thousands of lines.
pub async fn parse_channels_async(text: String) -> Result<ChannelList, JoinError> {
    tokio::task::spawn_blocking(move || zaplist_rs::parse_channels(text)).await
}

/// Locations that are relative references are joined against the document
/// origin so the player gets something it can open. Absolute locations, and
/// anything that fails to parse as a URL, pass through untouched.
pub fn resolve_locations(list: &mut ChannelList, origin: impl AsRef<str>) {
    let Ok(base) = Url::parse(origin.as_ref()) else {
        return;
    };

    for channel in list.channels.iter_mut() {
        if Url::parse(&channel.url) == Err(url::ParseError::RelativeUrlWithoutBase) {
            match base.join(&channel.url) {
                Ok(joined) => channel.url = joined.as_str().into(),
                Err(e) => warn!("Failed to join {} with {}: {}", channel.url, base, e),
            }
        }
    }
}
