use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// One playable entry extracted from a channel list.
///
/// Two channels are the same channel iff their locations are equal; the
/// title is display data and may change between reloads of the same list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub title: SmolStr,
    pub url: SmolStr,
    /// `key="value"` pairs from the `#EXTINF:` line (`tvg-id`,
    /// `group-title`, ...), display data for consumers.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<SmolStr, SmolStr>,
}

impl Channel {
    pub fn new(title: impl Into<SmolStr>, url: impl Into<SmolStr>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            attributes: HashMap::new(),
        }
    }
}
