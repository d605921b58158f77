use smol_str::SmolStr;
use std::collections::HashMap;

use crate::format::Channel;

#[derive(Debug, Default, Clone)]
pub struct ChannelList {
    /// Attributes of the `#EXTM3U` header line, empty when the source has
    /// no header
    pub attributes: HashMap<SmolStr, SmolStr>,
    /// Channels in first-appearance order, duplicates preserved
    pub channels: Vec<Channel>,
}

impl ChannelList {
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
