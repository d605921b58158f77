use std::{collections::HashMap, sync::Arc};

use serde::Deserialize;
use smol_str::SmolStr;
use zaplist_rs::format::Channel;

/// Channels the user marked, keyed by location.
///
/// Entries are independent snapshots: the title a channel carried when it
/// was marked stays until it is unmarked, even if a later reload renames
/// the channel at the same location.
#[derive(Debug, Default, Clone)]
pub struct FavoriteSet {
    by_url: HashMap<SmolStr, Channel>,
}

impl FavoriteSet {
    pub fn from_channels(channels: impl IntoIterator<Item = Channel>) -> Self {
        Self {
            by_url: channels
                .into_iter()
                .map(|channel| (channel.url.clone(), channel))
                .collect(),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.by_url.contains_key(url)
    }

    /// Remove the channel when its location is already marked, insert a
    /// snapshot of it otherwise. Returns the new membership.
    pub fn toggle(&mut self, channel: &Channel) -> bool {
        if self.by_url.remove(channel.url.as_str()).is_some() {
            false
        } else {
            self.by_url.insert(channel.url.clone(), channel.clone());
            true
        }
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.by_url.values()
    }

    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_url.clear();
    }
}

#[derive(Debug, Default, Clone)]
pub struct FilterCriteria {
    /// Case-insensitive substring match against titles, empty means no
    /// constraint
    pub search_term: String,
    pub favorites_only: bool,
}

/// Partial update for [`FilterCriteria`]; unset fields keep their prior
/// value.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUpdate {
    pub search_term: Option<String>,
    pub favorites_only: Option<bool>,
}

/// Receives the favorite set after every toggle.
///
/// Implementations must return without blocking; the in-memory set is
/// already updated when this runs and is never rolled back, whatever
/// happens to the write.
pub trait FavoritesSink: Send + Sync {
    fn persist(&self, favorites: &FavoriteSet);
}

/// Owns the loaded channel sequence, the favorite set and the active
/// filter, and derives the visible list on demand.
///
/// All operations are synchronous; the single async boundary is the
/// persistence sink signalled by [`ChannelStore::toggle_favorite`].
pub struct ChannelStore {
    channels: Vec<Channel>,
    favorites: FavoriteSet,
    filter: FilterCriteria,
    sink: Arc<dyn FavoritesSink>,
}

impl ChannelStore {
    pub fn new(favorites: FavoriteSet, sink: Arc<dyn FavoritesSink>) -> Self {
        Self {
            channels: Vec::new(),
            favorites,
            filter: FilterCriteria::default(),
            sink,
        }
    }

    /// Replace the loaded sequence wholesale. Favorites and filter are
    /// untouched.
    pub fn load(&mut self, channels: Vec<Channel>) {
        self.channels = channels;
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn toggle_favorite(&mut self, channel: &Channel) -> bool {
        let now_favorite = self.favorites.toggle(channel);
        self.sink.persist(&self.favorites);
        now_favorite
    }

    pub fn is_favorite(&self, channel: &Channel) -> bool {
        self.favorites.contains(channel.url.as_str())
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn favorite_channels(&self) -> Vec<Channel> {
        self.favorites.channels().cloned().collect()
    }

    pub fn set_filter(&mut self, update: FilterUpdate) {
        if let Some(search_term) = update.search_term {
            self.filter.search_term = search_term;
        }
        if let Some(favorites_only) = update.favorites_only {
            self.filter.favorites_only = favorites_only;
        }
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// The loaded sequence after the favorites-only constraint, then the
    /// search constraint, relative order preserved.
    pub fn visible_channels(&self) -> Vec<Channel> {
        let needle = self.filter.search_term.to_lowercase();

        self.channels
            .iter()
            .filter(|channel| {
                !self.filter.favorites_only || self.favorites.contains(channel.url.as_str())
            })
            .filter(|channel| {
                needle.is_empty() || channel.title.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Drop the loaded sequence and every favorite; the filter stays as the
    /// user left it. The sink is not signalled, callers clearing the store
    /// wipe the persisted state themselves.
    pub fn clear(&mut self) {
        self.channels.clear();
        self.favorites.clear();
    }
}
