use std::{
    error::Error,
    fmt::Display,
    io,
    path::PathBuf,
    sync::Arc,
};

use log::warn;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use zaplist_rs::format::Channel;

use crate::store::{FavoriteSet, FavoritesSink};

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// On-disk shape of the manager state, one JSON document holding the URL
/// history and the favorite snapshots.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredState {
    #[serde(default)]
    history: Vec<String>,
    #[serde(default)]
    favorites: Vec<Channel>,
}

#[derive(Debug)]
pub enum StorageError {
    IoError(io::Error),
    Encode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => e.fmt(f),
            Self::Encode(e) => e.fmt(f),
        }
    }
}
impl Error for StorageError {}
impl From<io::Error> for StorageError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}
impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// File-backed store for history and favorites. The in-memory copy is the
/// source of truth; every mutation rewrites the whole document.
pub struct Storage {
    path: PathBuf,
    history_limit: usize,
    state: RwLock<StoredState>,
}

impl Storage {
    /// A missing state file starts the manager empty; so does an unreadable
    /// one, with a warning.
    pub fn open(path: impl Into<PathBuf>, history_limit: usize) -> Arc<Self> {
        let path = path.into();
        let state = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(state) => state,
                Err(e) => {
                    warn!("Ignoring corrupt state file {}: {}", path.display(), e);
                    StoredState::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => StoredState::default(),
            Err(e) => {
                warn!("Failed to read state file {}: {}", path.display(), e);
                StoredState::default()
            }
        };

        Arc::new(Self {
            path,
            history_limit,
            state: RwLock::new(state),
        })
    }

    /// Most-recent-first, at most `history_limit` entries even when an old
    /// state file holds more.
    pub async fn history(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .history
            .iter()
            .take(self.history_limit)
            .cloned()
            .collect()
    }

    /// Dedupes by exact string equality, moves the entry to the front and
    /// truncates beyond the limit.
    pub async fn push_history(&self, url: &str) -> Result<(), StorageError> {
        if url.is_empty() {
            return Ok(());
        }

        let mut state = self.state.write().await;
        state.history.retain(|item| item != url);
        state.history.insert(0, url.to_owned());
        state.history.truncate(self.history_limit);
        self.write(&state).await
    }

    pub async fn favorites(&self) -> FavoriteSet {
        FavoriteSet::from_channels(self.state.read().await.favorites.iter().cloned())
    }

    pub async fn set_favorites(&self, favorites: &FavoriteSet) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        state.favorites = favorites.channels().cloned().collect();
        self.write(&state).await
    }

    /// Wipe history and favorites in one go.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        *state = StoredState::default();
        self.write(&state).await
    }

    async fn write(&self, state: &StoredState) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

/// Write-back half of the toggle contract: the store updates its in-memory
/// set synchronously and this ships the result to disk without making the
/// caller wait. A failed write is logged and the in-memory state stands.
pub struct FavoritesWriter(pub Arc<Storage>);

impl FavoritesSink for FavoritesWriter {
    fn persist(&self, favorites: &FavoriteSet) {
        let storage = self.0.clone();
        let favorites = favorites.clone();
        tokio::spawn(async move {
            if let Err(e) = storage.set_favorites(&favorites).await {
                warn!("Failed to persist favorites: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use zaplist_rs::format::Channel;

    use crate::store::FavoriteSet;

    use super::{DEFAULT_HISTORY_LIMIT, Storage};

    fn state_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
        dir.path().join("state.json")
    }

    #[tokio::test]
    async fn test_history_dedupes_and_moves_to_front() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(state_path(&dir), DEFAULT_HISTORY_LIMIT);

        storage.push_history("http://a").await.unwrap();
        storage.push_history("http://b").await.unwrap();
        storage.push_history("http://a").await.unwrap();

        assert_eq!(storage.history().await, vec!["http://a", "http://b"]);
    }

    #[tokio::test]
    async fn test_history_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(state_path(&dir), 3);

        for i in 0..5 {
            storage.push_history(&format!("http://{}", i)).await.unwrap();
        }

        let history = storage.history().await;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0], "http://4");
        assert_eq!(history[2], "http://2");
    }

    #[tokio::test]
    async fn test_empty_url_is_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(state_path(&dir), DEFAULT_HISTORY_LIMIT);

        storage.push_history("").await.unwrap();
        assert!(storage.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = state_path(&dir);

        {
            let storage = Storage::open(&path, DEFAULT_HISTORY_LIMIT);
            storage.push_history("http://a").await.unwrap();
            let favorites =
                FavoriteSet::from_channels(vec![Channel::new("A", "http://a/stream")]);
            storage.set_favorites(&favorites).await.unwrap();
        }

        let storage = Storage::open(&path, DEFAULT_HISTORY_LIMIT);
        assert_eq!(storage.history().await, vec!["http://a"]);
        let favorites = storage.favorites().await;
        assert!(favorites.contains("http://a/stream"));
        assert_eq!(favorites.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_wipes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = state_path(&dir);

        let storage = Storage::open(&path, DEFAULT_HISTORY_LIMIT);
        storage.push_history("http://a").await.unwrap();
        let favorites = FavoriteSet::from_channels(vec![Channel::new("A", "http://a/stream")]);
        storage.set_favorites(&favorites).await.unwrap();

        storage.clear().await.unwrap();
        assert!(storage.history().await.is_empty());
        assert!(storage.favorites().await.is_empty());

        // and the on-disk copy agrees
        let storage = Storage::open(&path, DEFAULT_HISTORY_LIMIT);
        assert!(storage.history().await.is_empty());
        assert!(storage.favorites().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = state_path(&dir);
        std::fs::write(&path, b"not json at all").unwrap();

        let storage = Storage::open(&path, DEFAULT_HISTORY_LIMIT);
        assert!(storage.history().await.is_empty());
        assert!(storage.favorites().await.is_empty());
    }
}
