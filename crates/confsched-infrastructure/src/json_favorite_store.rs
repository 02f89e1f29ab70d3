//! JSON file backed `FavoriteStore` implementation.

use crate::paths::{ConfschedPaths, ServiceType};
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use confsched_core::error::Result;
use confsched_core::repository::FavoriteStore;
use confsched_core::stream::{RecordStream, watch_stream};
use std::collections::{BTreeSet, HashSet};
use tokio::sync::{Mutex, watch};

/// Favorite session ids mirrored to `favorites.json`.
///
/// The file holds a sorted JSON array so diffs stay stable.
pub struct JsonFavoriteStore {
    file: Option<AtomicJsonFile<BTreeSet<String>>>,
    // Serializes toggles so read-modify-write never interleaves.
    write_lock: Mutex<()>,
    favorites: watch::Sender<HashSet<String>>,
}

impl JsonFavoriteStore {
    /// Opens the store at the resolved data directory.
    pub async fn open(paths: &ConfschedPaths) -> Result<Self> {
        let file =
            AtomicJsonFile::<BTreeSet<String>>::new(paths.get_path(ServiceType::Favorites)?);
        let ids: HashSet<String> = file
            .load()
            .await?
            .unwrap_or_default()
            .into_iter()
            .collect();
        tracing::debug!("[JsonFavoriteStore] Loaded {} favorites", ids.len());
        Ok(Self::from_ids(Some(file), ids))
    }

    /// Creates a store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::from_ids(None, HashSet::new())
    }

    fn from_ids(file: Option<AtomicJsonFile<BTreeSet<String>>>, ids: HashSet<String>) -> Self {
        let (favorites, _) = watch::channel(ids);
        Self {
            file,
            write_lock: Mutex::new(()),
            favorites,
        }
    }
}

#[async_trait]
impl FavoriteStore for JsonFavoriteStore {
    fn favorite_ids(&self) -> RecordStream<HashSet<String>> {
        watch_stream(self.favorites.subscribe())
    }

    async fn toggle_favorite(&self, session_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut ids = self.favorites.borrow().clone();
        let added = if ids.remove(session_id) {
            false
        } else {
            ids.insert(session_id.to_string());
            true
        };

        if let Some(file) = &self.file {
            let sorted: BTreeSet<String> = ids.iter().cloned().collect();
            file.save(&sorted).await?;
        }

        tracing::info!(
            "[JsonFavoriteStore] {} favorite: {}",
            if added { "Added" } else { "Removed" },
            session_id
        );
        self.favorites.send_replace(ids);
        Ok(())
    }
}
