//! Favorites persistence and the read-modify-write toggle

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::collaborators::FavoritesStore;

pub const FAVORITES_FILE: &str = ".cache/favorites.json";

/// Flip `track_id` in the persisted set and write it back.
///
/// Returns whether the track is a favorite afterwards.
pub async fn toggle_favorite(store: &dyn FavoritesStore, track_id: &str) -> Result<bool> {
    if track_id.is_empty() {
        return Err(anyhow::anyhow!("Track ID is empty"));
    }

    let mut ids = store.get().await?;
    let now_favorite = if ids.remove(track_id) {
        false
    } else {
        ids.insert(track_id.to_string());
        true
    };
    store.set(&ids).await?;

    tracing::info!(track_id, now_favorite, count = ids.len(), "Favorite toggled");
    Ok(now_favorite)
}

/// Favorites stored as a JSON array of track ids on disk
#[derive(Clone)]
pub struct JsonFavoritesStore {
    path: PathBuf,
}

impl JsonFavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFavoritesStore {
    fn default() -> Self {
        Self::new(FAVORITES_FILE)
    }
}

#[async_trait]
impl FavoritesStore for JsonFavoritesStore {
    async fn get(&self) -> Result<HashSet<String>> {
        // missing file means nothing has been favorited yet
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(HashSet::new());
        }
        let content = tokio::fs::read_to_string(&self.path).await?;
        let ids: Vec<String> = serde_json::from_str(&content)?;
        Ok(ids.into_iter().collect())
    }

    async fn set(&self, ids: &HashSet<String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }

        let mut sorted: Vec<&String> = ids.iter().collect();
        sorted.sort();
        let content = serde_json::to_string(&sorted)?;
        tokio::fs::write(&self.path, content).await?;
        tracing::debug!(path = %self.path.display(), count = ids.len(), "Favorites saved");
        Ok(())
    }
}

/// Process-local store, used when persistence is disabled and in tests
#[derive(Clone, Default)]
pub struct MemoryFavoritesStore {
    ids: Arc<RwLock<HashSet<String>>>,
}

impl MemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavoritesStore {
    async fn get(&self) -> Result<HashSet<String>> {
        Ok(self.ids.read().await.clone())
    }

    async fn set(&self, ids: &HashSet<String>) -> Result<()> {
        *self.ids.write().await = ids.clone();
        Ok(())
    }
}
