//! Save-game persistence.
//!
//! One file per save, named by timestamp, holding a single-field JSON record
//! `{"state": <scene id>}`. Saves are append-only; loading picks the most
//! recently modified file. The selected language is deliberately not
//! persisted: a load continues in whatever language the current session runs
//! in, so a save never strands the player in a language they didn't pick.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Errors from writing a save.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from loading a save.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no saved games to load")]
    NoSaveFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The on-disk record. Owned exclusively by this module.
#[derive(Debug, Serialize, Deserialize)]
struct SaveRecord {
    state: String,
}

/// Owns the save directory and the save-file naming scheme.
#[derive(Debug, Clone)]
pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist the given scene id to a fresh timestamped file, creating the
    /// save directory if needed. Never overwrites earlier saves.
    pub async fn save(&self, scene_id: &str) -> Result<PathBuf, SaveError> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(save_filename());
        let record = SaveRecord {
            state: scene_id.to_string(),
        };
        fs::write(&path, serde_json::to_string(&record)?).await?;
        debug!(path = %path.display(), scene = scene_id, "game saved");
        Ok(path)
    }

    /// Return the scene id from the most recent save, by file modification
    /// time (filename as tiebreak). `NoSaveFound` when the directory is
    /// missing or holds no save files.
    pub async fn load(&self) -> Result<String, LoadError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NoSaveFound)
            }
            Err(e) => return Err(e.into()),
        };

        let mut latest: Option<(SystemTime, String, PathBuf)> = None;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.starts_with("save_") || !name.ends_with(".json") {
                continue;
            }
            let modified = entry
                .metadata()
                .await?
                .modified()
                .unwrap_or(UNIX_EPOCH);
            let key = (modified, name.to_string(), path);
            if latest
                .as_ref()
                .is_none_or(|(t, n, _)| (&key.0, &key.1) > (t, n))
            {
                latest = Some(key);
            }
        }

        let Some((_, _, path)) = latest else {
            return Err(LoadError::NoSaveFound);
        };

        let content = fs::read_to_string(&path).await?;
        let record: SaveRecord = serde_json::from_str(&content)?;
        debug!(path = %path.display(), scene = %record.state, "game loaded");
        Ok(record.state)
    }
}

/// Zero-padded millisecond timestamps sort lexicographically in
/// chronological order, which keeps the tiebreak stable when two saves land
/// inside one mtime granule.
fn save_filename() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("save_{millis:013}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let saves = SaveManager::new(dir.path());

        saves.save("window_scene").await.expect("save");
        let loaded = saves.load().await.expect("load");
        assert_eq!(loaded, "window_scene");
    }

    #[tokio::test]
    async fn test_most_recent_save_wins() {
        let dir = TempDir::new().expect("temp dir");
        let saves = SaveManager::new(dir.path());

        saves.save("door_scene").await.expect("first save");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        saves.save("window_scene").await.expect("second save");

        assert_eq!(saves.load().await.expect("load"), "window_scene");
    }

    #[tokio::test]
    async fn test_saves_are_append_only() {
        let dir = TempDir::new().expect("temp dir");
        let saves = SaveManager::new(dir.path());

        let first = saves.save("a").await.expect("save");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = saves.save("b").await.expect("save");

        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
    }

    #[tokio::test]
    async fn test_load_with_missing_directory_is_no_save_found() {
        let dir = TempDir::new().expect("temp dir");
        let saves = SaveManager::new(dir.path().join("never_created"));

        assert!(matches!(saves.load().await, Err(LoadError::NoSaveFound)));
    }

    #[tokio::test]
    async fn test_load_with_empty_directory_is_no_save_found() {
        let dir = TempDir::new().expect("temp dir");
        let saves = SaveManager::new(dir.path());

        assert!(matches!(saves.load().await, Err(LoadError::NoSaveFound)));
    }

    #[tokio::test]
    async fn test_unrelated_files_are_ignored() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("notes.json"), "{}").expect("write");
        std::fs::write(dir.path().join("save_readme.txt"), "hi").expect("write");

        let saves = SaveManager::new(dir.path());
        assert!(matches!(saves.load().await, Err(LoadError::NoSaveFound)));
    }

    #[test]
    fn test_save_filenames_sort_chronologically() {
        let a = format!("save_{:013}.json", 1_700_000_000_000u64);
        let b = format!("save_{:013}.json", 1_700_000_000_001u64);
        assert!(a < b);
    }
}
