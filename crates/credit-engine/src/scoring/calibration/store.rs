use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DirectionMap;

/// Durable storage for the calibrated direction map.
///
/// A single global map is stored, scoped to the current oracle. Concurrent
/// saves resolve as last writer wins; the computed map is identical across
/// racing calibrations.
pub trait DirectionStore: Send + Sync {
    fn load(&self) -> Result<Option<DirectionMap>, StoreError>;
    fn save(&self, map: &DirectionMap) -> Result<(), StoreError>;
}

/// Error enumeration for direction-store failures. Never surfaces past the
/// calibrator, which treats every failure as a cache miss.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("direction cache io: {0}")]
    Io(#[from] std::io::Error),
    #[error("direction cache serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// On-disk document: string-encoded salient indices mapped to signs.
#[derive(Debug, Serialize, Deserialize)]
struct CachedDirections {
    calibrated_at: DateTime<Utc>,
    signs: BTreeMap<usize, i8>,
}

/// JSON-file implementation of the direction cache.
pub struct FileDirectionStore {
    path: PathBuf,
}

impl FileDirectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DirectionStore for FileDirectionStore {
    fn load(&self) -> Result<Option<DirectionMap>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<CachedDirections>(&raw) {
            Ok(cached) => Ok(Some(DirectionMap::from_signs(cached.signs))),
            Err(err) => {
                // Corrupt content is treated as absent.
                debug!(path = %self.path.display(), error = %err, "direction cache unreadable");
                Ok(None)
            }
        }
    }

    fn save(&self, map: &DirectionMap) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = CachedDirections {
            calibrated_at: Utc::now(),
            signs: map.signs().clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&document)?)?;
        Ok(())
    }
}
