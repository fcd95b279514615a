//! repowatch watermark persistence.
//!
//! Implements [`domain::WatermarkStore`] over a single pretty-printed JSON
//! file:
//!
//! ```json
//! {
//!   "owner/name": {
//!     "issues": "2024-06-15T10:00:00Z",
//!     "comments": "2024-06-15T09:00:00Z"
//!   }
//! }
//! ```
//!
//! Writes go to a sibling temporary file that is then renamed over the
//! target, so a reader never observes a half-written map.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domain::{StoreError, WatermarkMap, WatermarkStore};
use tracing::debug;

/// Default location of the state file, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "last_check.json";

/// Stores the watermark map in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_STATE_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl WatermarkStore for JsonFileStore {
    async fn load(&self) -> Result<WatermarkMap, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        let map: WatermarkMap =
            serde_json::from_str(&raw).map_err(|e| StoreError::Malformed(e.to_string()))?;
        debug!(path = %self.path.display(), repositories = map.len(), "watermarks loaded");
        Ok(map)
    }

    async fn save(&self, map: &WatermarkMap) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(map).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, json)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        debug!(path = %self.path.display(), repositories = map.len(), "watermarks saved");
        Ok(())
    }
}
