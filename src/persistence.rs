//! Snapshot Persistence
//!
//! Optional JSON snapshot of the live entry set. The whole collection is
//! rewritten after every mutation; writes go to a sibling temp file that is
//! renamed over the snapshot so a crash never leaves a torn file behind.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};

// == Snapshot File ==
/// File-backed snapshot of the cache contents.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Load ==
    /// Reads all entries from the snapshot.
    ///
    /// A missing file is an empty snapshot.
    pub async fn load(&self) -> Result<Vec<CacheEntry>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(CacheError::Unavailable(format!(
                    "Failed to read snapshot {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            CacheError::Unavailable(format!(
                "Failed to parse snapshot {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    // == Save ==
    /// Replaces the snapshot with `entries`.
    pub async fn save(&self, entries: &[CacheEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheError::Unavailable(format!("Failed to create directory: {}", e)))?;
        }

        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| CacheError::Unavailable(format!("Failed to serialize snapshot: {}", e)))?;

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(|e| CacheError::Unavailable(format!("Failed to write snapshot: {}", e)))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| CacheError::Unavailable(format!("Failed to replace snapshot: {}", e)))?;

        debug!(
            "Wrote {} entries to snapshot {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
