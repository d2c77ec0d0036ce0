use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;
use crate::models::ShiftEntry;

/// JSON snapshot of the entry list, read when the store cannot be reached.
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when there is no snapshot or it cannot be decoded.
    pub fn read(&self) -> Option<Vec<ShiftEntry>> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "ignoring unreadable entry cache");
                None
            }
        }
    }
}

/// Write `entries` as a snapshot file.
pub fn write_snapshot(path: &Path, entries: &[ShiftEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
