//! File-backed configuration store.

use std::path::{Path, PathBuf};

use super::ConfigStore;
use crate::error::{Error, Result};

/// A [`ConfigStore`] keeping each record as `<dir>/<name>.json`.
///
/// Records are written to a temporary sibling file and renamed into place,
/// so a reader never observes a half-written record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding record `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self, name: &str) -> Result<Option<serde_json::Value>> {
        let path = self.path(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(path, e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::json(name, e))
    }

    fn save(&mut self, name: &str, record: &serde_json::Value) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;

        let content = serde_json::to_string_pretty(record).map_err(|e| Error::json(name, e))?;
        let path = self.path(name);
        let tmp = self.dir.join(format!(".{}.json.tmp", name));
        std::fs::write(&tmp, content).map_err(|e| Error::io(&tmp, e))?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                tracing::warn!("Failed to remove '{}': {}", tmp.display(), cleanup);
            }
            return Err(Error::io(&path, e));
        }
        Ok(())
    }
}
