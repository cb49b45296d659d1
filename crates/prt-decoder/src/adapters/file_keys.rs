//! Key provider reading published key files from a local directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::is_epoch_encoding;
use super::key_file::KeyFile;
use crate::domain::entities::EpochKeys;
use crate::ports::outbound::{EpochKeyProvider, KeyLookupError};

/// Reads `<dir>/<epoch_id_encoding>.json`.
#[derive(Debug, Clone)]
pub struct FileKeyProvider {
    dir: PathBuf,
}

impl FileKeyProvider {
    /// Create a provider over a key directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The key directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the key file for an epoch.
    pub fn key_path(&self, epoch_id_encoding: &str) -> PathBuf {
        self.dir.join(format!("{epoch_id_encoding}.json"))
    }
}

#[async_trait]
impl EpochKeyProvider for FileKeyProvider {
    async fn lookup(&self, epoch_id_encoding: &str) -> Result<EpochKeys, KeyLookupError> {
        if !is_epoch_encoding(epoch_id_encoding) {
            return Err(KeyLookupError::NotFound(epoch_id_encoding.to_string()));
        }

        let path = self.key_path(epoch_id_encoding);
        debug!(path = %path.display(), "Reading key file");

        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => KeyLookupError::NotFound(epoch_id_encoding.to_string()),
            _ => KeyLookupError::Io(format!("{}: {}", path.display(), e)),
        })?;

        KeyFile::from_slice(&bytes)?.to_epoch_keys()
    }
}
