//! In-memory key provider for tests, fixtures and pre-loaded keyrings.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::entities::EpochKeys;
use crate::ports::outbound::{EpochKeyProvider, KeyLookupError};

/// Key provider backed by a map from epoch id encoding to key material.
#[derive(Debug, Clone, Default)]
pub struct StaticKeyProvider {
    keys: HashMap<String, EpochKeys>,
}

impl StaticKeyProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add key material for an epoch.
    #[must_use]
    pub fn with_keys(mut self, epoch_id_encoding: impl Into<String>, keys: EpochKeys) -> Self {
        self.insert(epoch_id_encoding, keys);
        self
    }

    /// Add or replace key material for an epoch.
    pub fn insert(&mut self, epoch_id_encoding: impl Into<String>, keys: EpochKeys) {
        self.keys.insert(epoch_id_encoding.into(), keys);
    }

    /// The underlying keyring, suitable for batch decoding.
    pub fn keyring(&self) -> &HashMap<String, EpochKeys> {
        &self.keys
    }
}

#[async_trait]
impl EpochKeyProvider for StaticKeyProvider {
    async fn lookup(&self, epoch_id_encoding: &str) -> Result<EpochKeys, KeyLookupError> {
        self.keys
            .get(epoch_id_encoding)
            .cloned()
            .ok_or_else(|| KeyLookupError::NotFound(epoch_id_encoding.to_string()))
    }
}
