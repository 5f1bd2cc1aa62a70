//! JSON fixture backends.
//!
//! A fixture file holds both backends' canned results:
//!
//! ```json
//! {
//!   "keyword": [{ "id": "a", "url": "https://docs.rs/x", "sparseScore": 0.9 }],
//!   "dense":   [{ "url": "https://arxiv.org/abs/1", "confidence": 0.7 }]
//! }
//! ```
//!
//! Entries use the backend result wire shape, so loosely shaped records
//! (missing `id`, `score`/`confidence` instead of a typed score) are
//! accepted and normalised at ingestion.

use std::path::Path;

use serde::{Deserialize, Serialize};

use scout_search::{RawBackendResult, StaticBackend};

use crate::error::{HostError, Result};

/// Canned results for one keyword and one dense backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureSet {
    pub keyword: Vec<RawBackendResult>,
    pub dense: Vec<RawBackendResult>,
}

impl FixtureSet {
    /// Load a fixture set from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Decode a fixture set from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Fixture`] on malformed JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| HostError::Fixture(e.to_string()))
    }

    /// Split into `(keyword, dense)` replay backends.
    pub fn into_backends(self) -> (StaticBackend, StaticBackend) {
        (
            StaticBackend::new(self.keyword),
            StaticBackend::new(self.dense),
        )
    }
}
