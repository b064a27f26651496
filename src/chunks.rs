//! Bundler chunk manifests.
//!
//! Production builds resolve logical bundle names (`app.js`) to their
//! content-hashed output names (`app.3f9c01.js`) through a JSON manifest
//! emitted by the bundler. Development builds reference the logical names
//! directly and never consult the manifest.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("failed to read asset manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse asset manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Mapping from logical asset file name to resolved output file name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ChunkMap(HashMap<String, String>);

impl ChunkMap {
    /// Load a manifest from a bundler-emitted JSON file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Resolve a logical bundle name for a build.
    ///
    /// Production builds look the name up in the manifest; `None` means the
    /// bundle was not emitted and the caller decides whether that matters.
    /// Development builds use the logical name as-is.
    pub fn resolve(&self, file: &str, is_production: bool) -> Option<String> {
        if is_production {
            self.0.get(file).cloned()
        } else {
            Some(file.to_string())
        }
    }
}

impl FromIterator<(String, String)> for ChunkMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
