//! Engine configuration.

use crate::image::FileSource;
use crate::reader::{ChunkedReader, DEFAULT_CHUNK_SIZE};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Environment variable overriding the chunk buffer size.
pub const CHUNK_SIZE_ENV: &str = "IMGSUM_CHUNK_SIZE";
/// Environment variable setting the directory relative identifiers resolve in.
pub const BASE_DIR_ENV: &str = "IMGSUM_BASE_DIR";

/// Tunables for the digest engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Size of the local copy buffer used by the chunked reader.
    pub chunk_size: NonZeroUsize,
    /// Directory file identifiers are resolved against.
    pub base_dir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            base_dir: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable values are logged and replaced by defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(CHUNK_SIZE_ENV) {
            match raw.trim().parse::<NonZeroUsize>() {
                Ok(size) => config.chunk_size = size,
                Err(e) => tracing::warn!(
                    "Ignoring {CHUNK_SIZE_ENV}={raw:?}: {e}; using {}",
                    DEFAULT_CHUNK_SIZE
                ),
            }
        }

        config.base_dir = lookup(BASE_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        config
    }

    /// Chunked reader sized from this configuration.
    pub fn reader(&self) -> ChunkedReader {
        ChunkedReader::new(self.chunk_size)
    }

    /// File source rooted at the configured base directory.
    pub fn file_source(&self) -> FileSource {
        match &self.base_dir {
            Some(dir) => FileSource::with_base_dir(dir),
            None => FileSource::new(),
        }
    }
}
