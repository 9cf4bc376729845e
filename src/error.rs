use std::path::PathBuf;

use thiserror::Error;

/// Library error type for catalog operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog file is missing or unreadable.
    #[error("failed to read media catalog {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not a JSON array of media records.
    #[error("failed to parse media catalog {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Both partitions are empty at sampling time.
    #[error("media catalog holds no records")]
    EmptyCatalog,

    /// Every sampled record was rejected by the extension filter.
    #[error("no supported media found after {attempts} weighted draws")]
    NoSupportedMedia { attempts: u32 },

    /// The operating-system entropy source failed.
    #[error("entropy source failed: {0}")]
    Entropy(String),
}
