use std::path::PathBuf;

use thiserror::Error;

/// The game cannot be played because its data could not be obtained
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to fetch {source_ref}")]
    Fetch {
        source_ref: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{source_ref} answered with HTTP {status}")]
    Status {
        source_ref: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_ref} is not valid JSON for this game")]
    Malformed {
        source_ref: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{source_ref} contains no playable items")]
    Empty { source_ref: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
