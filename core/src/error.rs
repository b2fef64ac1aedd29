//! Error types shared across the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// No directory within the search bound contained a marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "project root not found within {max_depth} parent directories; searched for markers: {markers:?}"
)]
pub struct RootNotFound {
    pub max_depth: usize,
    pub markers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level '{0}' (expected DEBUG, INFO, SUCCESS, WARNING, ERROR or CRITICAL)")]
pub struct ParseLevelError(pub String);

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {var}")]
    Env { var: String, value: String },
}
