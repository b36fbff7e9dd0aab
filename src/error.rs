use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the fallible edges of the crate: decoding snapshots from
/// generic values, reading fixtures, and resolving settings.
///
/// Operations on a [`Filter`](crate::Filter) itself never fail.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A generic value did not have the fixed snapshot shape.
    #[error("invalid filter snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),

    /// A fixture file could not be read.
    #[error("failed to read fixture '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON fixture could not be decoded.
    #[error("invalid JSON fixture '{origin}': {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// A TOML fixture could not be decoded.
    #[error("invalid TOML fixture '{origin}': {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// The fixture format could not be determined or is not supported.
    #[error("unsupported fixture format '{0}'")]
    UnsupportedFormat(String),

    /// No fixture with the requested name exists under the fixture root.
    #[error("fixture '{name}' not found under '{}'", root.display())]
    NotFound { name: String, root: PathBuf },

    /// A settings value was present but invalid.
    #[error("invalid value for {key}: {value}")]
    Settings { key: &'static str, value: String },

    /// The settings sources could not be built or deserialized.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
