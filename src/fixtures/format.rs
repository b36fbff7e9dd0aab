use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::FilterError;

/// Serialization formats a fixture file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureFormat {
    Json,
    Toml,
}

impl FixtureFormat {
    /// Every supported format, in lookup order for extensionless names.
    pub const ALL: [FixtureFormat; 2] = [FixtureFormat::Json, FixtureFormat::Toml];

    /// The file extension associated with the format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            FixtureFormat::Json => "json",
            FixtureFormat::Toml => "toml",
        }
    }

    /// Detect the format of `path` from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnsupportedFormat`] when the extension is missing
    /// or unknown.
    pub fn from_path(path: &Path) -> Result<Self, FilterError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension
            .parse()
            .map_err(|_| FilterError::UnsupportedFormat(path.display().to_string()))
    }
}

impl FromStr for FixtureFormat {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(FixtureFormat::Json),
            "toml" => Ok(FixtureFormat::Toml),
            _ => Err(FilterError::UnsupportedFormat(value.to_string())),
        }
    }
}

impl fmt::Display for FixtureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
