//! Layered settings for the fixture loader.
//!
//! Values are read, lowest precedence first, from built-in defaults, an
//! optional settings file, and `FACET_FILTER__*` environment variables.

mod sources;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::FilterError;
use crate::fixtures::FixtureFormat;

pub use sources::ENV_PREFIX;

/// Fixture root used when no source overrides it.
pub const DEFAULT_FIXTURE_ROOT: &str = "tests/fixtures";

/// Resolved settings consumed by [`FixtureStore`](crate::FixtureStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSettings {
    /// Directory that fixture names are resolved against.
    pub root: PathBuf,
    /// Format to force for every fixture, bypassing extension detection.
    pub format: Option<FixtureFormat>,
}

impl Default for FixtureSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_FIXTURE_ROOT),
            format: None,
        }
    }
}

/// Mirror of the settings sources before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    root: Option<PathBuf>,
    format: Option<String>,
}

impl RawSettings {
    fn resolve(self) -> Result<FixtureSettings, FilterError> {
        let format = match self.format.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse().map_err(|_| FilterError::Settings {
                key: "format",
                value: raw.to_string(),
            })?),
        };

        Ok(FixtureSettings {
            root: self
                .root
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE_ROOT)),
            format,
        })
    }
}

impl FixtureSettings {
    /// Settings pointing at `root` with extension-based format detection.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            format: None,
        }
    }

    /// Force `format` for every fixture.
    #[must_use]
    pub fn with_format(mut self, format: FixtureFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Resolve settings from an optional file plus the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Config`] when a source cannot be read or
    /// deserialized, and [`FilterError::Settings`] for an unknown format.
    pub fn from_sources(file: Option<&Path>) -> Result<Self, FilterError> {
        Self::resolve_sources(file, None)
    }

    /// Like [`FixtureSettings::from_sources`] but reading `env` instead of
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`FixtureSettings::from_sources`].
    pub fn from_sources_with_env(
        file: Option<&Path>,
        env: config::Map<String, String>,
    ) -> Result<Self, FilterError> {
        Self::resolve_sources(file, Some(env))
    }

    fn resolve_sources(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, FilterError> {
        let config = sources::build_config(file, env)?;
        let raw: RawSettings = config.try_deserialize()?;
        raw.resolve()
    }
}

/// Load settings from an optional settings file and the environment.
///
/// # Errors
///
/// Fails with context naming the settings file when any source is invalid.
pub fn load(file: Option<&Path>) -> Result<FixtureSettings> {
    FixtureSettings::from_sources(file).with_context(|| match file {
        Some(path) => format!("failed to load fixture settings from '{}'", path.display()),
        None => "failed to load fixture settings from the environment".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_without_sources() {
        let settings = FixtureSettings::from_sources_with_env(None, env(&[])).unwrap();
        assert_eq!(settings, FixtureSettings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixtures.toml");
        fs::write(&path, "root = \"data/facets\"\nformat = \"toml\"\n").unwrap();

        let settings = FixtureSettings::from_sources_with_env(Some(path.as_path()), env(&[])).unwrap();
        assert_eq!(settings.root, PathBuf::from("data/facets"));
        assert_eq!(settings.format, Some(FixtureFormat::Toml));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixtures.toml");
        fs::write(&path, "root = \"from-file\"\n").unwrap();

        let settings = FixtureSettings::from_sources_with_env(
            Some(path.as_path()),
            env(&[("FACET_FILTER__ROOT", "from-env"), ("FACET_FILTER__FORMAT", "json")]),
        )
        .unwrap();
        assert_eq!(settings.root, PathBuf::from("from-env"));
        assert_eq!(settings.format, Some(FixtureFormat::Json));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = FixtureSettings::from_sources_with_env(
            None,
            env(&[("FACET_FILTER__FORMAT", "yaml")]),
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::Settings { key: "format", .. }));
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn builder_helpers_set_fields() {
        let settings = FixtureSettings::with_root("fx").with_format(FixtureFormat::Json);
        assert_eq!(settings.root, PathBuf::from("fx"));
        assert_eq!(settings.format, Some(FixtureFormat::Json));
    }
}
