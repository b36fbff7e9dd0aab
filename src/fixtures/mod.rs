//! Read serialized filter fixtures back into live [`Filter`]s.
//!
//! A fixture document holds filter snapshots in one of two shapes:
//!
//! - a bare array of snapshots (JSON only);
//! - a table with a `filters` array, written `[[filters]]` in TOML.
//!
//! Fixtures are only ever read; nothing in this module writes files.

mod format;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::error::FilterError;
use crate::filter::{Filter, FilterSnapshot};
use crate::settings::{self, FixtureSettings};

pub use format::FixtureFormat;

const IN_MEMORY_ORIGIN: &str = "<memory>";

#[derive(Debug, Deserialize)]
struct FixtureTable {
    filters: Vec<FilterSnapshot>,
}

/// Parse fixture `text` in the given `format`.
///
/// # Errors
///
/// Returns [`FilterError::Json`] or [`FilterError::Toml`] when the text does not
/// decode into filter snapshots.
pub fn parse_fixture(text: &str, format: FixtureFormat) -> Result<Vec<Filter>, FilterError> {
    parse_with_origin(text, format, IN_MEMORY_ORIGIN)
}

fn parse_with_origin(
    text: &str,
    format: FixtureFormat,
    origin: &str,
) -> Result<Vec<Filter>, FilterError> {
    let snapshots = match format {
        FixtureFormat::Json => parse_json(text).map_err(|source| FilterError::Json {
            origin: origin.to_string(),
            source,
        })?,
        FixtureFormat::Toml => toml::from_str::<FixtureTable>(text)
            .map(|table| table.filters)
            .map_err(|source| FilterError::Toml {
                origin: origin.to_string(),
                source,
            })?,
    };

    Ok(snapshots.into_iter().map(Filter::from_snapshot).collect())
}

fn parse_json(text: &str) -> Result<Vec<FilterSnapshot>, serde_json::Error> {
    let document: Value = serde_json::from_str(text)?;
    if document.is_array() {
        serde_json::from_value(document)
    } else {
        serde_json::from_value::<FixtureTable>(document).map(|table| table.filters)
    }
}

/// Resolves fixture names under a root directory and loads them.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    settings: FixtureSettings,
}

impl FixtureStore {
    #[must_use]
    pub fn new(settings: FixtureSettings) -> Self {
        Self { settings }
    }

    /// Build a store from a settings file layered with the environment.
    ///
    /// # Errors
    ///
    /// Fails when the settings file is missing or holds invalid values.
    pub fn from_settings_file(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(settings::load(Some(path))?))
    }

    #[must_use]
    pub fn settings(&self) -> &FixtureSettings {
        &self.settings
    }

    /// Resolve `name` to a fixture file under the configured root.
    ///
    /// A name with an extension is used as-is. Otherwise each supported
    /// extension is tried in turn (only the forced one, if settings force a
    /// format) and the first existing file wins.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::NotFound`] when no candidate exists.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, FilterError> {
        let root = &self.settings.root;
        let direct = root.join(name);

        if direct.extension().is_some() {
            return if direct.is_file() {
                Ok(direct)
            } else {
                Err(self.not_found(name))
            };
        }

        let formats: Vec<FixtureFormat> = match self.settings.format {
            Some(format) => vec![format],
            None => FixtureFormat::ALL.to_vec(),
        };

        let mut found = formats
            .iter()
            .map(|format| root.join(format!("{name}.{}", format.extension())))
            .filter(|candidate| candidate.is_file());

        let Some(path) = found.next() else {
            return Err(self.not_found(name));
        };

        if let Some(other) = found.next() {
            warn!(
                "fixture '{name}' exists as both '{}' and '{}', using the first",
                path.display(),
                other.display()
            );
        }

        Ok(path)
    }

    /// Load the fixture called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::NotFound`] if the name does not resolve, or any
    /// error from [`FixtureStore::load_path`].
    pub fn load(&self, name: &str) -> Result<Vec<Filter>, FilterError> {
        let path = self.resolve(name)?;
        self.load_path(&path)
    }

    /// Load the fixture file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Io`] if the file cannot be read,
    /// [`FilterError::UnsupportedFormat`] if its format cannot be detected, or
    /// a decode error for malformed content.
    pub fn load_path(&self, path: &Path) -> Result<Vec<Filter>, FilterError> {
        let format = match self.settings.format {
            Some(format) => format,
            None => FixtureFormat::from_path(path)?,
        };
        debug!("loading {format} fixture '{}'", path.display());

        let text = fs::read_to_string(path).map_err(|source| FilterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let filters = parse_with_origin(&text, format, &path.display().to_string())?;

        debug!(
            "loaded {} filter(s) from '{}'",
            filters.len(),
            path.display()
        );
        Ok(filters)
    }

    fn not_found(&self, name: &str) -> FilterError {
        FilterError::NotFound {
            name: name.to_string(),
            root: self.settings.root.clone(),
        }
    }
}
