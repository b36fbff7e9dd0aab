use std::path::Path;

use config::{Config, ConfigError, Environment, File};

/// Prefix of the environment variables read by the settings loader.
pub const ENV_PREFIX: &str = "FACET_FILTER";

/// Build a [`Config`] from an optional settings file and the environment.
///
/// `env` replaces the process environment when provided.
pub(super) fn build_config(
    file: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<Config, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(env),
    );

    builder.build()
}
