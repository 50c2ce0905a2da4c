//! Configuration management for wordflip
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Embedded `default-config.toml`
//! 2. User config `~/.config/wordflip/config.{toml,json,yaml,yml}`
//! 3. Repository config `wordflip.{toml,json,yaml,yml}` in the working directory
//! 4. A custom file given with `--config`
//! 5. `WORDFLIP_*` environment variables
//! 6. Command-line flags

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parallel::RunOptions;


/// Used when no thread count is configured anywhere
pub const DEFAULT_THREAD_COUNT: usize = 4;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Fully merged settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordflipConfig {
    /// Number of slices and worker threads
    pub threads: usize,
    /// File to read
    pub input: PathBuf,
    /// File to write, truncated before the run
    pub output: PathBuf,
    /// Keep the space after the last word of the file
    pub trailing_space: bool,
}

impl Default for WordflipConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREAD_COUNT,
            input: PathBuf::from("input.txt"),
            output: PathBuf::from("output.txt"),
            trailing_space: true,
        }
    }
}

impl WordflipConfig {
    /// Load and merge every configuration layer.
    ///
    /// `cli_overrides` should serialize only the keys the user actually set;
    /// `None` fields must be skipped or they would mask lower layers.
    pub fn load<T: Serialize>(custom_config: Option<&str>, cli_overrides: Option<T>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));
        figment = merge_any_format(figment, &Self::user_config_base_path());
        figment = merge_any_format(figment, Path::new("wordflip"));

        if let Some(path) = custom_config {
            tracing::trace!("CONFIG LOAD: Custom config {}", path);
            figment = merge_file(figment, Path::new(path));
        }

        figment = figment.merge(Env::prefixed("WORDFLIP_"));

        if let Some(overrides) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(overrides));
        }

        let config: Self = figment.extract().map_err(Box::new)?;
        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::invalid("thread count must be a positive integer"));
        }
        Ok(())
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            threads: self.threads,
            trailing_space: self.trailing_space,
        }
    }

    fn user_config_base_path() -> PathBuf {
        match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".config/wordflip/config"),
            Err(_) => PathBuf::from("~/.config/wordflip/config"),
        }
    }
}

/// Merge `<base>.toml`, `<base>.json`, `<base>.yaml` and `<base>.yml`; missing files are ignored
fn merge_any_format(figment: Figment, base: &Path) -> Figment {
    figment
        .merge(Toml::file(base.with_extension("toml")))
        .merge(Json::file(base.with_extension("json")))
        .merge(Yaml::file(base.with_extension("yaml")))
        .merge(Yaml::file(base.with_extension("yml")))
}

/// Merge a single file, choosing the format from its extension (TOML by default)
fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => figment.merge(Json::file(path)),
        Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}
