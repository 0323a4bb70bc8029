use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::builder::ConfigBuilder;
use super::constants::DEFAULT_ENV_FILE;
use super::dotenv::{ParsedEnv, parse_env_str};
use super::environment::{EnvStore, apply_env_overrides};
use super::error::ConfigError;
use super::types::Config;
use super::validation::validate;

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Builds settings from defaults overridden by `store`, then validates.
    pub fn load(store: &dyn EnvStore) -> Result<Self, ConfigError> {
        let builder = apply_env_overrides(ConfigBuilder::new(), store)?;
        let config = builder.build();
        validate(&config)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self)
    }
}

/// Reads a `.env` file and resolves configuration values against it.
///
/// The file is re-read on every call; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    path: PathBuf,
}

impl EnvLoader {
    /// Loader for `.env` next to the crate manifest.
    pub fn new() -> Self {
        Self::with_file(DEFAULT_ENV_FILE)
    }

    /// Relative paths resolve against the crate manifest directory, not the
    /// working directory. Absolute paths are used as given.
    pub fn with_file(file: impl AsRef<Path>) -> Self {
        Self::in_dir(Self::base_dir(), file)
    }

    pub fn in_dir(dir: impl AsRef<Path>, file: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(file),
        }
    }

    pub fn base_dir() -> &'static Path {
        Path::new(env!("CARGO_MANIFEST_DIR"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the file. A missing file yields an empty mapping and a warning.
    pub fn load(&self) -> Result<ParsedEnv, ConfigError> {
        if !self.path.exists() {
            warn!(
                path = %self.path.display(),
                "env file not found; using system environment variables only"
            );
            return Ok(ParsedEnv::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| ConfigError::FileAccess {
            path: self.path.clone(),
            source,
        })?;

        let parsed = parse_env_str(&contents);
        debug!(path = %self.path.display(), entries = parsed.len(), "parsed env file");
        Ok(parsed)
    }

    /// Resolves `key` from the file, then `store`, then `default`.
    ///
    /// An empty value in the file does not shadow the environment. With no
    /// value anywhere, a `required` key is an error; otherwise the default is
    /// returned, or the empty string when there is none.
    pub fn get(
        &self,
        store: &dyn EnvStore,
        key: &str,
        default: Option<&str>,
        required: bool,
    ) -> Result<String, ConfigError> {
        let parsed = self.load()?;

        let from_file = parsed
            .get(key)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let value = match from_file {
            Some(value) => Some(value),
            None => store.var(key)?,
        };

        match (value, default) {
            (Some(value), _) => Ok(value),
            (None, Some(default)) => Ok(default.to_string()),
            (None, None) if required => Err(ConfigError::missing(key)),
            (None, None) => Ok(String::new()),
        }
    }

    pub fn require(&self, store: &dyn EnvStore, key: &str) -> Result<String, ConfigError> {
        self.get(store, key, None, true)
    }

    pub fn get_or(
        &self,
        store: &dyn EnvStore,
        key: &str,
        default: &str,
    ) -> Result<String, ConfigError> {
        self.get(store, key, Some(default), false)
    }

    /// Copies file entries into `store` for keys it does not already hold.
    ///
    /// Returns the number of entries parsed from the file, including those
    /// skipped because the key was already set.
    pub fn setup_environment(&self, store: &mut dyn EnvStore) -> Result<usize, ConfigError> {
        let parsed = self.load()?;

        for (key, value) in &parsed {
            if store.contains(key) {
                debug!(key, "keeping existing environment value");
                continue;
            }
            store.set(key, value)?;
        }

        info!("Loaded {} environment variables from .env file", parsed.len());
        Ok(parsed.len())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new()
    }
}
