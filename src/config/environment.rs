use std::collections::HashMap;
use std::env;

use super::builder::ConfigBuilder;
use super::constants::{
    API_KEY_VAR, BASE_URL_VAR, MAX_STEPS_VAR, MODEL_VAR, TIMEOUT_VAR, TOOL_MODEL_VAR,
};
use super::error::ConfigError;

/// Key/value view of the environment the loader reads from and fills in.
pub trait EnvStore {
    fn var(&self, key: &str) -> Result<Option<String>, ConfigError>;

    fn contains(&self, key: &str) -> bool;

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn var(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match env::var(key) {
            Ok(val) => Ok(Some(val)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                key: key.to_string(),
            }),
        }
    }

    fn contains(&self, key: &str) -> bool {
        env::var_os(key).is_some()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        if key.is_empty() || key.contains(['=', '\0']) || value.contains('\0') {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "cannot be stored in the process environment".to_string(),
            });
        }
        // SAFETY: callers write the process environment only before any other
        // thread is spawned; the CLI does so ahead of building the tokio runtime.
        unsafe { env::set_var(key, value) };
        Ok(())
    }
}

/// In-memory environment, used in place of the process environment in tests
/// and embedding callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

impl EnvStore for MemoryEnv {
    fn var(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self.vars.get(key).cloned())
    }

    fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.vars.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn apply_env_overrides(
    mut builder: ConfigBuilder,
    store: &dyn EnvStore,
) -> Result<ConfigBuilder, ConfigError> {
    if let Some(api_key) = env_string(store, API_KEY_VAR)? {
        builder = builder.with_runtime(|runtime| runtime.api_key = api_key);
    }

    if let Some(base_url) = env_string(store, BASE_URL_VAR)? {
        builder = builder.with_runtime(|runtime| runtime.base_url = base_url);
    }

    if let Some(timeout) = env_u64(store, TIMEOUT_VAR)? {
        builder = builder.with_runtime(|runtime| runtime.timeout_secs = timeout);
    }

    if let Some(model) = env_string(store, MODEL_VAR)? {
        builder = builder.with_models(|models| models.chat = model);
    }

    if let Some(model) = env_string(store, TOOL_MODEL_VAR)? {
        builder = builder.with_models(|models| models.tools = model);
    }

    if let Some(max_steps) = env_u32(store, MAX_STEPS_VAR)? {
        builder = builder.with_models(|models| models.max_steps = max_steps);
    }

    Ok(builder)
}

/// Reads `key`, treating blank values as unset.
pub fn env_string(store: &dyn EnvStore, key: &str) -> Result<Option<String>, ConfigError> {
    Ok(store.var(key)?.filter(|value| !value.trim().is_empty()))
}

pub fn env_u64(store: &dyn EnvStore, key: &str) -> Result<Option<u64>, ConfigError> {
    env_string(store, key)?
        .map(|value| {
            value.trim().parse::<u64>().map_err(|err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("'{value}' is not a valid u64 ({err})"),
            })
        })
        .transpose()
}

pub fn env_u32(store: &dyn EnvStore, key: &str) -> Result<Option<u32>, ConfigError> {
    env_string(store, key)?
        .map(|value| {
            value.trim().parse::<u32>().map_err(|err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("'{value}' is not a valid u32 ({err})"),
            })
        })
        .transpose()
}
