use super::constants::API_KEY_VAR;
use super::error::ConfigError;
use super::types::Config;

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.runtime.api_key.trim().is_empty() {
        return Err(ConfigError::missing(API_KEY_VAR));
    }

    if config.runtime.base_url.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "base_url".to_string(),
            message: "cannot be empty".to_string(),
        });
    }

    if config.models.max_steps == 0 {
        return Err(ConfigError::InvalidValue {
            key: "max_steps".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    Ok(())
}
