use super::constants::*;
use super::types::{ModelSettings, RuntimeSettings};

pub fn default_user_agent() -> String {
    format!("runlens/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            chat: DEFAULT_CHAT_MODEL.to_string(),
            tools: DEFAULT_TOOL_MODEL.to_string(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}
