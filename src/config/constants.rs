pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_BASE_URL: &str = "https://api.dedaluslabs.ai";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CHAT_MODEL: &str = "openai/gpt-5-mini";
pub const DEFAULT_TOOL_MODEL: &str = "openai/gpt-5";
pub const DEFAULT_MAX_STEPS: u32 = 10;

pub const API_KEY_VAR: &str = "DEDALUS_API_KEY";
pub const BASE_URL_VAR: &str = "DEDALUS_BASE_URL";
pub const TIMEOUT_VAR: &str = "RUNLENS_TIMEOUT_SECS";
pub const MODEL_VAR: &str = "RUNLENS_MODEL";
pub const TOOL_MODEL_VAR: &str = "RUNLENS_TOOL_MODEL";
pub const MAX_STEPS_VAR: &str = "RUNLENS_MAX_STEPS";
