#[derive(Debug, Clone)]
pub struct Config {
    pub runtime: RuntimeSettings,
    pub models: ModelSettings,
}

/// Connection settings for the hosted agent runtime.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// Model for plain prompts.
    pub chat: String,
    /// Model for runs that bind tools.
    pub tools: String,
    pub max_steps: u32,
}
