use super::types::{Config, ModelSettings, RuntimeSettings};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) runtime: RuntimeSettings,
    pub(super) models: ModelSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            runtime: RuntimeSettings::default(),
            models: ModelSettings::default(),
        }
    }

    pub fn with_runtime<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut RuntimeSettings),
    {
        update(&mut self.runtime);
        self
    }

    pub fn with_models<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ModelSettings),
    {
        update(&mut self.models);
        self
    }

    pub fn build(self) -> Config {
        Config {
            runtime: self.runtime,
            models: self.models,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
