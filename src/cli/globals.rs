use crate::shared::{AppConfig, RuntimeConfig};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: AppConfig,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(runtime: RuntimeConfig) -> Self {
        Self {
            config: AppConfig::load(runtime),
        }
    }
}
