use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Used unless `RUST_LOG` is set.
    pub level: LevelFilter,
    pub timestamp: bool,
    pub color: bool,
    pub threads: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LevelFilter::Info,
            timestamp: true,
            color: true,
            threads: false,
        }
    }
}
