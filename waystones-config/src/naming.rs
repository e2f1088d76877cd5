use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Name that is never persisted and is regenerated every time the waystone loads.
pub const RANDOM_NAME_SENTINEL: &str = "%RANDOM%";

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NameGenerationMode {
    /// Only procedurally generated names.
    RandomOnly,
    /// Unused custom names first, procedural names once they run out.
    #[default]
    PresetFirst,
    /// Only custom names, numbered when they repeat.
    PresetOnly,
    /// Custom and procedural names at random.
    Mixed,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NameGenerationConfig {
    pub mode: NameGenerationMode,
    pub custom_names: Vec<String>,
}

impl NameGenerationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.custom_names {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "name_generation.custom_names must not contain blank names".to_string(),
                ));
            }
            if name == RANDOM_NAME_SENTINEL {
                return Err(ConfigError::Invalid(format!(
                    "{RANDOM_NAME_SENTINEL} is reserved and can't be used as a custom name"
                )));
            }
        }
        if self.mode == NameGenerationMode::PresetOnly && self.custom_names.is_empty() {
            log::warn!(
                "Name generation mode is preset_only but no custom names are configured, procedural names will be used"
            );
        }
        Ok(())
    }
}
