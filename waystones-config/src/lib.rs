use std::{
    fs, io,
    path::{Path, PathBuf},
};

use logging::LoggingConfig;
use naming::NameGenerationConfig;
use ownership::OwnershipConfig;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

pub mod logging;
pub mod naming;
pub mod ownership;

pub use naming::{NameGenerationMode, RANDOM_NAME_SENTINEL};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Couldn't read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Couldn't parse configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Couldn't serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Serialize, Default, Debug, Clone)]
#[serde(default)]
pub struct WaystonesConfig {
    pub name_generation: NameGenerationConfig,
    pub ownership: OwnershipConfig,
    pub logging: LoggingConfig,
}

pub trait LoadConfiguration {
    /// Reads the configuration from `config_dir`, writing the defaults there
    /// first if the file does not exist yet.
    fn load(config_dir: &Path) -> Result<Self, ConfigError>
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let path = config_dir.join(Self::get_path());

        let config = if path.exists() {
            let file_content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&file_content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            let content = Self::default();
            let serialized = toml::to_string(&content)?;

            if let Err(err) = fs::create_dir_all(config_dir).and_then(|()| fs::write(&path, serialized))
            {
                log::warn!(
                    "Couldn't write default config to {}. Reason: {err}. This is probably caused by a config update. Just delete the old config and restart.",
                    path.display()
                );
            }

            content
        };

        config.validate()?;
        Ok(config)
    }

    fn get_path() -> &'static Path;

    fn validate(&self) -> Result<(), ConfigError>;
}

impl LoadConfiguration for WaystonesConfig {
    fn get_path() -> &'static Path {
        Path::new("waystones.toml")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.name_generation.validate()
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use log::LevelFilter;
    use temp_dir::TempDir;

    use crate::{ConfigError, LoadConfiguration, NameGenerationMode, WaystonesConfig};

    #[test]
    fn writes_defaults_when_missing() {
        let temp_dir = TempDir::new().unwrap();

        let config = WaystonesConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.name_generation.mode, NameGenerationMode::PresetFirst);
        assert!(config.ownership.creative_bypass);
        assert!(config.ownership.restrict_rename_to_owner);

        let written = fs::read_to_string(temp_dir.path().join("waystones.toml")).unwrap();
        assert!(written.contains("[name_generation]"));
        assert!(written.contains("preset_first"));

        // The written defaults load back unchanged.
        let again = WaystonesConfig::load(temp_dir.path()).unwrap();
        assert_eq!(again.name_generation.mode, NameGenerationMode::PresetFirst);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("waystones.toml"),
            r#"
[name_generation]
mode = "preset_only"
custom_names = ["Spawn", "Old Mill"]

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = WaystonesConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.name_generation.mode, NameGenerationMode::PresetOnly);
        assert_eq!(config.name_generation.custom_names, ["Spawn", "Old Mill"]);
        assert_eq!(config.logging.level, LevelFilter::Debug);
        assert!(config.logging.enabled);
        assert!(config.ownership.creative_bypass);
    }

    #[test]
    fn reserved_custom_name_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("waystones.toml"),
            "[name_generation]\ncustom_names = [\"%RANDOM%\"]\n",
        )
        .unwrap();

        assert!(matches!(
            WaystonesConfig::load(temp_dir.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("waystones.toml"),
            "[name_generation\nmode = 3",
        )
        .unwrap();

        assert!(matches!(
            WaystonesConfig::load(temp_dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
