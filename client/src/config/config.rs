use common::Username;
use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer, config_path_near_executable};
use serde::{Deserialize, Serialize};

use super::{AiSpeed, ServerConfig};

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub fn get_config_manager(path: Option<&str>) -> ClientConfigManager {
    let path = path
        .map(str::to_string)
        .unwrap_or_else(|| config_path_near_executable(CONFIG_FILE_NAME));
    ConfigManager::from_yaml_file(&path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    /// Display name wins are recorded under; unset means wins are not recorded.
    pub username: Option<String>,
    #[serde(default)]
    pub ai_speed: AiSpeed,
}

impl Config {
    pub fn username(&self) -> Option<Username> {
        self.username.as_deref().and_then(|name| Username::parse(name).ok())
    }

    /// Stores a trimmed display name; a blank name clears it.
    pub fn set_username(&mut self, raw: &str) -> Result<Option<Username>, String> {
        if raw.trim().is_empty() {
            self.username = None;
            return Ok(None);
        }
        let name = Username::parse(raw)?;
        self.username = Some(name.to_string());
        Ok(Some(name))
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        if let Some(ref name) = self.username {
            let parsed = Username::parse(name)?;
            if parsed.as_str() != name {
                return Err("username must not have leading or trailing whitespace".to_string());
            }
        }
        Ok(())
    }
}
