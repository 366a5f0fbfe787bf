use std::net::SocketAddr;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer, config_path_near_executable};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "tictactoe_server_config.yaml";
pub const DEFAULT_LISTEN_ADDRESS: &str = "[::1]:5001";
pub const DEFAULT_DATA_FILE: &str = "tictactoe_wins.yaml";

pub fn get_config_manager(path: Option<&str>) -> ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> {
    let path = path
        .map(str::to_string)
        .unwrap_or_else(|| config_path_near_executable(CONFIG_FILE_NAME));
    ConfigManager::from_yaml_file(&path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub listen_address: String,
    /// Where win counts are persisted; `None` keeps them in memory only.
    pub data_file: Option<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.listen_address
            .parse()
            .map_err(|e| format!("Invalid listen address '{}': {}", self.listen_address, e))
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        if let Some(ref data_file) = self.data_file
            && data_file.trim().is_empty()
        {
            return Err("data_file must not be blank".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            data_file: Some(DEFAULT_DATA_FILE.to_string()),
        }
    }
}
