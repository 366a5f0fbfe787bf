use common::config::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Leaderboard server; `None` plays offline and records nothing.
    pub address: Option<String>,
    pub connect_timeout_ms: u32,
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(address) = &self.address
            && address.trim().is_empty()
        {
            return Err("server address must not be empty if provided".to_string());
        }
        if self.connect_timeout_ms == 0 {
            return Err("connect_timeout_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: Some("http://[::1]:5001".to_string()),
            connect_timeout_ms: 2000,
        }
    }
}
