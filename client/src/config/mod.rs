mod ai_speed;
mod config;
mod server_config;

pub use ai_speed::AiSpeed;
pub use config::{ClientConfigManager, Config, get_config_manager};
pub use server_config::ServerConfig;
