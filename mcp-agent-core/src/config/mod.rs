pub mod app;
pub mod error;
pub mod loader;
pub mod runtime;
pub mod server;

/// Default config file path - can be overridden via CLI argument
pub const CONFIG_PATH: &str = "config/agent.toml";

pub use app::AppConfig;
pub use error::ConfigError;
pub use loader::{ensure_env_loaded, load_config, parse_config};
pub use runtime::{DebugOptions, RuntimeConfig};
pub use server::ServerConfig;
