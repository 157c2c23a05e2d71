//! Configuration: `.env` loading plus typed config structs
//!
//! ```rust,ignore
//! use crud_kit::{Config, ServerConfig};
//!
//! Config::init(std::path::Path::new("."));
//! let server = Config::get::<ServerConfig>().unwrap_or_default();
//! ```

pub mod env;
pub mod providers;
pub mod repository;

pub use env::{env, load_dotenv, Environment};
pub use providers::{AppConfig, ServerConfig, ServerConfigBuilder};

use std::path::Path;

/// Main Config facade for accessing configuration
pub struct Config;

impl Config {
    /// Load `.env` files from `project_root` and register the default configs
    ///
    /// Call once at startup, before building the server.
    pub fn init(project_root: &Path) -> Environment {
        let env = env::load_dotenv(project_root);

        repository::register(AppConfig::from_env());
        repository::register(ServerConfig::from_env());

        env
    }

    /// Get a typed config struct from the repository
    pub fn get<T: std::any::Any + Send + Sync + Clone + 'static>() -> Option<T> {
        repository::get::<T>()
    }

    /// Register a custom config struct
    pub fn register<T: std::any::Any + Send + Sync + 'static>(config: T) {
        repository::register(config);
    }
}
