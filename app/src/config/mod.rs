mod probe;

pub use probe::ProbeConfig;

use kit::Config;

/// Register all application configs
pub fn register_all() {
    Config::register(ProbeConfig::from_env());
}
