use kit::env;

/// Startup self-probe configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Issue the probe at all (`APP_STARTUP_PROBE`)
    pub enabled: bool,
}

impl ProbeConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        Self {
            enabled: env("APP_STARTUP_PROBE", true),
        }
    }

    /// URL to probe: this service's own list endpoint
    pub fn target(&self, port: u16) -> String {
        format!("http://localhost:{}/users", port)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_defaults_to_own_list_endpoint() {
        let config = ProbeConfig { enabled: true };
        assert_eq!(config.target(8081), "http://localhost:8081/users");
        assert_eq!(config.target(9090), "http://localhost:9090/users");
    }
}
