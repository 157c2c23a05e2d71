use std::path::Path;

/// Deployment environment, read from `APP_ENV`
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Local,
    Development,
    Production,
    Testing,
    Custom(String),
}

impl Environment {
    /// Detect environment from APP_ENV or default to Local
    pub fn detect() -> Self {
        Self::parse(std::env::var("APP_ENV").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            Some("development") => Self::Development,
            Some("testing") => Self::Testing,
            Some("local") | None => Self::Local,
            Some(other) => Self::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
            Self::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Load environment variables from .env files
///
/// Precedence (later overrides earlier): `.env`, `.env.local`, `.env.{env}`,
/// `.env.{env}.local`, then real process variables. dotenvy never overwrites
/// an existing variable, so files are loaded most specific first.
pub fn load_dotenv(project_root: &Path) -> Environment {
    let env = Environment::detect();
    let candidates = [
        format!(".env.{}.local", env),
        format!(".env.{}", env),
        ".env.local".to_string(),
        ".env".to_string(),
    ];

    for name in candidates {
        // Missing files are the common case.
        let _ = dotenvy::from_path(project_root.join(name));
    }

    env
}

/// Get an environment variable with a default value
///
/// Unset or unparseable values fall back to `default`.
///
/// # Example
/// ```rust,ignore
/// let port: u16 = env("SERVER_PORT", 8081);
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        assert_eq!(Environment::parse(None), Environment::Local);
        assert_eq!(Environment::parse(Some("production")), Environment::Production);
        assert_eq!(
            Environment::parse(Some("qa")),
            Environment::Custom("qa".to_string())
        );
    }

    #[test]
    fn test_load_dotenv_reads_env_file() {
        let root = std::env::temp_dir().join(format!("crud-kit-dotenv-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join(".env"), "CRUD_KIT_TEST_DOTENV_PORT=9123\n").unwrap();

        load_dotenv(&root);
        let port: u16 = env("CRUD_KIT_TEST_DOTENV_PORT", 0);
        assert_eq!(port, 9123);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_env_default_when_unset() {
        let port: u16 = env("CRUD_KIT_TEST_SURELY_UNSET_PORT", 8081);
        assert_eq!(port, 8081);
    }
}
