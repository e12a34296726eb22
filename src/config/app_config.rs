use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where user records live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `in_memory` or `postgres`
    pub backend: String,
    /// Falls back to the `DATABASE_URL` environment variable
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

/// Prometheus metrics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "in_memory".to_string(),
            database_url: None,
            max_connections: 5,
            run_migrations: true,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl StorageSettings {
    /// Configured database URL, or `DATABASE_URL` from the environment
    pub fn resolve_database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }
}

impl AppConfig {
    /// Load from `config/default`, `config/local` and `APP__*` variables.
    /// Each layer only needs the keys it overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(app_environment())
    }

    fn load_with_env(env: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }
}

fn app_environment() -> config::Environment {
    config::Environment::with_prefix("APP")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.storage.backend, "in_memory");
        assert!(config.storage.run_migrations);
        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.path, "/metrics");
    }

    fn load_with_vars(vars: &[(&str, &str)]) -> AppConfig {
        let source = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        AppConfig::load_with_env(app_environment().source(Some(source))).unwrap()
    }

    #[test]
    fn test_single_env_key_overrides_defaults() {
        let config = load_with_vars(&[("APP__SERVER__PORT", "9000")]);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.backend, "in_memory");
    }

    #[test]
    fn test_env_database_url_keeps_other_storage_settings() {
        let config = load_with_vars(&[
            ("APP__STORAGE__BACKEND", "postgres"),
            ("APP__STORAGE__DATABASE_URL", "postgres://db/ledger"),
        ]);

        assert_eq!(config.storage.backend, "postgres");
        assert_eq!(config.storage.database_url.as_deref(), Some("postgres://db/ledger"));
        assert_eq!(config.storage.max_connections, 5);
        assert!(config.storage.run_migrations);
    }

    #[test]
    fn test_env_without_app_keys_yields_defaults() {
        let config = load_with_vars(&[("OTHER__SERVER__PORT", "1")]);

        assert_eq!(config.server.port, 8080);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let source = [("APP__SERVER__PORT".to_string(), "not-a-port".to_string())]
            .into_iter()
            .collect();

        assert!(AppConfig::load_with_env(app_environment().source(Some(source))).is_err());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "server": {"host": "127.0.0.1", "port": 9000},
                "logging": {"level": "debug", "format": "json"},
                "storage": {"backend": "postgres", "database_url": "postgres://db/ledger"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.storage.max_connections, 5);
        assert_eq!(
            config.storage.resolve_database_url().as_deref(),
            Some("postgres://db/ledger")
        );
        assert!(config.metrics.enabled);
    }
}
