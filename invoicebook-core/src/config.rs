use std::env;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL (or DSN) must be set")]
    MissingDatabaseUrl,

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Deployment environment name (`dev`, `prod`, ...)
    pub environment: String,

    /// Address the HTTP server binds to
    pub http_server_addr: String,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// Call `dotenv().ok()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "dev".to_string());

        let http_server_addr = lookup("HTTP_SERVER_ADDRESS")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DSN"))
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS",
                value: raw,
            })?,
            None => 10,
        };

        Ok(Config {
            environment,
            http_server_addr,
            database_url,
            max_connections,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "prod"
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_production() {
            "info"
        } else {
            "debug"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/invoices",
        )]))
        .unwrap();

        assert_eq!(config.environment, "dev");
        assert_eq!(config.http_server_addr, "0.0.0.0:3000");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.default_log_filter(), "debug");
    }

    #[test]
    fn test_dsn_fallback() {
        let config = Config::from_lookup(lookup_from(&[
            ("DSN", "postgres://db/legacy"),
            ("ENVIRONMENT", "prod"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://db/legacy");
        assert!(config.is_production());
        assert_eq!(config.default_log_filter(), "info");
    }

    #[test]
    fn test_missing_database_url() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingDatabaseUrl)));
    }

    #[test]
    fn test_invalid_max_connections() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/invoices"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "DATABASE_MAX_CONNECTIONS", .. })
        ));
    }
}
