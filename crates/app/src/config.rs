//! Application configuration loaded from environment variables.

/// Default database: a private in-memory SQLite database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Plain
        }
    }
}

/// Runtime configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `DATABASE_URL`: SQLite connection string (default: `"sqlite::memory:"`)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: `1`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `json` for JSON lines, anything else for plain text
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// An in-memory database is private to its connection, so the pool size
    /// is pinned to one for `:memory:` URLs regardless of the setting.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|n| n.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(1);

        let mut config = Self {
            database_url,
            max_connections,
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format: lookup("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or_default(),
        };
        if config.is_in_memory() {
            config.max_connections = 1;
        }
        config
    }

    /// Returns true when the database lives only for the life of the pool.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 1,
            log_level: "info".to_string(),
            log_format: LogFormat::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Plain);
        assert!(config.is_in_memory());
    }

    #[test]
    fn test_empty_environment_matches_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.database_url, Config::default().database_url);
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_file_database_honours_pool_size() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite://sales.db"),
            ("DATABASE_MAX_CONNECTIONS", "5"),
            ("RUST_LOG", "debug"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.database_url, "sqlite://sales.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_in_memory_database_forces_single_connection() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "8"),
        ]);
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn test_invalid_pool_size_falls_back() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite://sales.db"),
            ("DATABASE_MAX_CONNECTIONS", "zero"),
        ]);
        assert_eq!(config.max_connections, 1);

        let config = config_from(&[
            ("DATABASE_URL", "sqlite://sales.db"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]);
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn test_unknown_log_format_is_plain() {
        let config = config_from(&[("LOG_FORMAT", "pretty")]);
        assert_eq!(config.log_format, LogFormat::Plain);
    }
}
