use std::path::PathBuf;

/// Errors raised while reading the server configuration.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {key}: '{value}'")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JSON file with the widget catalog. The built-in clinic catalog is
    /// served when unset.
    pub widget_catalog_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout_secs: 30,
            widget_catalog_path: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `WIDGET_CATALOG_PATH`  | built-in catalog           |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError {
                key: "PORT",
                value: raw,
            })?,
            Err(_) => defaults.port,
        };

        let cors_origins = match std::env::var("CORS_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => defaults.cors_origins,
        };

        let request_timeout_secs = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError {
                key: "REQUEST_TIMEOUT_SECS",
                value: raw,
            })?,
            Err(_) => defaults.request_timeout_secs,
        };

        let widget_catalog_path = std::env::var("WIDGET_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            widget_catalog_path,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.local , ,http://b.local"),
            vec!["http://a.local".to_string(), "http://b.local".to_string()]
        );
    }

    #[test]
    fn default_serves_builtin_catalog() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert!(config.widget_catalog_path.is_none());
    }
}
