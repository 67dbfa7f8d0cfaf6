// Application configuration loaded once at startup
// The JWT secret is injected explicitly into the token codec from here,
// never read from the environment during request handling.

use std::env;

/// Errors raised while reading configuration from the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Process-wide configuration, immutable after startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Token lifetime in seconds. Expiry forces re-login; there is no refresh.
    pub token_ttl_seconds: i64,
}

/// Default token lifetime: 24 hours
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 86_400;

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; `HOST`, `PORT` and
    /// `TOKEN_TTL_SECONDS` fall back to sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingVar("JWT_SECRET".to_string()))?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port_raw = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let port = port_raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            name: "PORT".to_string(),
            value: port_raw.clone(),
        })?;

        let ttl_raw = env::var("TOKEN_TTL_SECONDS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_TTL_SECONDS.to_string());
        let token_ttl_seconds = ttl_raw.parse::<i64>().map_err(|_| ConfigError::InvalidValue {
            name: "TOKEN_TTL_SECONDS".to_string(),
            value: ttl_raw.clone(),
        })?;

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            token_ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test covers every from_env case: the cases mutate shared process
    // environment variables, so they must run sequentially on one thread.
    #[test]
    fn from_env_requires_and_defaults() {
        let saved_database_url = std::env::var("DATABASE_URL").ok();
        std::env::remove_var("DATABASE_URL");
        std::env::set_var("JWT_SECRET", "test_secret");
        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::MissingVar(ref v)) if v == "DATABASE_URL"));

        std::env::set_var("DATABASE_URL", "postgresql://localhost/budget_db");
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("TOKEN_TTL_SECONDS");

        let config = AppConfig::from_env().expect("config should load");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_seconds, DEFAULT_TOKEN_TTL_SECONDS);

        std::env::set_var("PORT", "not-a-port");
        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { ref name, .. }) if name == "PORT"));
        std::env::remove_var("PORT");

        match saved_database_url {
            Some(url) => std::env::set_var("DATABASE_URL", url),
            None => std::env::remove_var("DATABASE_URL"),
        }
    }
}
