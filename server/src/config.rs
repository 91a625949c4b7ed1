//! Process configuration loaded from the environment.
//!
//! `.env` files are honored through `dotenvy` in `main`; everything here
//! reads plain environment variables so tests can drive it directly.

use std::path::PathBuf;

use tokens::Ttl;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_STATIC_DIR: &str = "../client/dist";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Server configuration.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: Ttl,
    pub port: u16,
    pub db_max_connections: u32,
    pub static_dir: PathBuf,
    /// Allow any origin. Intended for local development against a separately
    /// served client bundle.
    pub cors_permissive: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token_ttl", &self.token_ttl)
            .field("port", &self.port)
            .field("db_max_connections", &self.db_max_connections)
            .field("static_dir", &self.static_dir)
            .field("cors_permissive", &self.cors_permissive)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load from `DATABASE_URL`, `JWT_SECRET`, `TOKEN_TTL`, `PORT`,
    /// `DB_MAX_CONNECTIONS`, `STATIC_DIR` and `CORS_PERMISSIVE`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails
    /// to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let token_ttl = match env_nonempty("TOKEN_TTL") {
            Some(raw) => raw
                .parse::<Ttl>()
                .map_err(|e| ConfigError::Invalid { key: "TOKEN_TTL", reason: e.to_string() })?,
            None => Ttl::default(),
        };
        let port = env_parse("PORT", DEFAULT_PORT)?;
        let db_max_connections = env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        let static_dir = env_nonempty("STATIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);

        let cors_permissive = env_bool("CORS_PERMISSIVE").unwrap_or(false);

        Ok(Self { database_url, jwt_secret, token_ttl, port, db_max_connections, static_dir, cors_permissive })
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env_nonempty(key).ok_or(ConfigError::Missing(key))
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_nonempty(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::Invalid { key, reason: e.to_string() }),
        None => Ok(default),
    }
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
