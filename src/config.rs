//! Environment-driven server configuration.
//!
//! Read once at startup in `main`. Values come from the process environment,
//! optionally seeded from a `.env` file by `dotenvy`.

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_COOKIE_NAME: &str = "session";

/// Minimum secret length accepted by `axum_extra::extract::cookie::Key`.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes (got {0})")]
    SecretTooShort(usize),
}

/// Session cookie attributes shared by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self { name: DEFAULT_COOKIE_NAME.to_owned(), secure: false }
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    /// Raw key material for cookie encryption. `None` means generate one per
    /// process, which logs everyone out on restart.
    pub secret: Option<Vec<u8>>,
    pub cookie: CookieSettings,
}

impl Config {
    /// Load from `PORT`, `SESSION_SECRET`, `SESSION_COOKIE_NAME`, `COOKIE_SECURE`.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is not a valid port or `SESSION_SECRET` is
    /// set but too short.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let secret = match lookup("SESSION_SECRET").filter(|s| !s.is_empty()) {
            Some(raw) if raw.len() < MIN_SECRET_LEN => return Err(ConfigError::SecretTooShort(raw.len())),
            Some(raw) => Some(raw.into_bytes()),
            None => None,
        };

        let name = lookup("SESSION_COOKIE_NAME")
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_owned());
        let secure = lookup("COOKIE_SECURE")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(false);

        Ok(Self { port, secret, cookie: CookieSettings { name, secure } })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("cookie", &self.cookie)
            .finish()
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
