//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! There is no server-side session store: the only shared pieces are the
//! cookie encryption key and the cookie attributes. Each request carries its
//! own session record inside its private cookie.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::config::{Config, ConfigError, CookieSettings};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; `Key` and `CookieSettings` are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub key: Key,
    pub cookie: CookieSettings,
}

impl AppState {
    #[must_use]
    pub fn new(key: Key, cookie: CookieSettings) -> Self {
        Self { key, cookie }
    }

    /// Build state from loaded config, generating a throwaway key when no
    /// secret is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SecretTooShort`] if the secret cannot be used as
    /// a cookie key.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let key = match &config.secret {
            Some(secret) => Key::try_from(secret.as_slice()).map_err(|_| ConfigError::SecretTooShort(secret.len()))?,
            None => {
                tracing::warn!("SESSION_SECRET not set; using a random key, sessions will not survive restart");
                Key::generate()
            }
        };
        Ok(Self::new(key, config.cookie.clone()))
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
