use super::*;
use crate::config::MIN_SECRET_LEN;

fn config_with_secret(secret: Option<Vec<u8>>) -> Config {
    Config { port: 3000, secret, cookie: CookieSettings::default() }
}

#[test]
fn from_config_without_secret_generates_key() {
    let state = AppState::from_config(&config_with_secret(None)).unwrap();
    assert_eq!(state.key.master().len(), MIN_SECRET_LEN);
    assert_eq!(state.cookie.name, "session");
}

#[test]
fn generated_keys_differ_between_states() {
    let a = AppState::from_config(&config_with_secret(None)).unwrap();
    let b = AppState::from_config(&config_with_secret(None)).unwrap();
    assert_ne!(a.key.master(), b.key.master());
}

#[test]
fn same_secret_gives_same_key() {
    let secret = vec![7u8; MIN_SECRET_LEN];
    let a = AppState::from_config(&config_with_secret(Some(secret.clone()))).unwrap();
    let b = AppState::from_config(&config_with_secret(Some(secret))).unwrap();
    assert_eq!(a.key.master(), b.key.master());
}

#[test]
fn short_secret_is_rejected() {
    let result = AppState::from_config(&config_with_secret(Some(vec![1u8; 10])));
    assert!(matches!(result, Err(ConfigError::SecretTooShort(10))));
}

#[test]
fn key_from_ref_clones_state_key() {
    let state = AppState::from_config(&config_with_secret(None)).unwrap();
    let key = Key::from_ref(&state);
    assert_eq!(key.master(), state.key.master());
}
