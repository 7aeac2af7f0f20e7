//! Session routes: login, current user, logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the host session layer the guard in `services::web_session`
//! expects: it allocates a record per user agent, persists it across
//! requests, and hands it to the guard. The record lives in a private
//! (encrypted + authenticated) cookie, so nothing is stored server-side and
//! clients can neither read nor forge it.
//!
//! LIMITS
//! ======
//! User agents only guarantee cookies up to 4096 bytes (name + value). A
//! record whose encrypted cookie would exceed that is refused instead of
//! handed to a browser that would silently drop it.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::config::CookieSettings;
use crate::services::web_session::{self, SessionData, SessionRecord, Unauthenticated};
use crate::state::AppState;

/// Largest `name=value` pair user agents are required to store.
pub const MAX_COOKIE_BYTES: usize = 4096;

// `PrivateCookieJar` value layout: base64(nonce || ciphertext || tag).
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionRouteError {
    #[error(transparent)]
    Unauthenticated(#[from] Unauthenticated),
    #[error(transparent)]
    BadBody(#[from] JsonRejection),
    #[error("session cookie too large ({len} bytes, max {MAX_COOKIE_BYTES})")]
    CookieTooLarge { len: usize },
}

pub(crate) fn session_error_to_status(err: &SessionRouteError) -> StatusCode {
    match err {
        SessionRouteError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        SessionRouteError::BadBody(rejection) => rejection.status(),
        SessionRouteError::CookieTooLarge { .. } => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for SessionRouteError {
    fn into_response(self) -> Response {
        let status = session_error_to_status(&self);
        let message = match &self {
            Self::Unauthenticated(e) => {
                tracing::debug!(error = %e, "unauthenticated session request");
                e.message().to_owned()
            }
            Self::BadBody(rejection) => rejection.body_text(),
            Self::CookieTooLarge { len } => {
                tracing::warn!(len, "session cookie over size limit; login refused");
                "Session too large to store in a cookie".to_owned()
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

// =============================================================================
// COOKIE SESSION EXTRACTOR
// =============================================================================

/// Session record resolved from the private session cookie.
///
/// Missing, tampered or undecodable cookies resolve to a fresh logged-out
/// record. Handlers that change the record must return [`CookieSession::commit`]
/// in their response for the change to reach the client.
pub struct CookieSession {
    jar: PrivateCookieJar,
    record: SessionRecord,
    settings: CookieSettings,
}

impl FromRequestParts<AppState> for CookieSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::from_headers(&parts.headers, state.key.clone());
        let record = read_record(&jar, &state.cookie.name);
        Ok(Self { jar, record, settings: state.cookie.clone() })
    }
}

impl SessionData for CookieSession {
    fn user(&self) -> Option<&str> {
        self.record.user()
    }

    fn set_user(&mut self, user: Option<String>) {
        self.record.set_user(user);
    }
}

impl CookieSession {
    /// Write the record back: logged-in records are re-encrypted into the
    /// cookie, logged-out ones remove it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionRouteError::CookieTooLarge`] if the encrypted cookie
    /// would not fit in [`MAX_COOKIE_BYTES`].
    pub fn commit(self) -> Result<PrivateCookieJar, SessionRouteError> {
        let Self { jar, record, settings } = self;
        let Some(user) = record.user else {
            return Ok(jar.remove(Cookie::build((settings.name, "")).path("/")));
        };

        let value = serde_json::json!({ "user": user }).to_string();
        let len = settings.name.len() + 1 + encrypted_len(value.len());
        if len > MAX_COOKIE_BYTES {
            return Err(SessionRouteError::CookieTooLarge { len });
        }

        let cookie = Cookie::build((settings.name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(settings.secure);
        Ok(jar.add(cookie))
    }
}

/// Length of a private cookie value holding `plain_len` bytes of plaintext.
pub(crate) fn encrypted_len(plain_len: usize) -> usize {
    (NONCE_LEN + plain_len + TAG_LEN).div_ceil(3) * 4
}

pub(crate) fn read_record(jar: &PrivateCookieJar, name: &str) -> SessionRecord {
    let Some(cookie) = jar.get(name) else {
        return SessionRecord::default();
    };

    match serde_json::from_str::<SessionRecord>(cookie.value()) {
        Ok(record) if record.user.as_deref().is_some_and(|u| u.trim().is_empty()) => {
            tracing::warn!("session cookie carried an empty user; treating as logged out");
            SessionRecord::default()
        }
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "malformed session cookie; treating as logged out");
            SessionRecord::default()
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub username: String,
}

/// `POST /api/session/login`: log the given username in on this session.
pub async fn login(
    mut session: CookieSession,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(PrivateCookieJar, StatusCode), SessionRouteError> {
    let Json(body) = body?;
    web_session::start(&mut session, body.username)?;
    let user = web_session::get_user(&session)?.to_owned();
    let jar = session.commit()?;
    tracing::info!(user = %user, "session started");
    Ok((jar, StatusCode::NO_CONTENT))
}

/// `GET /api/session/me`: return the logged-in username.
pub async fn me(session: CookieSession) -> Result<Json<MeResponse>, SessionRouteError> {
    let username = web_session::get_user(&session)?.to_owned();
    Ok(Json(MeResponse { username }))
}

/// `POST /api/session/logout`: log out and clear the cookie.
pub async fn logout(mut session: CookieSession) -> Result<(PrivateCookieJar, StatusCode), SessionRouteError> {
    let user = web_session::get_user(&session)?.to_owned();
    web_session::end(&mut session)?;
    tracing::info!(user = %user, "session ended");
    Ok((session.commit()?, StatusCode::NO_CONTENT))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
