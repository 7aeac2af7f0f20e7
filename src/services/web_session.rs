//! Login/logout guard over a host-owned session record.
//!
//! DESIGN
//! ======
//! The session record is allocated, persisted and freed by whatever session
//! layer sits in front of us (see `routes::session` for the cookie-backed
//! one). This module only reads and toggles its `user` field, so every
//! operation takes the record explicitly through the `SessionData`
//! capability and keeps no state of its own.
//!
//! STATES
//! ======
//! inactive (`user` absent) --start--> active (`user` present) --end--> inactive
//!
//! `get_user` is read-only and only valid while active. Calling an operation
//! in the wrong state is an `Unauthenticated` error, never a silent no-op.

use serde::{Deserialize, Serialize};

// =============================================================================
// SESSION RECORD
// =============================================================================

/// Capability over the one field of a host session record we care about.
pub trait SessionData {
    /// Logged-in username, if any.
    fn user(&self) -> Option<&str>;
    /// Overwrite the logged-in username.
    fn set_user(&mut self, user: Option<String>);
}

/// Plain in-memory session record. `Default` is a fresh, logged-out session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user: Option<String>,
}

impl SessionData for SessionRecord {
    fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    fn set_user(&mut self, user: Option<String>) {
        self.user = user;
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Raised when an operation is called in the wrong login state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Unauthenticated {
    message: String,
}

impl Unauthenticated {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Human-readable reason, suitable for returning to the client.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Log `username` in.
///
/// # Errors
///
/// Returns [`Unauthenticated`] if someone is already logged in on this
/// session, or if `username` is blank. The session is left untouched.
pub fn start<S>(session: &mut S, username: impl Into<String>) -> Result<(), Unauthenticated>
where
    S: SessionData + ?Sized,
{
    has_to_be::inactive(session)?;

    let username = username.into();
    if username.trim().is_empty() {
        return Err(Unauthenticated::new("Username must not be empty"));
    }

    session.set_user(Some(username));
    Ok(())
}

/// Return the logged-in username.
///
/// # Errors
///
/// Returns [`Unauthenticated`] if nobody is logged in.
pub fn get_user<S>(session: &S) -> Result<&str, Unauthenticated>
where
    S: SessionData + ?Sized,
{
    session.user().ok_or_else(not_logged_in)
}

/// Log the current user out.
///
/// # Errors
///
/// Returns [`Unauthenticated`] if nobody is logged in.
pub fn end<S>(session: &mut S) -> Result<(), Unauthenticated>
where
    S: SessionData + ?Sized,
{
    has_to_be::active(session)?;
    session.set_user(None);
    Ok(())
}

fn not_logged_in() -> Unauthenticated {
    Unauthenticated::new("Not logged in!")
}

// =============================================================================
// PRECONDITIONS
// =============================================================================

/// Pure state checks gating the operations above.
mod has_to_be {
    use super::{SessionData, Unauthenticated, not_logged_in};

    pub(super) fn active<S: SessionData + ?Sized>(session: &S) -> Result<(), Unauthenticated> {
        match session.user() {
            Some(_) => Ok(()),
            None => Err(not_logged_in()),
        }
    }

    pub(super) fn inactive<S: SessionData + ?Sized>(session: &S) -> Result<(), Unauthenticated> {
        match session.user() {
            Some(user) => Err(Unauthenticated::new(format!("Not logged out! Currently logged in as {user}"))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "web_session_test.rs"]
mod tests;
