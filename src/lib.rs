//! Login/logout guard over an externally owned web session record.
//!
//! The guard itself lives in [`services::web_session`]: `start`, `get_user`
//! and `end` toggle the `user` field of any [`SessionData`] record and reject
//! out-of-order calls with [`Unauthenticated`]. The rest of the crate is a
//! small Axum host that keeps the record in a private cookie.

pub mod config;
pub mod routes;
pub mod services;
pub mod state;

pub use services::web_session::{SessionData, SessionRecord, Unauthenticated, end, get_user, start};
