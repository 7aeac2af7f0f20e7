//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the session rules so route handlers can stay focused
//! on protocol translation and cookie plumbing.

pub mod web_session;
