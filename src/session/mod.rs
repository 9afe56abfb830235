//! Session State
//!
//! Keeps each browser session's dashboard state apart from every other
//! session's.
//!
//! ## Lifecycle
//!
//! - **Created** on the session's first prompt submit
//! - **Overwritten** on every later submit
//! - **Discarded** after sitting idle past `idle_timeout`
//!
//! Sessions are identified by the `x-session-id` header. The browser page
//! keeps the id in `sessionStorage`, so a session lasts as long as the tab.

mod store;

pub use store::{SessionConfig, SessionError, SessionId, SessionStore};

/// Header carrying the session id in both directions
pub const SESSION_HEADER: &str = "x-session-id";
