//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod page;
pub mod prompt;
pub mod view;

use axum::http::HeaderMap;

use crate::session::SESSION_HEADER;

/// Session id sent by the caller, if any
pub(crate) fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
