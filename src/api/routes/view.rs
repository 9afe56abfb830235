//! View Routes
//!
//! One render cycle per request, for every interaction except submit.
//!
//! - GET /api/v1/view - Render from query parameters
//! - POST /api/v1/view - Render from a JSON body (long drafts)

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ViewRequest, ViewResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

use super::session_id_from;

/// GET /api/v1/view
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(req): Query<ViewRequest>,
) -> ApiResult<Json<ViewResponse>> {
    render_view(&state, &headers, req).await.map(Json)
}

/// POST /api/v1/view
pub async fn post_view(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ViewRequest>,
) -> ApiResult<Json<ViewResponse>> {
    render_view(&state, &headers, req).await.map(Json)
}

/// Render for the caller's session without changing it
///
/// An unknown session id renders as a session with no state.
pub async fn render_view(
    state: &AppState,
    headers: &HeaderMap,
    req: ViewRequest,
) -> ApiResult<ViewResponse> {
    let (widgets, interaction) = req.into_parts()?;

    let (session_id, session) = match session_id_from(headers) {
        Some(id) => match state.sessions.get(&id).await {
            Some(session) => (Some(id), Some(session)),
            None => {
                tracing::debug!(session_id = %id, "Unknown session, rendering fresh");
                (None, None)
            }
        },
        None => (None, None),
    };

    let rendered = state.renderer.render(session, widgets, interaction);

    Ok(ViewResponse {
        session_id,
        view: rendered.view,
    })
}
