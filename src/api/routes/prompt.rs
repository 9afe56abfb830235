//! Prompt Routes
//!
//! The submit action of the system prompt panel.
//!
//! - POST /api/v1/prompt - Store the text area content for the session
//! - GET /api/v1/prompt - Read back the session's stored prompt

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{parse_version, PromptResponse, SubmitPromptRequest, SubmitPromptResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{Interaction, PromptStatus, WidgetState};
use crate::session::{SessionError, SESSION_HEADER};

use super::session_id_from;

/// POST /api/v1/prompt
///
/// Creates the session on its first submit. The id is returned in the body
/// and in the `x-session-id` response header.
pub async fn submit_prompt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SubmitPromptRequest>,
) -> ApiResult<Response> {
    let version = parse_version(req.version.as_deref())?;
    let requested_id = session_id_from(&headers);

    let session = match &requested_id {
        Some(id) => state.sessions.get(id).await,
        None => None,
    };

    let widgets = WidgetState {
        version,
        draft: None,
    };
    let rendered = state
        .renderer
        .render(session, widgets, Interaction::SubmitPrompt(req.prompt));

    let new_state = rendered
        .session
        .ok_or_else(|| ApiError::Internal("Submit produced no session state".to_string()))?;
    let prompt_len = new_state.last_prompt.as_ref().map_or(0, String::len);

    let session_id = state
        .sessions
        .save(requested_id.as_deref(), new_state)
        .await?;

    tracing::info!(
        session_id = %session_id,
        prompt_len,
        "System prompt updated"
    );

    let body = SubmitPromptResponse {
        session_id: session_id.clone(),
        view: rendered.view,
    };

    Ok(([(SESSION_HEADER, session_id)], Json(body)).into_response())
}

/// GET /api/v1/prompt
pub async fn get_prompt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<PromptResponse>> {
    let session_id = session_id_from(&headers)
        .ok_or_else(|| ApiError::Validation(format!("Missing {} header", SESSION_HEADER)))?;

    let session = state
        .sessions
        .get(&session_id)
        .await
        .ok_or_else(|| SessionError::NotFound(session_id.clone()))?;

    let status = session.status();
    Ok(Json(PromptResponse {
        session_id,
        last_prompt: session.last_prompt,
        prompt_updated: status == PromptStatus::Saved,
        status,
    }))
}
