//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::dashboard::{Interaction, PageView, PromptStatus, Version, WidgetState};

use super::error::{ApiError, ApiResult};

// ============================================
// VIEW DTOs
// ============================================

/// Render request (query string on GET, JSON body on POST)
#[derive(Debug, Default, Deserialize)]
pub struct ViewRequest {
    /// Selected version (default: v0)
    #[serde(default)]
    pub version: Option<String>,
    /// Current text area content, if edited
    #[serde(default)]
    pub draft: Option<String>,
    /// What triggered the render: load, select_version, edit_prompt
    #[serde(default)]
    pub event: Option<String>,
}

impl ViewRequest {
    /// Split the request into widget state and the triggering interaction
    pub fn into_parts(self) -> ApiResult<(WidgetState, Interaction)> {
        let version = parse_version(self.version.as_deref())?;

        let interaction = match self.event.as_deref().unwrap_or("load") {
            "load" => Interaction::Load,
            "select_version" => Interaction::SelectVersion(version),
            "edit_prompt" => {
                let draft = self.draft.clone().ok_or_else(|| {
                    ApiError::Validation("edit_prompt requires a draft".to_string())
                })?;
                Interaction::EditPrompt(draft)
            }
            other => {
                return Err(ApiError::Validation(format!(
                    "Invalid event: {}. Use load, select_version, or edit_prompt",
                    other
                )))
            }
        };

        let widgets = WidgetState {
            version,
            draft: self.draft,
        };

        Ok((widgets, interaction))
    }
}

/// Rendered page
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewResponse {
    /// Session the view was rendered for, if the caller has one
    pub session_id: Option<String>,
    pub view: PageView,
}

// ============================================
// PROMPT DTOs
// ============================================

/// Submit the text area content
#[derive(Debug, Deserialize)]
pub struct SubmitPromptRequest {
    /// Text to store; empty is allowed
    pub prompt: String,
    /// Selected version at submit time
    #[serde(default)]
    pub version: Option<String>,
}

/// Result of a submit: the session (possibly new) and the rendered page
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitPromptResponse {
    pub session_id: String,
    pub view: PageView,
}

/// Stored prompt of the calling session
#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub session_id: String,
    pub last_prompt: Option<String>,
    pub prompt_updated: bool,
    pub status: PromptStatus,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Live session count
    pub sessions: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// API version
    pub version: String,
}

/// Parse an optional version, defaulting to the first option
pub fn parse_version(version: Option<&str>) -> ApiResult<Version> {
    match version {
        None => Ok(Version::default()),
        Some(v) => Ok(v.parse()?),
    }
}
