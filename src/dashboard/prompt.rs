//! Editable system prompt panel
//!
//! The panel has two states. It starts `Unsaved`; a submit copies the text
//! area into session state and moves it to `Saved`, where further submits
//! overwrite the stored text. There is no history and no undo.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::clock::caption_time;

/// Text area content before the user edits anything
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI assistant helping with system monitoring and analytics. Your role is to:

1. Analyze system metrics and provide insights
2. Identify performance issues and anomalies
3. Suggest optimization strategies
4. Help interpret log data

Context:
- Monitor CPU, Memory, Disk usage
- Track request rates and error patterns
- Analyze user behavior trends";

/// Confirmation shown in the render that handled a submit
pub const SUCCESS_MESSAGE: &str = "✅ System prompt updated successfully!";

/// Text area height in pixels
pub const TEXT_AREA_HEIGHT: u32 = 300;

/// Per-session state written by the prompt panel
///
/// Both fields are absent until the first submit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    #[serde(default)]
    pub last_prompt: Option<String>,
    #[serde(default)]
    pub prompt_updated: Option<bool>,
}

impl SessionState {
    /// Record a submit, creating the state if this is the first one
    ///
    /// The text is stored verbatim; empty text is a valid prompt.
    pub fn submit(state: Option<SessionState>, text: impl Into<String>) -> SessionState {
        let mut state = state.unwrap_or_default();
        state.last_prompt = Some(text.into());
        state.prompt_updated = Some(true);
        state
    }

    pub fn status(&self) -> PromptStatus {
        if self.prompt_updated == Some(true) {
            PromptStatus::Saved
        } else {
            PromptStatus::Unsaved
        }
    }
}

/// Whether the session has submitted a prompt yet
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptStatus {
    #[default]
    Unsaved,
    Saved,
}

impl PromptStatus {
    pub fn of(state: Option<&SessionState>) -> Self {
        state.map(SessionState::status).unwrap_or_default()
    }
}

/// "Last updated" caption for the panel
///
/// A saved session shows the time of the current render, not the time the
/// prompt was stored.
pub fn last_updated_caption(state: Option<&SessionState>, now: NaiveDateTime) -> String {
    match PromptStatus::of(state) {
        PromptStatus::Saved => format!("Last updated: {}", caption_time(now)),
        PromptStatus::Unsaved => "Last updated: Never".to_string(),
    }
}

/// View of the prompt panel for one render
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptPanel {
    pub header: String,
    /// Current text area content
    pub text: String,
    pub height: u32,
    pub status: PromptStatus,
    /// Present only in the render that handled a submit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    pub caption: String,
}
