//! Page render cycle
//!
//! `Renderer::render` is the single entry point invoked on page load and on
//! every user interaction. It recomputes the whole page from the current
//! session state and the transient widget state, and hands back the (possibly
//! new) session state instead of mutating anything shared.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::charts::Charts;
use super::clock::{caption_time, Clock, SystemClock};
use super::mock::{MockSource, TimeSeries};
use super::prompt::{
    last_updated_caption, PromptPanel, PromptStatus, SessionState, DEFAULT_SYSTEM_PROMPT,
    SUCCESS_MESSAGE, TEXT_AREA_HEIGHT,
};
use super::stats::{key_metrics, statistics_columns, statistics_table, traffic_distribution};
use super::types::{Column, KeyMetric, StatRow, Version};

/// A user action that triggers a render cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Initial load or refresh
    Load,
    /// A version picked in the title bar
    SelectVersion(Version),
    /// Text area edited (not submitted)
    EditPrompt(String),
    /// Submit button clicked with the text area content
    SubmitPrompt(String),
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Load => "load",
            Interaction::SelectVersion(_) => "select_version",
            Interaction::EditPrompt(_) => "edit_prompt",
            Interaction::SubmitPrompt(_) => "submit_prompt",
        }
    }
}

/// Widget state the browser holds between renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetState {
    pub version: Version,
    /// Text area content, if the user has touched it
    pub draft: Option<String>,
}

/// Page-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageConfig {
    pub page_title: String,
    pub page_icon: String,
    pub layout: String,
    pub initial_sidebar_state: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_title: "Dashboard".to_string(),
            page_icon: "📊".to_string(),
            layout: "wide".to_string(),
            initial_sidebar_state: "collapsed".to_string(),
        }
    }
}

/// Left column: statistics table plus key metric gauges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatisticsPanel {
    pub header: String,
    pub columns: Vec<Column>,
    pub rows: Vec<StatRow>,
    pub key_metrics_header: String,
    pub key_metrics: Vec<KeyMetric>,
}

/// Middle column: the three charts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsPanel {
    pub header: String,
    pub charts: Charts,
}

/// Everything the page shows for one render cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageView {
    pub page: PageConfig,
    pub title: String,
    pub versions: Vec<Version>,
    pub version: Version,
    pub statistics: StatisticsPanel,
    pub metrics: MetricsPanel,
    pub prompt: PromptPanel,
    pub footer: String,
    pub rendered_at: NaiveDateTime,
}

/// Output of one render cycle
#[derive(Debug, Clone)]
pub struct Rendered {
    pub view: PageView,
    /// Session state after the interaction (`None` until the first submit)
    pub session: Option<SessionState>,
}

/// Computes page views
#[derive(Clone)]
pub struct Renderer {
    clock: Arc<dyn Clock>,
    source: MockSource,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), MockSource::Entropy)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new(clock: Arc<dyn Clock>, source: MockSource) -> Self {
        Self { clock, source }
    }

    pub fn source(&self) -> MockSource {
        self.source
    }

    /// Run one render cycle
    pub fn render(
        &self,
        session: Option<SessionState>,
        widgets: WidgetState,
        interaction: Interaction,
    ) -> Rendered {
        let now = self.clock.now();
        let interaction_name = interaction.name();

        let mut widgets = widgets;
        let mut session = session;
        let mut success_message = None;

        match interaction {
            Interaction::Load => {}
            Interaction::SelectVersion(version) => widgets.version = version,
            Interaction::EditPrompt(text) => widgets.draft = Some(text),
            Interaction::SubmitPrompt(text) => {
                session = Some(SessionState::submit(session, text.clone()));
                widgets.draft = Some(text);
                success_message = Some(SUCCESS_MESSAGE.to_string());
            }
        }

        let series = TimeSeries::generate(&mut self.source.rng(), now);
        let charts = Charts::build(&series, &traffic_distribution());

        let prompt = PromptPanel {
            header: "⚙️ System Prompt".to_string(),
            // Unedited text area shows the stored prompt once there is one
            text: widgets
                .draft
                .or_else(|| session.as_ref().and_then(|s| s.last_prompt.clone()))
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            height: TEXT_AREA_HEIGHT,
            status: PromptStatus::of(session.as_ref()),
            success_message,
            caption: last_updated_caption(session.as_ref(), now),
        };

        let view = PageView {
            page: PageConfig::default(),
            title: "🚀 Dashboard".to_string(),
            versions: Version::all().to_vec(),
            version: widgets.version,
            statistics: StatisticsPanel {
                header: "📊 Statistics".to_string(),
                columns: statistics_columns(),
                rows: statistics_table(),
                key_metrics_header: "Key Metrics".to_string(),
                key_metrics: key_metrics().to_vec(),
            },
            metrics: MetricsPanel {
                header: "📈 Logs & Metrics".to_string(),
                charts,
            },
            prompt,
            footer: format!(
                "Dashboard Version: {} | Last refresh: {}",
                widgets.version,
                caption_time(now)
            ),
            rendered_at: now,
        };

        tracing::debug!(
            interaction = interaction_name,
            version = %view.version,
            prompt_status = ?view.prompt.status,
            "Rendered dashboard"
        );

        Rendered { view, session }
    }
}
