//! Dashboard page model
//!
//! Everything the page shows, computed fresh on every render cycle.
//!
//! ## Layout
//!
//! - **Title bar**: page title and the version selector
//! - **Statistics**: fixed statistics table and four key metric gauges
//! - **Logs & Metrics**: requests, errors and traffic distribution charts
//! - **System Prompt**: editable text panel backed by session state
//! - **Footer**: selected version and refresh time
//!
//! ## Example
//!
//! ```rust
//! use sysdash::dashboard::{Interaction, Renderer, WidgetState};
//!
//! let renderer = Renderer::default();
//! let first = renderer.render(None, WidgetState::default(), Interaction::Load);
//! assert_eq!(first.view.prompt.caption, "Last updated: Never");
//!
//! let saved = renderer.render(
//!     first.session,
//!     WidgetState::default(),
//!     Interaction::SubmitPrompt("Be brief.".to_string()),
//! );
//! assert_eq!(saved.session.unwrap().last_prompt.as_deref(), Some("Be brief."));
//! ```

pub mod charts;
pub mod clock;
pub mod mock;
pub mod prompt;
pub mod render;
pub mod stats;
pub mod types;

pub use charts::{Charts, Figure, Trace};
pub use clock::{Clock, FixedClock, SystemClock};
pub use mock::{MockSource, TimeSeries};
pub use prompt::{PromptPanel, PromptStatus, SessionState, DEFAULT_SYSTEM_PROMPT};
pub use render::{
    Interaction, MetricsPanel, PageConfig, PageView, Rendered, Renderer, StatisticsPanel,
    WidgetState,
};
pub use types::{Column, ColumnWidth, KeyMetric, StatRow, TrafficSlice, Trend, Version};
