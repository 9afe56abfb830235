//! Chart specifications
//!
//! Builds the three Plotly figures shown in the metrics panel. Figures are
//! plain serializable data; the browser page hands them to `Plotly.newPlot`
//! unchanged, so nothing here draws or computes.

use serde::{Deserialize, Serialize};

use super::mock::TimeSeries;
use super::types::TrafficSlice;

/// Primary accent (requests line)
pub const PRIMARY: &str = "#0ea5e9";
/// Error accent (errors line)
pub const DANGER: &str = "#ef4444";
/// Area fill under the requests line
pub const PRIMARY_FILL: &str = "rgba(14, 165, 233, 0.2)";
/// Chart background
pub const CHART_BG: &str = "#ffffff";
/// Chart text color
pub const TEXT_PRIMARY: &str = "#f1f5f9";
/// Axis grid color
pub const GRID: &str = "#334155";

/// Timestamp format the charting library parses as a local date
const X_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A complete figure: traces plus layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// A single trace of a figure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Pie(PieTrace),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScatterTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
    pub mode: String,
    pub line: Line,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
    pub marker: PieMarker,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Line {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    pub size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PieMarker {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    pub title: Title,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    /// Named theme; the page maps it to its own template object
    pub template: String,
    pub margin: Margin,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    pub paper_bgcolor: String,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Axis {
    pub title: Title,
    pub gridcolor: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Font {
    pub color: String,
}

/// The three charts of the metrics panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Charts {
    pub requests: Figure,
    pub errors: Figure,
    pub traffic: Figure,
}

impl Charts {
    pub fn build(series: &TimeSeries, traffic: &[TrafficSlice]) -> Self {
        Self {
            requests: requests_chart(series),
            errors: errors_chart(series),
            traffic: traffic_chart(traffic),
        }
    }
}

fn base_layout(title: &str, height: u32) -> Layout {
    Layout {
        title: Title::new(title),
        xaxis: None,
        yaxis: None,
        hovermode: None,
        template: "plotly_dark".to_string(),
        margin: Margin {
            l: 0,
            r: 0,
            t: 30,
            b: 0,
        },
        height,
        plot_bgcolor: None,
        paper_bgcolor: CHART_BG.to_string(),
        font: Font {
            color: TEXT_PRIMARY.to_string(),
        },
    }
}

fn time_layout(title: &str, y_title: &str, height: u32) -> Layout {
    let axis = |text: &str| Axis {
        title: Title::new(text),
        gridcolor: GRID.to_string(),
    };

    Layout {
        xaxis: Some(axis("Time")),
        yaxis: Some(axis(y_title)),
        hovermode: Some("x unified".to_string()),
        plot_bgcolor: Some(CHART_BG.to_string()),
        ..base_layout(title, height)
    }
}

fn x_values(series: &TimeSeries) -> Vec<String> {
    series
        .timestamps
        .iter()
        .map(|t| t.format(X_FORMAT).to_string())
        .collect()
}

/// Filled line chart of requests over time
pub fn requests_chart(series: &TimeSeries) -> Figure {
    Figure {
        data: vec![Trace::Scatter(ScatterTrace {
            x: x_values(series),
            y: series.requests.clone(),
            name: "Requests".to_string(),
            mode: "lines".to_string(),
            line: Line {
                color: PRIMARY.to_string(),
                width: 3,
            },
            fill: Some("tozeroy".to_string()),
            fillcolor: Some(PRIMARY_FILL.to_string()),
            marker: None,
        })],
        layout: time_layout("Requests (Last 24 Hours)", "Count", 300),
    }
}

/// Line and marker chart of errors over time
pub fn errors_chart(series: &TimeSeries) -> Figure {
    Figure {
        data: vec![Trace::Scatter(ScatterTrace {
            x: x_values(series),
            y: series.errors.iter().map(|e| f64::from(*e)).collect(),
            name: "Errors".to_string(),
            mode: "lines+markers".to_string(),
            line: Line {
                color: DANGER.to_string(),
                width: 2,
            },
            fill: None,
            fillcolor: None,
            marker: Some(Marker { size: 6 }),
        })],
        layout: time_layout("Error Rate (Last 24 Hours)", "Errors", 250),
    }
}

/// Pie chart of the traffic distribution
pub fn traffic_chart(slices: &[TrafficSlice]) -> Figure {
    Figure {
        data: vec![Trace::Pie(PieTrace {
            labels: slices.iter().map(|s| s.category.clone()).collect(),
            values: slices.iter().map(|s| s.share).collect(),
            marker: PieMarker {
                colors: slices.iter().map(|s| s.color.clone()).collect(),
            },
        })],
        layout: base_layout("Traffic Distribution", 250),
    }
}
