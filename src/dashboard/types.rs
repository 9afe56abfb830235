//! Core data types for the dashboard view
//!
//! This module defines the fixed-shape values the page is built from:
//! - `StatRow`: One row of the statistics table
//! - `KeyMetric`: A gauge with a current value and a delta
//! - `TrafficSlice`: One category of the traffic distribution
//! - `Version`: The title-bar version selector

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A row of the statistics table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatRow {
    /// Metric name
    pub metric: String,
    /// Display value
    pub value: String,
    /// Trend indicator
    pub status: String,
}

impl StatRow {
    pub fn new(
        metric: impl Into<String>,
        value: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            metric: metric.into(),
            value: value.into(),
            status: status.into(),
        }
    }
}

/// Display width hint for a table column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    Small,
    Medium,
    Large,
}

/// Column header of the statistics table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub width: ColumnWidth,
}

/// A key metric gauge (current value plus delta)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyMetric {
    pub label: String,
    pub value: String,
    pub delta: String,
    /// Direction of the delta, used by the page to color it
    pub trend: Trend,
}

impl KeyMetric {
    pub fn new(label: impl Into<String>, value: impl Into<String>, delta: impl Into<String>) -> Self {
        let delta = delta.into();
        Self {
            label: label.into(),
            value: value.into(),
            trend: Trend::of_delta(&delta),
            delta,
        }
    }
}

/// Direction of a metric delta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Sign of a delta such as "+2%" or "-1%"
    pub fn of_delta(delta: &str) -> Self {
        match delta.trim_start().chars().next() {
            Some('+') => Trend::Up,
            Some('-') => Trend::Down,
            _ => Trend::Flat,
        }
    }
}

/// One category of the traffic distribution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrafficSlice {
    pub category: String,
    /// Share in percent
    pub share: u32,
    /// Slice color (hex)
    pub color: String,
}

/// Version selected in the title bar
///
/// The selection is echoed in the footer and nowhere else.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    #[default]
    V0,
    V1,
    V2,
    V3,
}

impl Version {
    /// All selectable versions, in display order
    pub fn all() -> &'static [Version] {
        &[Version::V0, Version::V1, Version::V2, Version::V3]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V0 => "v0",
            Version::V1 => "v1",
            Version::V2 => "v2",
            Version::V3 => "v3",
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a version string is not one of the selector options
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown version: {0}. Use v0, v1, v2, or v3")]
pub struct UnknownVersion(pub String);

impl FromStr for Version {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v0" => Ok(Version::V0),
            "v1" => Ok(Version::V1),
            "v2" => Ok(Version::V2),
            "v3" => Ok(Version::V3),
            _ => Err(UnknownVersion(s.to_string())),
        }
    }
}
