//! Statistics panel
//!
//! The statistics table and the key metric gauges are hardcoded sample values.

use super::types::{Column, ColumnWidth, KeyMetric, StatRow, TrafficSlice};

/// Statistics table: (metric, value, status)
const STATISTICS: [(&str, &str, &str); 5] = [
    ("Requests", "2,450K", "↑ +5%"),
    ("Errors", "12", "↓ -2%"),
    ("Latency", "125ms", "↔ 0%"),
    ("Uptime", "99.9%", "✓ OK"),
    ("Active Users", "1,234", "↑ +8%"),
];

/// Key metric gauges: (label, value, delta)
const KEY_METRICS: [(&str, &str, &str); 4] = [
    ("CPU", "45%", "+2%"),
    ("Memory", "62%", "-1%"),
    ("Disk", "78%", "0%"),
    ("Network", "234Mb/s", "+12%"),
];

/// Traffic distribution: (category, share, color)
const TRAFFIC: [(&str, u32, &str); 5] = [
    ("API", 35, "#0ea5e9"),
    ("Web", 28, "#06b6d4"),
    ("Mobile", 18, "#10b981"),
    ("Desktop", 12, "#f59e0b"),
    ("Other", 7, "#ef4444"),
];

/// Column headers of the statistics table
pub fn statistics_columns() -> Vec<Column> {
    vec![
        Column {
            name: "Metric".to_string(),
            width: ColumnWidth::Medium,
        },
        Column {
            name: "Value".to_string(),
            width: ColumnWidth::Small,
        },
        Column {
            name: "Status".to_string(),
            width: ColumnWidth::Small,
        },
    ]
}

/// The five rows of the statistics table
pub fn statistics_table() -> Vec<StatRow> {
    STATISTICS
        .iter()
        .map(|(metric, value, status)| StatRow::new(*metric, *value, *status))
        .collect()
}

/// The four key metric gauges, in display order
pub fn key_metrics() -> [KeyMetric; 4] {
    KEY_METRICS.map(|(label, value, delta)| KeyMetric::new(label, value, delta))
}

/// The fixed traffic distribution
pub fn traffic_distribution() -> Vec<TrafficSlice> {
    TRAFFIC
        .iter()
        .map(|(category, share, color)| TrafficSlice {
            category: category.to_string(),
            share: *share,
            color: color.to_string(),
        })
        .collect()
}
