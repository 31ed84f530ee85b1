//! Account-level insights metrics
//!
//! The provider returns one series per metric, each holding daily point
//! values over the requested window. Aggregation collapses a series into a
//! single dashboard figure.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metrics that accumulate day over day; their window figure is the sum of
/// daily values rather than the mean.
const CUMULATIVE_METRICS: &[&str] = &["reach", "impressions"];

/// One daily sample in a metric series. Days the provider has no data for
/// arrive as null values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub value: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// A named metric with its daily point values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub name: String,

    #[serde(default)]
    pub values: Vec<MetricPoint>,
}

impl MetricSeries {
    pub fn is_cumulative(&self) -> bool {
        CUMULATIVE_METRICS.contains(&self.name.as_str())
    }

    /// Collapse the daily points into a single figure.
    ///
    /// Null days are excluded from both the sum and the mean's denominator.
    /// A series with no non-null points aggregates to 0.
    pub fn aggregate(&self) -> i64 {
        let non_null: Vec<i64> = self.values.iter().filter_map(|point| point.value).collect();
        if non_null.is_empty() {
            return 0;
        }

        let total: i64 = non_null.iter().sum();
        if self.is_cumulative() {
            total
        } else {
            (total as f64 / non_null.len() as f64).round() as i64
        }
    }
}

/// Aggregate a fetched insights payload into per-metric figures.
pub fn aggregate(series: &[MetricSeries]) -> HashMap<String, i64> {
    series
        .iter()
        .map(|metric| (metric.name.clone(), metric.aggregate()))
        .collect()
}
