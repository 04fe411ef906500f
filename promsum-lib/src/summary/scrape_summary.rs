use crate::exposition::MetricType;
use serde::Serialize;
use std::collections::BTreeMap;

/// Key counting the metrics that carry no labels at all.
pub const NO_LABELS_KEY: &str = "<none>";

/// Per-metric facts gathered from one scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub description: String,
    pub cardinality: usize,
    pub labels: Vec<String>,
    pub size: u64,
}

impl MetricSummary {
    #[must_use]
    pub fn new(name: String, metric_type: MetricType, description: String, cardinality: usize, labels: Vec<String>) -> Self {
        Self {
            name,
            metric_type,
            description,
            cardinality,
            labels,
            size: 0,
        }
    }
}

/// A metric name and its cardinality, as listed among the top metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardinalityEntry {
    pub name: String,
    pub cardinality: usize,
}

impl From<&MetricSummary> for CardinalityEntry {
    fn from(metric: &MetricSummary) -> Self {
        Self {
            name: metric.name.clone(),
            cardinality: metric.cardinality,
        }
    }
}

/// Scrape-wide statistics derived from the per-metric summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSummary {
    pub bytes: u64,
    pub top_cardinalities: Vec<CardinalityEntry>,
    pub types_count: BTreeMap<String, usize>,
    pub label_counts: BTreeMap<String, usize>,
    pub label_value_counts: BTreeMap<String, usize>,
}

/// Everything known about a scrape, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeSummary {
    pub summary: MetricsSummary,
    pub metrics: Vec<MetricSummary>,
}
