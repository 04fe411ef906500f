//! Common utilities shared across report generators.

use crate::summary::{MetricsSummary, NO_LABELS_KEY};

const BYTE_UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Usage statistics for one label name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelUsage<'a> {
    pub name: &'a str,
    pub metrics: usize,
    pub values: usize,
}

impl LabelUsage<'_> {
    /// Whether this entry counts the metrics without labels.
    #[must_use]
    pub fn is_no_labels(&self) -> bool {
        self.name == NO_LABELS_KEY
    }
}

/// Format a byte count with binary units.
///
/// Counts below 1024 are shown as `<n> bytes`, larger ones with two decimals
/// in the largest unit that keeps the value below 1024 (`12.06 KiB`).
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "Display only needs two decimals")]
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }

    let mut value = bytes as f64;
    let mut unit = BYTE_UNITS[0];
    for candidate in BYTE_UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = candidate;
    }

    format!("{value:.2} {unit}")
}

/// Pick the singular or plural form of a word for a count.
#[must_use]
pub const fn pluralize(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

/// Metric types ordered by how many metrics use them, most first, then by name.
#[must_use]
pub fn sorted_types(summary: &MetricsSummary) -> Vec<(&str, usize)> {
    let mut types: Vec<_> = summary
        .types_count
        .iter()
        .map(|(name, &count)| (name.as_str(), count))
        .collect();

    types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    types
}

/// Labels ordered by how many distinct values they take, most first, then by name.
#[must_use]
pub fn sorted_labels(summary: &MetricsSummary) -> Vec<LabelUsage<'_>> {
    let mut labels: Vec<_> = summary
        .label_counts
        .iter()
        .map(|(name, &metrics)| LabelUsage {
            name,
            metrics,
            values: summary.label_value_counts.get(name).copied().unwrap_or(0),
        })
        .collect();

    labels.sort_by(|a, b| b.values.cmp(&a.values).then_with(|| a.name.cmp(b.name)));
    labels
}
