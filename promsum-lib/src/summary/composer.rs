use super::aggregator::{Aggregation, aggregate};
use super::size_attributor::attribute_sizes;
use super::{CardinalityEntry, MetricsSummary, NO_LABELS_KEY, ScrapeSummary};
use crate::Result;
use crate::exposition::decode;
use std::collections::BTreeMap;

/// How many metrics are listed among the top cardinalities.
pub const TOP_CARDINALITIES: usize = 10;

/// Summarize a scrape, falling back to a size-only summary when it cannot be decoded.
///
/// A payload that fails to decode still reports its byte count; its metric list
/// and tallies are empty, apart from the always-present `<none>` label count.
#[must_use]
pub fn summarize_scrape(data: &[u8]) -> ScrapeSummary {
    match try_summarize_scrape(data) {
        Ok(summary) => summary,
        Err(e) => {
            log::warn!("unable to decode exposition payload, reporting its size only: {e}");
            compose(data, Aggregation::default())
        }
    }
}

/// Summarize a scrape, failing if it cannot be decoded.
///
/// # Errors
///
/// Returns the decoder's error when the payload is not valid text exposition.
pub fn try_summarize_scrape(data: &[u8]) -> Result<ScrapeSummary> {
    let families = decode(data)?;

    let mut aggregation = aggregate(&families);
    attribute_sizes(data, &mut aggregation.metrics);

    Ok(compose(data, aggregation))
}

/// The size of a scrape payload in bytes.
#[must_use]
pub const fn summarize_size(data: &[u8]) -> u64 {
    data.len() as u64
}

/// Assemble the final summary from aggregated, size-attributed metrics.
///
/// Metrics end up ordered by cardinality, highest first, with ties ordered by name.
#[must_use]
pub fn compose(data: &[u8], aggregation: Aggregation) -> ScrapeSummary {
    let Aggregation { mut metrics, label_values } = aggregation;

    metrics.sort_by(|a, b| b.cardinality.cmp(&a.cardinality).then_with(|| a.name.cmp(&b.name)));

    let top_cardinalities = metrics.iter().take(TOP_CARDINALITIES).map(CardinalityEntry::from).collect();

    let mut types_count = BTreeMap::new();
    for metric in &metrics {
        *types_count.entry(metric.metric_type.as_lower().to_string()).or_insert(0) += 1;
    }

    let mut label_counts = BTreeMap::from([(NO_LABELS_KEY.to_string(), 0)]);
    for metric in &metrics {
        if metric.labels.is_empty() {
            *label_counts.entry(NO_LABELS_KEY.to_string()).or_insert(0) += 1;
            continue;
        }

        for label in &metric.labels {
            *label_counts.entry(label.clone()).or_insert(0) += 1;
        }
    }

    let label_value_counts = label_values
        .iter()
        .map(|(label, values)| (label.clone(), values.len()))
        .collect();

    ScrapeSummary {
        summary: MetricsSummary {
            bytes: summarize_size(data),
            top_cardinalities,
            types_count,
            label_counts,
            label_value_counts,
        },
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposition::MetricType;
    use crate::summary::MetricSummary;

    fn metric(name: &str, metric_type: MetricType, cardinality: usize, labels: &[&str]) -> MetricSummary {
        MetricSummary::new(
            name.to_string(),
            metric_type,
            String::new(),
            cardinality,
            labels.iter().map(ToString::to_string).collect(),
        )
    }

    #[test]
    fn test_single_gauge_without_labels() {
        let summary = summarize_scrape(b"# TYPE temperature gauge\ntemperature 5\n");

        assert_eq!(summary.metrics.len(), 1);
        assert_eq!(summary.metrics[0].cardinality, 1);
        assert_eq!(summary.summary.label_counts[NO_LABELS_KEY], 1);
        assert_eq!(summary.summary.types_count["gauge"], 1);
        assert_eq!(summary.summary.top_cardinalities.len(), 1);
    }

    #[test]
    fn test_histogram_scenario() {
        let text = "\
# TYPE req_seconds histogram
req_seconds_bucket{path=\"/a\",le=\"0.5\"} 1
req_seconds_bucket{path=\"/a\",le=\"1\"} 2
req_seconds_bucket{path=\"/a\",le=\"+Inf\"} 3
req_seconds_sum{path=\"/a\"} 1
req_seconds_count{path=\"/a\"} 3
req_seconds_bucket{path=\"/b\",le=\"0.25\"} 0
req_seconds_bucket{path=\"/b\",le=\"1\"} 1
req_seconds_bucket{path=\"/b\",le=\"+Inf\"} 1
req_seconds_sum{path=\"/b\"} 0.7
req_seconds_count{path=\"/b\"} 1
";
        let summary = summarize_scrape(text.as_bytes());

        let metric = &summary.metrics[0];
        assert_eq!(metric.cardinality, 6);
        assert!(metric.labels.contains(&"le".to_string()));
        assert_eq!(summary.summary.label_value_counts["le"], 4);
        assert_eq!(summary.summary.label_value_counts["path"], 2);
        assert_eq!(metric.size, text.len() as u64);
    }

    #[test]
    fn test_garbage_degrades_to_size_only() {
        let garbage = b"<html><body>502 Bad Gateway</body></html>";
        let summary = summarize_scrape(garbage);

        assert_eq!(summary.summary.bytes, garbage.len() as u64);
        assert!(summary.metrics.is_empty());
        assert!(summary.summary.top_cardinalities.is_empty());
        assert!(summary.summary.types_count.is_empty());
        assert!(summary.summary.label_value_counts.is_empty());
        assert_eq!(summary.summary.label_counts, BTreeMap::from([(NO_LABELS_KEY.to_string(), 0)]));
    }

    #[test]
    fn test_garbage_fails_when_strict() {
        assert!(try_summarize_scrape(b"not a scrape").is_err());
    }

    #[test]
    fn test_bytes_is_payload_length() {
        let data = b"a 1\nb{x=\"y\"} 2\n";
        assert_eq!(summarize_scrape(data).summary.bytes, 15);
        assert_eq!(summarize_size(b""), 0);
    }

    #[test]
    fn test_compose_orders_by_cardinality_then_name() {
        let aggregation = Aggregation {
            metrics: vec![
                metric("b", MetricType::Gauge, 2, &[]),
                metric("a", MetricType::Gauge, 2, &[]),
                metric("c", MetricType::Counter, 9, &["code"]),
            ],
            ..Aggregation::default()
        };

        let summary = compose(b"", aggregation);
        let names: Vec<_> = summary.metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(summary.summary.top_cardinalities[0], CardinalityEntry { name: "c".to_string(), cardinality: 9 });
    }

    #[test]
    fn test_compose_limits_top_cardinalities() {
        let aggregation = Aggregation {
            metrics: (0..15).map(|i| metric(&format!("m{i:02}"), MetricType::Gauge, i, &[])).collect(),
            ..Aggregation::default()
        };

        let summary = compose(b"", aggregation);
        let top = &summary.summary.top_cardinalities;
        assert_eq!(top.len(), TOP_CARDINALITIES);
        assert_eq!(top[0].name, "m14");
        assert!(top.windows(2).all(|pair| pair[0].cardinality >= pair[1].cardinality));
        assert_eq!(summary.metrics.len(), 15);
    }

    #[test]
    fn test_compose_tallies() {
        let aggregation = Aggregation {
            metrics: vec![
                metric("a", MetricType::Gauge, 1, &[]),
                metric("b", MetricType::Counter, 2, &["code", "method"]),
                metric("c", MetricType::Counter, 1, &["code"]),
                metric("d", MetricType::Histogram, 0, &[]),
            ],
            ..Aggregation::default()
        };

        let summary = compose(b"", aggregation).summary;
        assert_eq!(summary.types_count["counter"], 2);
        assert_eq!(summary.types_count["gauge"], 1);
        assert_eq!(summary.types_count["histogram"], 1);
        assert_eq!(summary.types_count.values().sum::<usize>(), 4);
        assert_eq!(summary.label_counts[NO_LABELS_KEY], 2);
        assert_eq!(summary.label_counts["code"], 2);
        assert_eq!(summary.label_counts["method"], 1);
    }
}
