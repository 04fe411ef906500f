use super::MetricSummary;
use crate::exposition::{BUCKET_LABEL, Instance, MetricFamily, MetricType, QUANTILE_LABEL};
use std::collections::{BTreeMap, BTreeSet};

/// Distinct values seen for each label name, across every family of a scrape.
pub type LabelValues = BTreeMap<String, BTreeSet<String>>;

/// Per-metric summaries plus the scrape-wide label values they were built from.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// One summary per family, in ascending name order.
    pub metrics: Vec<MetricSummary>,
    pub label_values: LabelValues,
}

/// Compute cardinality and label sets for every family.
///
/// Families are visited in ascending name order. Histograms and summaries count
/// one series per bucket or quantile, every other type counts one series per
/// instance.
#[must_use]
pub fn aggregate(families: &BTreeMap<String, MetricFamily>) -> Aggregation {
    let mut label_values = LabelValues::new();

    let metrics: Vec<_> = families
        .values()
        .map(|family| summarize_family(family, &mut label_values))
        .collect();

    log::debug!(
        "aggregated {} metrics over {} distinct label names",
        metrics.len(),
        label_values.len()
    );

    Aggregation { metrics, label_values }
}

fn summarize_family(family: &MetricFamily, label_values: &mut LabelValues) -> MetricSummary {
    let mut labels = BTreeSet::new();

    for pair in family.instances.iter().flat_map(|instance| &instance.labels) {
        let _ = labels.insert(pair.name.clone());
        let _ = label_values
            .entry(pair.name.clone())
            .or_default()
            .insert(pair.value.clone());
    }

    let cardinality = match family.metric_type {
        MetricType::Histogram => distribution_cardinality(&family.instances, BUCKET_LABEL, &mut labels, label_values, |instance| {
            instance.buckets.iter().map(|bucket| bucket.upper_bound).collect()
        }),
        MetricType::Summary => distribution_cardinality(&family.instances, QUANTILE_LABEL, &mut labels, label_values, |instance| {
            instance.quantiles.iter().map(|quantile| quantile.quantile).collect()
        }),
        MetricType::Counter | MetricType::Gauge | MetricType::Untyped => family.instances.len(),
    };

    MetricSummary::new(
        family.name.clone(),
        family.metric_type,
        family.help.clone(),
        cardinality,
        labels.into_iter().collect(),
    )
}

/// Count the series exposed by histogram buckets or summary quantiles.
///
/// Every point is recorded as a value of `label`, and `label` joins the family's
/// labels only when at least one point exists.
fn distribution_cardinality(
    instances: &[Instance],
    label: &str,
    labels: &mut BTreeSet<String>,
    label_values: &mut LabelValues,
    points: impl Fn(&Instance) -> Vec<f64>,
) -> usize {
    let values = label_values.entry(label.to_string()).or_default();

    let mut cardinality = 0;
    for instance in instances {
        let instance_points = points(instance);
        cardinality += instance_points.len();
        values.extend(instance_points.into_iter().map(format_general));
    }

    if cardinality > 0 {
        let _ = labels.insert(label.to_string());
    }

    cardinality
}

/// Format a float the way `%g` does in shortest form.
///
/// Exponent notation (`1e+06`, `2.5e-05`) is used when the decimal exponent is
/// below -4 or at least 6; plain decimal otherwise.
#[must_use]
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    if (-4..6).contains(&exponent) {
        value.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}
