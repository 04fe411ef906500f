use super::MetricType;

/// A label attached to a sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelPair {
    pub name: String,
    pub value: String,
}

impl LabelPair {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A cumulative histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub upper_bound: f64,
    pub cumulative_count: f64,
}

/// A precomputed summary quantile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantile {
    pub quantile: f64,
    pub value: f64,
}

/// One instance of a family, identified by its label set.
///
/// Scalar families (counters, gauges, untyped) carry a `value`. Histograms carry
/// `buckets` and summaries carry `quantiles`; both may also carry a `sum` and a
/// `count`. The structural `le` and `quantile` labels never appear in `labels`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instance {
    pub labels: Vec<LabelPair>,
    pub value: Option<f64>,
    pub timestamp_ms: Option<i64>,
    pub buckets: Vec<Bucket>,
    pub quantiles: Vec<Quantile>,
    pub sum: Option<f64>,
    pub count: Option<f64>,
}

impl Instance {
    #[must_use]
    pub fn with_labels(labels: Vec<LabelPair>) -> Self {
        Self { labels, ..Self::default() }
    }
}

/// All instances sharing one name and type.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    pub name: String,
    pub metric_type: MetricType,
    pub help: String,
    pub instances: Vec<Instance>,
}

impl MetricFamily {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metric_type: MetricType::Untyped,
            help: String::new(),
            instances: Vec::new(),
        }
    }
}
