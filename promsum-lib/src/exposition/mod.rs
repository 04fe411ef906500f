//! Decoding of the Prometheus text exposition format
//!
//! This module turns a raw scrape payload into a map of metric families keyed by
//! family name. It is deliberately strict: anything that does not follow the
//! text format is reported as an error, and callers decide what to do with a
//! payload that cannot be decoded.
//!
//! # Implementation Model
//!
//! Decoding is a single pass over the payload's lines:
//!
//! - `# HELP` and `# TYPE` comments attach metadata to a family
//! - Sample lines are tokenized into a name, a label set, a value and an
//!   optional timestamp
//! - Samples with a `_bucket`, `_sum` or `_count` suffix are folded into their
//!   base family when that family is declared as a histogram or summary
//! - Histogram buckets and summary quantiles are grouped into instances by
//!   their label set, with the structural `le`/`quantile` labels removed
//!
//! Families that end up with no samples are dropped from the result.

mod decoder;
mod metric_family;
mod metric_type;

pub use decoder::decode;
pub use metric_family::{Bucket, Instance, LabelPair, MetricFamily, Quantile};
pub use metric_type::MetricType;

/// Label carrying a histogram bucket's upper bound.
pub const BUCKET_LABEL: &str = "le";

/// Label carrying a summary's quantile.
pub const QUANTILE_LABEL: &str = "quantile";
