//! Summarization of decoded scrapes
//!
//! This module reduces a scrape to a [`ScrapeSummary`]: the payload size, one
//! [`MetricSummary`] per family, and scrape-wide tallies of cardinality, types
//! and labels.
//!
//! # Implementation Model
//!
//! Summarization runs three passes, each call owning all of its state:
//!
//! - **Aggregation** walks the decoded families in name order, computing each
//!   family's cardinality and label set and collecting the distinct values seen
//!   for every label name
//! - **Size attribution** rescans the raw payload line by line and charges each
//!   line's bytes to the metrics whose names appear on it
//! - **Composition** orders metrics by cardinality, picks the top entries, and
//!   tallies types, label usage and distinct label values
//!
//! Histograms and summaries are counted by bucket and quantile rather than by
//! instance, since each bucket or quantile is a separate series.

mod aggregator;
mod composer;
mod scrape_summary;
mod size_attributor;

pub use aggregator::{Aggregation, LabelValues, aggregate, format_general};
pub use composer::{TOP_CARDINALITIES, compose, summarize_scrape, summarize_size, try_summarize_scrape};
pub use scrape_summary::{CardinalityEntry, MetricSummary, MetricsSummary, NO_LABELS_KEY, ScrapeSummary};
pub use size_attributor::attribute_sizes;
