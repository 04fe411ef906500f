use super::common::{self, format_bytes, pluralize};
use crate::Result;
use crate::summary::{MetricSummary, ScrapeSummary};
use core::fmt::Write;
use owo_colors::OwoColorize;
use std::collections::HashMap;

/// Which parts of the terminal report are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOutputMode {
    pub summary: bool,
    pub metrics: bool,
}

impl ConsoleOutputMode {
    /// Print every section.
    #[must_use]
    pub const fn full() -> Self {
        Self { summary: true, metrics: true }
    }
}

impl Default for ConsoleOutputMode {
    fn default() -> Self {
        Self::full()
    }
}

#[derive(Clone, Copy)]
struct Style {
    use_colors: bool,
}

impl Style {
    fn heading(self, text: &str) -> String {
        if self.use_colors { text.bold().to_string() } else { text.to_string() }
    }

    fn name(self, text: &str) -> String {
        if self.use_colors {
            text.bright_yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn value(self, text: impl ToString) -> String {
        let text = text.to_string();
        if self.use_colors { text.bright_green().to_string() } else { text }
    }

    fn size(self, bytes: u64) -> String {
        let text = format_bytes(bytes);
        if self.use_colors { text.bright_cyan().to_string() } else { text }
    }

    fn faint(self, text: &str) -> String {
        if self.use_colors { text.dimmed().to_string() } else { text.to_string() }
    }
}

pub fn generate<W: Write>(summary: &ScrapeSummary, use_colors: bool, mode: &ConsoleOutputMode, writer: &mut W) -> Result<()> {
    let style = Style { use_colors };

    if mode.summary {
        write_summary(summary, style, writer)?;
    }

    if mode.metrics {
        write_metrics(&summary.metrics, style, writer)?;
    }

    Ok(())
}

fn write_summary<W: Write>(summary: &ScrapeSummary, style: Style, writer: &mut W) -> Result<()> {
    let totals = &summary.summary;

    writeln!(writer, "{}", style.heading("## Summary"))?;
    writeln!(writer)?;
    writeln!(writer, "Size: {}", style.size(totals.bytes))?;
    writeln!(writer)?;

    if !totals.top_cardinalities.is_empty() {
        let sizes: HashMap<&str, u64> = summary.metrics.iter().map(|m| (m.name.as_str(), m.size)).collect();

        writeln!(writer, "Top Metrics:")?;
        for (index, entry) in totals.top_cardinalities.iter().enumerate() {
            write!(
                writer,
                "  {:>2}. {}: {} series",
                index + 1,
                style.name(&entry.name),
                style.value(entry.cardinality)
            )?;

            match sizes.get(entry.name.as_str()) {
                Some(&size) if size > 0 => writeln!(writer, ", {}", style.size(size))?,
                _ => writeln!(writer)?,
            }
        }
        writeln!(writer)?;
    }

    if !totals.types_count.is_empty() {
        writeln!(writer, "Types:")?;
        for (name, count) in common::sorted_types(totals) {
            writeln!(
                writer,
                "  - {}: {} {}",
                style.name(name),
                style.value(count),
                pluralize(count, "metric", "metrics")
            )?;
        }
        writeln!(writer)?;
    }

    if !totals.label_counts.is_empty() {
        writeln!(writer, "Labels:")?;
        for label in common::sorted_labels(totals) {
            let metrics_word = pluralize(label.metrics, "metric", "metrics");

            if label.is_no_labels() {
                writeln!(writer, "  - {}: {} {metrics_word}", style.name(label.name), style.value(label.metrics))?;
            } else {
                writeln!(
                    writer,
                    "  - {}: {} {}, {} {metrics_word}",
                    style.name(label.name),
                    style.value(label.values),
                    pluralize(label.values, "value", "values"),
                    style.value(label.metrics)
                )?;
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn write_metrics<W: Write>(metrics: &[MetricSummary], style: Style, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", style.heading("## Metrics"))?;
    writeln!(writer)?;

    for metric in metrics {
        let labels = if metric.labels.is_empty() {
            String::new()
        } else {
            let colored: Vec<_> = metric.labels.iter().map(|label| style.value(label)).collect();
            format!(", labels: {}", colored.join(", "))
        };

        writeln!(
            writer,
            "{} (type {}, {} {}{labels})",
            style.name(&metric.name),
            style.value(metric.metric_type.as_lower()),
            style.value(metric.cardinality),
            pluralize(metric.cardinality, "value", "values")
        )?;

        let description = if metric.description.is_empty() {
            "<no description>"
        } else {
            metric.description.as_str()
        };
        writeln!(writer, "{}", style.faint(description))?;
        writeln!(writer)?;
    }

    Ok(())
}
