use super::MetricSummary;

/// Attribute the payload's bytes to the metrics named on each line.
///
/// Every line's length, including its terminating newline when it has one, is
/// added to the `size` of each metric whose name occurs anywhere in the line.
/// This is a textual estimate: a metric whose name is contained in another
/// metric's name (`http_requests` and `http_requests_total`) is also charged for
/// the longer metric's lines.
pub fn attribute_sizes(data: &[u8], metrics: &mut [MetricSummary]) {
    for line in data.split_inclusive(|&b| b == b'\n') {
        let line_len = line.len() as u64;

        for metric in metrics.iter_mut() {
            if contains(line, metric.name.as_bytes()) {
                metric.size += line_len;
            }
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposition::MetricType;

    fn metric(name: &str) -> MetricSummary {
        MetricSummary::new(name.to_string(), MetricType::Gauge, String::new(), 1, Vec::new())
    }

    #[test]
    fn test_sizes_include_newlines() {
        let data = b"# HELP up Target is up.\n# TYPE up gauge\nup 1\n";
        let mut metrics = vec![metric("up")];

        attribute_sizes(data, &mut metrics);
        assert_eq!(metrics[0].size, data.len() as u64);
    }

    #[test]
    fn test_final_line_without_newline() {
        let data = b"a 1\nb 2";
        let mut metrics = vec![metric("a"), metric("b")];

        attribute_sizes(data, &mut metrics);
        assert_eq!(metrics[0].size, 4);
        assert_eq!(metrics[1].size, 3);
    }

    #[test]
    fn test_lines_without_metric_names_are_ignored() {
        let data = b"# a plain comment\n\nfoo 1\n";
        let mut metrics = vec![metric("foo")];

        attribute_sizes(data, &mut metrics);
        assert_eq!(metrics[0].size, 6);
    }

    #[test]
    fn test_prefix_names_are_double_counted() {
        let data = b"http_requests 1\nhttp_requests_total 2\n";
        let mut metrics = vec![metric("http_requests"), metric("http_requests_total")];

        attribute_sizes(data, &mut metrics);
        assert_eq!(metrics[0].size, 16 + 22);
        assert_eq!(metrics[1].size, 22);
    }

    #[test]
    fn test_empty_payload() {
        let mut metrics = vec![metric("foo")];
        attribute_sizes(b"", &mut metrics);
        assert_eq!(metrics[0].size, 0);
    }

    #[test]
    fn test_contains() {
        assert!(contains(b"abc", b"b"));
        assert!(contains(b"abc", b"abc"));
        assert!(!contains(b"ab", b"abc"));
        assert!(contains(b"abc", b""));
    }
}
