use crate::Result;
use crate::summary::ScrapeSummary;
use core::fmt::Write;

pub fn generate<W: Write>(summary: &ScrapeSummary, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(summary)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarize_scrape;
    use serde_json::Value;

    fn render(data: &[u8]) -> Value {
        let mut output = String::new();
        generate(&summarize_scrape(data), &mut output).unwrap();
        assert!(output.ends_with("}\n"));
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn test_shape() {
        let value = render(b"# HELP jobs Queued jobs.\n# TYPE jobs gauge\njobs{queue=\"a\"} 3\njobs{queue=\"b\"} 1\n");

        let summary = &value["summary"];
        assert_eq!(summary["bytes"], 79);
        assert_eq!(summary["top_cardinalities"][0]["name"], "jobs");
        assert_eq!(summary["top_cardinalities"][0]["cardinality"], 2);
        assert_eq!(summary["types_count"]["gauge"], 1);
        assert_eq!(summary["label_counts"]["<none>"], 0);
        assert_eq!(summary["label_counts"]["queue"], 1);
        assert_eq!(summary["label_value_counts"]["queue"], 2);

        let metric = &value["metrics"][0];
        assert_eq!(metric["name"], "jobs");
        assert_eq!(metric["type"], "GAUGE");
        assert_eq!(metric["description"], "Queued jobs.");
        assert_eq!(metric["labels"], serde_json::json!(["queue"]));
        assert_eq!(metric["size"], 79);
    }

    #[test]
    fn test_empty_lists_are_arrays() {
        let value = render(b"");

        assert_eq!(value["metrics"], serde_json::json!([]));
        assert_eq!(value["summary"]["top_cardinalities"], serde_json::json!([]));
        assert_eq!(value["summary"]["types_count"], serde_json::json!({}));
        assert_eq!(value["summary"]["label_counts"], serde_json::json!({ "<none>": 0 }));
    }

    #[test]
    fn test_metric_without_labels_has_empty_label_list() {
        let value = render(b"up 1\n");
        assert_eq!(value["metrics"][0]["labels"], serde_json::json!([]));
        assert_eq!(value["metrics"][0]["type"], "UNTYPED");
    }
}
