use super::{BUCKET_LABEL, Bucket, Instance, LabelPair, MetricFamily, MetricType, QUANTILE_LABEL, Quantile};
use crate::Result;
use ohno::{IntoAppError, app_err};
use std::collections::{BTreeMap, HashMap};

/// Errors raised while decoding a single line, before the line number is attached.
type LineResult<T> = core::result::Result<T, String>;

const BLANKS: [char; 2] = [' ', '\t'];

/// Decode a text exposition payload into metric families keyed by name.
///
/// # Errors
///
/// Returns an error naming the offending line if the payload is not valid UTF-8 or
/// does not follow the text exposition format.
pub fn decode(data: &[u8]) -> Result<BTreeMap<String, MetricFamily>> {
    let text = core::str::from_utf8(data).into_app_err("exposition payload is not valid UTF-8")?;

    let mut decoder = Decoder::default();
    for (index, raw_line) in text.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        decoder
            .decode_line(line)
            .map_err(|msg| app_err!("line {}: {msg}", index + 1))?;
    }

    let families = decoder.finish();
    log::debug!("decoded {} metric families from {} bytes", families.len(), data.len());
    Ok(families)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleRole {
    Plain,
    Bucket,
    Sum,
    Count,
}

#[derive(Debug)]
struct Sample<'a> {
    name: &'a str,
    labels: Vec<LabelPair>,
    value: f64,
    timestamp_ms: Option<i64>,
}

#[derive(Debug)]
struct FamilyBuilder {
    family: MetricFamily,
    saw_help: bool,
    saw_type: bool,
    by_labels: HashMap<Vec<LabelPair>, usize>,
}

impl FamilyBuilder {
    fn new(name: &str) -> Self {
        Self {
            family: MetricFamily::new(name),
            saw_help: false,
            saw_type: false,
            by_labels: HashMap::new(),
        }
    }

    /// The instance shared by every bucket, quantile, sum and count with these labels.
    fn grouped_instance(&mut self, labels: Vec<LabelPair>) -> &mut Instance {
        let instances = &mut self.family.instances;
        let index = *self.by_labels.entry(labels).or_insert_with_key(|labels| {
            instances.push(Instance::with_labels(labels.clone()));
            instances.len() - 1
        });

        &mut instances[index]
    }
}

#[derive(Debug, Default)]
struct Decoder {
    families: BTreeMap<String, FamilyBuilder>,
}

impl Decoder {
    fn decode_line(&mut self, line: &str) -> LineResult<()> {
        let line = line.trim_start_matches(BLANKS);
        if line.is_empty() {
            return Ok(());
        }

        if let Some(comment) = line.strip_prefix('#') {
            return self.decode_comment(comment);
        }

        let sample = parse_sample(line)?;
        self.add_sample(sample)
    }

    fn decode_comment(&mut self, comment: &str) -> LineResult<()> {
        let mut tokens = comment.trim_start_matches(BLANKS).splitn(2, BLANKS);
        let keyword = tokens.next().unwrap_or_default();
        if keyword != "HELP" && keyword != "TYPE" {
            // plain comment
            return Ok(());
        }

        let rest = tokens.next().unwrap_or_default().trim_start_matches(BLANKS);
        let (name, text) = rest.split_once(BLANKS).unwrap_or((rest, ""));
        if !is_metric_name(name) {
            return Err(format!("invalid metric name '{name}' in {keyword} comment"));
        }

        let builder = self.family(name);
        if keyword == "HELP" {
            if builder.saw_help {
                return Err(format!("second HELP line for metric name '{name}'"));
            }

            builder.family.help = unescape_help(text.trim_start_matches(BLANKS))?;
            builder.saw_help = true;
        } else {
            if builder.saw_type {
                return Err(format!("second TYPE line for metric name '{name}'"));
            }

            if !builder.family.instances.is_empty() {
                return Err(format!("TYPE line for metric name '{name}' appears after its samples"));
            }

            let token = text.trim_matches(BLANKS);
            builder.family.metric_type = match token.parse::<MetricType>() {
                Ok(metric_type) => metric_type,
                Err(_) => return Err(format!("unknown metric type '{token}' for metric name '{name}'")),
            };
            builder.saw_type = true;
        }

        Ok(())
    }

    fn add_sample(&mut self, sample: Sample<'_>) -> LineResult<()> {
        let Sample {
            name,
            mut labels,
            value,
            timestamp_ms,
        } = sample;

        let (family_name, role) = self.resolve(name);
        let builder = self.family(family_name);

        match role {
            SampleRole::Bucket => {
                let upper_bound = take_float_label(&mut labels, BUCKET_LABEL, name)?;
                labels.sort();
                builder.grouped_instance(labels).buckets.push(Bucket {
                    upper_bound,
                    cumulative_count: value,
                });
            }
            SampleRole::Sum => {
                labels.sort();
                builder.grouped_instance(labels).sum = Some(value);
            }
            SampleRole::Count => {
                labels.sort();
                builder.grouped_instance(labels).count = Some(value);
            }
            SampleRole::Plain => match builder.family.metric_type {
                MetricType::Summary => {
                    let quantile = take_float_label(&mut labels, QUANTILE_LABEL, name)?;
                    labels.sort();
                    builder.grouped_instance(labels).quantiles.push(Quantile { quantile, value });
                }
                MetricType::Histogram => {
                    return Err(format!(
                        "sample '{name}' of a histogram needs a _bucket, _sum or _count suffix"
                    ));
                }
                MetricType::Counter | MetricType::Gauge | MetricType::Untyped => {
                    labels.sort();
                    builder.family.instances.push(Instance {
                        labels,
                        value: Some(value),
                        timestamp_ms,
                        ..Instance::default()
                    });
                }
            },
        }

        Ok(())
    }

    /// Find the family a sample belongs to, folding histogram and summary suffixes into their base.
    fn resolve<'n>(&self, name: &'n str) -> (&'n str, SampleRole) {
        let declared = |base: &str| self.families.get(base).map(|builder| builder.family.metric_type);

        if let Some(base) = name.strip_suffix("_bucket")
            && declared(base) == Some(MetricType::Histogram)
        {
            return (base, SampleRole::Bucket);
        }

        for (suffix, role) in [("_sum", SampleRole::Sum), ("_count", SampleRole::Count)] {
            if let Some(base) = name.strip_suffix(suffix)
                && declared(base).is_some_and(MetricType::is_distribution)
            {
                return (base, role);
            }
        }

        (name, SampleRole::Plain)
    }

    fn family(&mut self, name: &str) -> &mut FamilyBuilder {
        self.families
            .entry(name.to_string())
            .or_insert_with(|| FamilyBuilder::new(name))
    }

    fn finish(self) -> BTreeMap<String, MetricFamily> {
        self.families
            .into_iter()
            .filter(|(_, builder)| !builder.family.instances.is_empty())
            .map(|(name, builder)| (name, builder.family))
            .collect()
    }
}

fn parse_sample(line: &str) -> LineResult<Sample<'_>> {
    let name_len = line.find(|c: char| !is_name_char(c, true)).unwrap_or(line.len());
    let (name, rest) = line.split_at(name_len);
    if !is_metric_name(name) {
        return Err(format!("invalid metric name in sample line '{line}'"));
    }

    let rest = rest.trim_start_matches(BLANKS);
    let (labels, rest) = match rest.strip_prefix('{') {
        Some(body) => parse_labels(body)?,
        None => (Vec::new(), rest),
    };

    let mut fields = rest.split_ascii_whitespace();
    let value_token = fields.next().ok_or_else(|| format!("missing value for metric '{name}'"))?;
    let value = value_token
        .parse::<f64>()
        .map_err(|e| format!("invalid value '{value_token}' for metric '{name}': {e}"))?;

    let timestamp_ms = match fields.next() {
        Some(token) => Some(
            token
                .parse::<i64>()
                .map_err(|e| format!("invalid timestamp '{token}' for metric '{name}': {e}"))?,
        ),
        None => None,
    };

    if let Some(extra) = fields.next() {
        return Err(format!("unexpected token '{extra}' after sample of metric '{name}'"));
    }

    Ok(Sample {
        name,
        labels,
        value,
        timestamp_ms,
    })
}

/// Parse `name="value",...}` and return the labels plus whatever follows the closing brace.
fn parse_labels(body: &str) -> LineResult<(Vec<LabelPair>, &str)> {
    let mut labels: Vec<LabelPair> = Vec::new();
    let mut rest = body;

    loop {
        rest = rest.trim_start_matches(BLANKS);
        if let Some(after) = rest.strip_prefix('}') {
            return Ok((labels, after));
        }

        if rest.is_empty() {
            return Err("unterminated label set".to_string());
        }

        let name_len = rest.find(|c: char| !is_name_char(c, false)).unwrap_or(rest.len());
        let (name, after) = rest.split_at(name_len);
        if !is_label_name(name) {
            return Err(format!("invalid label name in '{{{body}'"));
        }

        let after = after
            .trim_start_matches(BLANKS)
            .strip_prefix('=')
            .ok_or_else(|| format!("expected '=' after label name '{name}'"))?;
        let after = after
            .trim_start_matches(BLANKS)
            .strip_prefix('"')
            .ok_or_else(|| format!("expected '\"' to start the value of label '{name}'"))?;
        let (value, after) = parse_quoted(after).map_err(|msg| format!("{msg} for label '{name}'"))?;

        if labels.iter().any(|label| label.name == name) {
            return Err(format!("duplicate label name '{name}'"));
        }
        labels.push(LabelPair::new(name, value));

        let after = after.trim_start_matches(BLANKS);
        rest = if let Some(next) = after.strip_prefix(',') {
            next
        } else if after.starts_with('}') {
            after
        } else {
            return Err(format!("expected ',' or '}}' after the value of label '{name}'"));
        };
    }
}

/// Read a label value up to its closing quote, resolving escapes.
fn parse_quoted(text: &str) -> LineResult<(String, &str)> {
    let mut value = String::new();
    let mut chars = text.char_indices();

    while let Some((index, c)) = chars.next() {
        match c {
            '"' => return Ok((value, text.split_at(index + 1).1)),
            '\\' => match chars.next() {
                Some((_, '\\')) => value.push('\\'),
                Some((_, '"')) => value.push('"'),
                Some((_, 'n')) => value.push('\n'),
                Some((_, other)) => return Err(format!("invalid escape sequence '\\{other}'")),
                None => break,
            },
            _ => value.push(c),
        }
    }

    Err("unterminated label value".to_string())
}

fn unescape_help(text: &str) -> LineResult<String> {
    let mut help = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            help.push(c);
            continue;
        }

        match chars.next() {
            Some('\\') => help.push('\\'),
            Some('n') => help.push('\n'),
            Some(other) => return Err(format!("invalid escape sequence '\\{other}' in HELP text")),
            None => return Err("HELP text ends with a lone backslash".to_string()),
        }
    }

    Ok(help)
}

/// Remove a structural label and parse its value as a float.
fn take_float_label(labels: &mut Vec<LabelPair>, label: &str, metric: &str) -> LineResult<f64> {
    let index = labels
        .iter()
        .position(|pair| pair.name == label)
        .ok_or_else(|| format!("sample '{metric}' is missing the '{label}' label"))?;
    let pair = labels.remove(index);

    pair.value
        .parse::<f64>()
        .map_err(|e| format!("invalid '{label}' value '{}' for sample '{metric}': {e}", pair.value))
}

const fn is_name_char(c: char, allow_colon: bool) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || (allow_colon && c == ':')
}

fn is_metric_name(name: &str) -> bool {
    name.chars().next().is_some_and(|first| !first.is_ascii_digit()) && name.chars().all(|c| is_name_char(c, true))
}

fn is_label_name(name: &str) -> bool {
    name.chars().next().is_some_and(|first| !first.is_ascii_digit()) && name.chars().all(|c| is_name_char(c, false))
}
