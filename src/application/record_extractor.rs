// Record extraction - turns one payload into a lazy sequence of raw records
use crate::domain::error::TelemetryError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Declared encoding of a payload. Never guessed from the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputShape {
    /// JSON object whose positive-integer keys hold one record each.
    IndexedObject,
    /// Markup records wrapped in `<data>...</data>`.
    DataWrapper,
    /// Markup records wrapped in `<entry>...</entry>`.
    EntryWrapper,
}

impl InputShape {
    fn wrapper(self) -> Option<&'static str> {
        match self {
            InputShape::IndexedObject => None,
            InputShape::DataWrapper => Some("data"),
            InputShape::EntryWrapper => Some("entry"),
        }
    }
}

/// Outcome of looking up one field in a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Absent,
    Empty,
    Value(Cow<'a, str>),
}

impl FieldValue<'_> {
    pub fn text(&self) -> Option<&str> {
        match self {
            FieldValue::Value(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    /// Numeric reading of the field; anything unreadable counts as 0.0.
    pub fn number(&self) -> f64 {
        self.text().map(lenient_f64).unwrap_or(0.0)
    }
}

/// One telemetry sample before it is split into channels.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord<'a> {
    Object(Option<Map<String, Value>>),
    Markup(&'a str),
    /// Placeholder for a counted record that could not be extracted.
    Missing,
}

impl RawRecord<'_> {
    pub fn field(&self, key: &str) -> FieldValue<'_> {
        match self {
            RawRecord::Object(Some(fields)) => match fields.get(key) {
                None => FieldValue::Absent,
                Some(Value::Null) => FieldValue::Empty,
                Some(Value::String(text)) if text.is_empty() => FieldValue::Empty,
                Some(Value::String(text)) => FieldValue::Value(Cow::Borrowed(text.as_str())),
                Some(other) => FieldValue::Value(Cow::Owned(other.to_string())),
            },
            RawRecord::Object(None) | RawRecord::Missing => FieldValue::Absent,
            RawRecord::Markup(body) => markup_field(body, key),
        }
    }
}

fn markup_field<'a>(body: &'a str, tag: &str) -> FieldValue<'a> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    if let Some(start) = body.find(&open) {
        let start = start + open.len();
        if let Some(len) = body[start..].find(&close) {
            let text = &body[start..start + len];
            if text.trim().is_empty() {
                return FieldValue::Empty;
            }
            return FieldValue::Value(Cow::Borrowed(text));
        }
    }

    if body.contains(&format!("<{tag} />")) || body.contains(&format!("<{tag}/>")) {
        FieldValue::Empty
    } else {
        FieldValue::Absent
    }
}

/// Lazy record sequence bounded by the counting pass.
pub struct Records<'a> {
    count: usize,
    yielded: usize,
    source: RecordSource<'a>,
}

enum RecordSource<'a> {
    Indexed(serde_json::map::IntoIter),
    Markup(MarkupRecords<'a>),
}

impl Records<'_> {
    /// Number of records found by the counting pass.
    pub fn record_count(&self) -> usize {
        self.count
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = RawRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.yielded >= self.count {
            return None;
        }

        let record = match &mut self.source {
            RecordSource::Indexed(entries) => entries
                .find(|(key, _)| leading_int(key) > 0)
                .map(|(_, value)| match value {
                    Value::Object(fields) => RawRecord::Object(Some(fields)),
                    _ => RawRecord::Object(None),
                }),
            RecordSource::Markup(records) => match records.next_body() {
                Some(body) => Some(RawRecord::Markup(body)),
                None => {
                    tracing::warn!(
                        "Record {} of {} has no extractable body, using empty fields",
                        self.yielded + 1,
                        self.count
                    );
                    Some(RawRecord::Missing)
                }
            },
        };

        self.yielded += 1;
        record
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.count - self.yielded))
    }
}

struct MarkupRecords<'a> {
    rest: &'a str,
    open: String,
    close: String,
}

impl<'a> MarkupRecords<'a> {
    /// Body of the next complete record. A start marker without an end
    /// marker ends extraction; the remaining counted records stay empty.
    fn next_body(&mut self) -> Option<&'a str> {
        let start = self.rest.find(&self.open)?;
        let from = &self.rest[start..];
        let Some(end) = from.find(&self.close) else {
            tracing::warn!("Unterminated {} record, ignoring trailing content", self.open);
            self.rest = "";
            return None;
        };

        self.rest = &from[end + self.close.len()..];
        Some(&from[..end])
    }
}

/// Split a payload into records according to its declared shape.
pub fn extract_records(text: &str, shape: InputShape) -> Result<Records<'_>, TelemetryError> {
    let (count, source) = match shape.wrapper() {
        None => {
            let root: Value = serde_json::from_str(text)
                .map_err(|e| TelemetryError::MalformedInput(e.to_string()))?;
            let Value::Object(entries) = root else {
                return Err(TelemetryError::MalformedInput(
                    "top-level JSON value is not an object".to_string(),
                ));
            };
            let count = entries.keys().filter(|key| leading_int(key) > 0).count();
            (count, RecordSource::Indexed(entries.into_iter()))
        }
        Some(wrapper) => {
            let open = format!("<{wrapper}>");
            let count = text.matches(open.as_str()).count();
            let records = MarkupRecords {
                rest: text,
                close: format!("</{wrapper}>"),
                open,
            };
            (count, RecordSource::Markup(records))
        }
    };

    tracing::debug!("Counted {} records in {:?} payload", count, shape);

    Ok(Records {
        count,
        yielded: 0,
        source,
    })
}

/// Integer prefix of a key, `0` when there is none.
fn leading_int(key: &str) -> i64 {
    let trimmed = key.trim_start();
    let bytes = trimmed.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let magnitude = bytes[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });
    if negative { -magnitude } else { magnitude }
}

/// Longest decimal numeric prefix of `text` as a float, 0.0 when there is
/// none or it is not finite. `inf`, `nan` and hex floats read as 0.0.
pub fn lenient_f64(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_from = |from: usize| {
        bytes[from.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
