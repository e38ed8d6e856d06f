//! Wire types for the two backend calls and the analysis payload.
//!
//! ```text
//! POST /upload   multipart `file`          -> { success, filename?, message? }
//! POST /analyze  { "filename": <handle> }  -> { success, analysis?, message? }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::chart::ChartSpec;
use super::error::{AnalyzerError, Result};

/// Opaque identifier of an uploaded file, as issued by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle(String);

impl FileHandle {
    /// Blank identifiers are not handles.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A user-chosen file, read into memory before upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadReply {
    pub fn into_handle(self) -> Result<FileHandle> {
        if !self.success {
            return Err(AnalyzerError::Rejected {
                message: self.message,
            });
        }
        self.filename
            .and_then(FileHandle::new)
            .ok_or_else(|| AnalyzerError::malformed("upload succeeded without a filename"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub filename: &'a str,
}

impl<'a> AnalyzeRequest<'a> {
    pub fn for_handle(handle: &'a FileHandle) -> Self {
        Self {
            filename: handle.as_str(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalyzeReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub analysis: Option<Map<String, Value>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AnalyzeReply {
    pub fn into_analysis(self) -> Result<Analysis> {
        if !self.success {
            return Err(AnalyzerError::Rejected {
                message: self.message,
            });
        }
        self.analysis
            .map(Analysis::new)
            .ok_or_else(|| AnalyzerError::malformed("analysis succeeded without a payload"))
    }
}

/// Server-computed statistics. Only lives until it has been rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    fields: Map<String, Value>,
}

/// One year of the year → read-count mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct YearCount {
    pub year: i64,
    pub count: f64,
}

impl Analysis {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Year counts under `key`, ascending by year, one entry per year. Keys
    /// naming the same year (`"2020"`, `"2020.0"`) are summed. `None` when
    /// absent.
    pub fn year_counts(&self, key: &str) -> Result<Option<Vec<YearCount>>> {
        let Some(value) = self.fields.get(key).filter(|v| !v.is_null()) else {
            return Ok(None);
        };
        let map = value
            .as_object()
            .ok_or_else(|| AnalyzerError::malformed(format!("`{key}` is not an object")))?;

        let mut counts: Vec<YearCount> = Vec::with_capacity(map.len());
        for (raw_year, raw_count) in map {
            let Some(year) = parse_leading_int(raw_year) else {
                tracing::warn!("skipping non-numeric year key {raw_year:?}");
                continue;
            };
            let count = count_value(raw_count).ok_or_else(|| {
                AnalyzerError::malformed(format!("count for {raw_year} is not a number"))
            })?;
            match counts.iter_mut().find(|entry| entry.year == year) {
                Some(entry) => entry.count += count,
                None => counts.push(YearCount { year, count }),
            }
        }
        counts.sort_by_key(|entry| entry.year);
        Ok(Some(counts))
    }

    /// Chart specification under `field`. `None` when absent.
    pub fn chart(&self, field: &str) -> Result<Option<ChartSpec>> {
        match self.fields.get(field).filter(|v| !v.is_null()) {
            Some(value) => ChartSpec::from_field(value).map(Some),
            None => Ok(None),
        }
    }
}

/// Integer prefix of `raw`, the way `parseInt` reads it ("2020.0" -> 2020).
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

fn count_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analysis(value: Value) -> Analysis {
        match value {
            Value::Object(map) => Analysis::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn upload_reply_without_success_is_a_rejection() {
        let reply: UploadReply =
            serde_json::from_value(json!({ "success": false, "message": "bad format" })).unwrap();
        assert_eq!(
            reply.into_handle(),
            Err(AnalyzerError::Rejected {
                message: Some("bad format".into())
            })
        );
    }

    #[test]
    fn upload_success_needs_a_filename() {
        let reply: UploadReply = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(matches!(reply.into_handle(), Err(AnalyzerError::Malformed(_))));

        let reply: UploadReply =
            serde_json::from_value(json!({ "success": true, "filename": "f" })).unwrap();
        assert_eq!(reply.into_handle().unwrap().as_str(), "f");
    }

    #[test]
    fn analyze_request_body_carries_the_handle() {
        let handle = FileHandle::new("books_3f2a.csv").unwrap();
        let body = serde_json::to_value(AnalyzeRequest::for_handle(&handle)).unwrap();
        assert_eq!(body, json!({ "filename": "books_3f2a.csv" }));
    }

    #[test]
    fn year_counts_read_like_parse_int_and_sort() {
        let analysis = analysis(json!({
            "Книг прочитано за роками": { "2021.0": 5, "2019": "2", "2020": 3.0, "n/a": 1 }
        }));

        let counts = analysis
            .year_counts("Книг прочитано за роками")
            .unwrap()
            .unwrap();
        let years: Vec<i64> = counts.iter().map(|c| c.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021]);
        assert_eq!(counts[0].count, 2.0);
        assert_eq!(counts[2].count, 5.0);
    }

    #[test]
    fn keys_naming_the_same_year_are_merged() {
        let analysis = analysis(json!({
            "Книг прочитано за роками": { "2020": 3, "2020.0": 2, "2021": 1 }
        }));

        let counts = analysis
            .year_counts("Книг прочитано за роками")
            .unwrap()
            .unwrap();
        assert_eq!(
            counts,
            vec![
                YearCount { year: 2020, count: 5.0 },
                YearCount { year: 2021, count: 1.0 },
            ]
        );
    }

    #[test]
    fn non_numeric_count_is_malformed() {
        let analysis = analysis(json!({ "years": { "2020": [1] } }));
        assert!(matches!(
            analysis.year_counts("years"),
            Err(AnalyzerError::Malformed(_))
        ));
    }

    #[test]
    fn absent_fields_are_none() {
        let analysis = analysis(json!({ "year_graph": null }));
        assert!(analysis.year_counts("years").unwrap().is_none());
        assert!(analysis.chart("year_graph").unwrap().is_none());
    }

    #[test]
    fn leading_int_parsing() {
        assert_eq!(parse_leading_int("2020"), Some(2020));
        assert_eq!(parse_leading_int(" 2020.0"), Some(2020));
        assert_eq!(parse_leading_int("-12abc"), Some(-12));
        assert_eq!(parse_leading_int("year"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
