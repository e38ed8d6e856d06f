//! Plotly-style chart specifications (`{ data, layout }`) as sent by the
//! analysis endpoint, plus a lenient reading of their series for snapshots.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{AnalyzerError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub layout: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Bar,
    Line,
}

/// A trace reduced to what a static rendering needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub kind: SeriesKind,
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub color: Option<String>,
}

impl ChartSpec {
    /// Decode an analysis field. The server sends the spec as a JSON string;
    /// an already-decoded object is accepted as well.
    pub fn from_field(raw: &Value) -> Result<Self> {
        match raw {
            Value::String(serialized) => Ok(serde_json::from_str(serialized)?),
            Value::Object(_) => Ok(serde_json::from_value(raw.clone())?),
            other => Err(AnalyzerError::malformed(format!(
                "chart payload must be a string, got {}",
                json_kind(other)
            ))),
        }
    }

    /// `layout.title` as either a plain string or `{ text }`.
    pub fn title(&self) -> Option<String> {
        let title = self.layout.get("title")?;
        let text = match title {
            Value::String(text) => text.as_str(),
            Value::Object(obj) => obj.get("text")?.as_str()?,
            _ => return None,
        };
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// Layout to hand to the renderer (`{}` when the server sent none).
    pub fn layout_or_empty(&self) -> Value {
        if self.layout.is_null() {
            Value::Object(Default::default())
        } else {
            self.layout.clone()
        }
    }

    /// Bar and scatter traces with numeric `y`. Other trace types and
    /// non-numeric points are skipped.
    pub fn series(&self) -> Vec<Series> {
        self.data.iter().filter_map(series_from_trace).collect()
    }
}

fn series_from_trace(trace: &Value) -> Option<Series> {
    let kind = match trace.get("type").and_then(Value::as_str).unwrap_or("scatter") {
        "bar" => SeriesKind::Bar,
        "scatter" | "scattergl" => SeriesKind::Line,
        _ => return None,
    };

    let y_values = trace.get("y")?.as_array()?;
    let x_values = trace.get("x").and_then(Value::as_array);

    let mut x = Vec::with_capacity(y_values.len());
    let mut y = Vec::with_capacity(y_values.len());
    for (idx, raw_y) in y_values.iter().enumerate() {
        let Some(value) = raw_y.as_f64() else {
            continue;
        };
        let label = x_values
            .and_then(|xs| xs.get(idx))
            .map(axis_label)
            .unwrap_or_else(|| idx.to_string());
        x.push(label);
        y.push(value);
    }

    let name = trace
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let color = trace
        .get("marker")
        .and_then(|m| m.get("color"))
        .or_else(|| trace.get("line").and_then(|l| l.get("color")))
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(Series {
        kind,
        name,
        x,
        y,
        color,
    })
}

fn axis_label(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => number.to_string(),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ratings_pages() -> ChartSpec {
        let raw = json!({
            "data": [
                { "x": ["2019", "2020"], "y": [310, 280], "type": "bar", "yaxis": "y2",
                  "marker": { "color": "rgb(55, 83, 109)" } },
                { "x": ["2019", "2020"], "y": [3.5, 4.25], "type": "scatter",
                  "mode": "lines+markers+text", "line": { "color": "rgb(59, 117, 175)" } },
                { "type": "pie", "values": [1, 2] }
            ],
            "layout": { "title": { "text": "Середні оцінки та кількість сторінок за роками" } }
        });
        ChartSpec::from_field(&Value::String(raw.to_string())).unwrap()
    }

    #[test]
    fn serialized_spec_is_decoded() {
        let spec = ratings_pages();
        assert_eq!(spec.data.len(), 3);
        assert_eq!(
            spec.title().as_deref(),
            Some("Середні оцінки та кількість сторінок за роками")
        );
    }

    #[test]
    fn series_keep_bar_and_scatter_traces() {
        let series = ratings_pages().series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].kind, SeriesKind::Bar);
        assert_eq!(series[0].color.as_deref(), Some("rgb(55, 83, 109)"));
        assert_eq!(series[1].kind, SeriesKind::Line);
        assert_eq!(series[1].y, vec![3.5, 4.25]);
        assert_eq!(series[1].color.as_deref(), Some("rgb(59, 117, 175)"));
    }

    #[test]
    fn numeric_x_values_become_integer_labels() {
        let spec = ChartSpec::from_field(&json!({
            "data": [{ "x": [2019, 2020], "y": [120, 900], "type": "bar" }],
            "layout": { "title": "Мін. та макс. кількість сторінок за роками" }
        }))
        .unwrap();
        assert_eq!(spec.series()[0].x, vec!["2019", "2020"]);
    }

    #[test]
    fn garbage_payloads_are_malformed() {
        assert!(matches!(
            ChartSpec::from_field(&json!("{not json")),
            Err(AnalyzerError::Malformed(_))
        ));
        assert!(matches!(
            ChartSpec::from_field(&json!(42)),
            Err(AnalyzerError::Malformed(_))
        ));
    }

    #[test]
    fn missing_layout_renders_as_empty_object() {
        let spec = ChartSpec::from_field(&json!("{\"data\": []}")).unwrap();
        assert_eq!(spec.layout_or_empty(), json!({}));
        assert!(spec.title().is_none());
    }
}
