//! Caller-side request handling: accepts loosely shaped payloads and
//! normalizes them before they reach the placement engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_LABEL: &str = "RIVER";
pub const DEFAULT_FONT_SIZE: u32 = 24;
pub const MIN_FONT_SIZE: i64 = 1;
pub const MAX_FONT_SIZE: i64 = 200;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("No coordinates provided.")]
    MissingCoordinates,
    #[error("invalid request: {0}")]
    Json(#[from] serde_json::Error),
}

/// A coordinate pair as `[x, y]` or `{"x": x, "y": y}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Pair([f64; 2]),
    Object { x: f64, y: f64 },
}

impl Coordinate {
    pub fn as_tuple(self) -> (f64, f64) {
        match self {
            Coordinate::Pair([x, y]) => (x, y),
            Coordinate::Object { x, y } => (x, y),
        }
    }
}

/// Font size as sent by callers; fractional values are truncated and
/// form fields may send it as a string of digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSize {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FontSize {
    /// `None` when a text value is not an integer.
    fn as_integer(&self) -> Option<i64> {
        match self {
            FontSize::Integer(v) => Some(*v),
            FontSize::Float(v) => Some(v.trunc() as i64),
            FontSize::Text(raw) => raw.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub label_text: Option<String>,
    #[serde(default)]
    pub font_size: Option<FontSize>,
}

/// Request after defaults and clamping; what the engine is called with.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRequest {
    pub coordinates: Vec<(f64, f64)>,
    pub label_text: String,
    pub font_size: u32,
}

impl PlacementRequest {
    pub fn from_json(input: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Applies the defaults: blank labels become [`DEFAULT_LABEL`], missing,
    /// unparsable or out-of-range font sizes become [`DEFAULT_FONT_SIZE`]. Too few
    /// points are left for the engine to reject.
    pub fn normalize(&self) -> Result<NormalizedRequest, RequestError> {
        if self.coordinates.is_empty() {
            return Err(RequestError::MissingCoordinates);
        }
        let label_text = self
            .label_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_LABEL)
            .to_string();
        let font_size = self
            .font_size
            .as_ref()
            .and_then(FontSize::as_integer)
            .filter(|size| (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(size))
            .map_or(DEFAULT_FONT_SIZE, |size| size as u32);

        Ok(NormalizedRequest {
            coordinates: self.coordinates.iter().map(|c| c.as_tuple()).collect(),
            label_text,
            font_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pairs_and_objects() {
        let pairs = PlacementRequest::from_json(r#"{"coordinates": [[0, 0], [100, 50], [200, 0]]}"#)
            .expect("pairs parse");
        let objects = PlacementRequest::from_json(
            r#"{"coordinates": [{"x": 0, "y": 0}, {"x": 100, "y": 50}, {"x": 200, "y": 0}]}"#,
        )
        .expect("objects parse");
        assert_eq!(
            pairs.normalize().expect("normalizes").coordinates,
            objects.normalize().expect("normalizes").coordinates
        );
    }

    #[test]
    fn applies_defaults() {
        let req = PlacementRequest::from_json(r#"{"coordinates": [[0, 0], [1, 0], [0, 1]], "label_text": "   "}"#)
            .expect("parses");
        let norm = req.normalize().expect("normalizes");
        assert_eq!(norm.label_text, DEFAULT_LABEL);
        assert_eq!(norm.font_size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn out_of_range_font_size_resets() {
        for (raw, expected) in [("0", 24), ("201", 24), ("-5", 24), ("1", 1), ("200", 200), ("36.7", 36)] {
            let json = format!(r#"{{"coordinates": [[0, 0], [1, 0], [0, 1]], "font_size": {raw}}}"#);
            let norm = PlacementRequest::from_json(&json)
                .expect("parses")
                .normalize()
                .expect("normalizes");
            assert_eq!(norm.font_size, expected, "font_size {raw}");
        }
    }

    #[test]
    fn numeric_string_font_size_is_accepted() {
        for (raw, expected) in [(r#""30""#, 30), (r#"" 48 ""#, 48), (r#""500""#, 24), (r#""large""#, 24), (r#""12.5""#, 24)] {
            let json = format!(r#"{{"coordinates": [[0, 0], [1, 0], [0, 1]], "font_size": {raw}}}"#);
            let norm = PlacementRequest::from_json(&json)
                .expect("parses")
                .normalize()
                .expect("normalizes");
            assert_eq!(norm.font_size, expected, "font_size {raw}");
        }
    }

    #[test]
    fn trims_label() {
        let req = PlacementRequest {
            coordinates: vec![Coordinate::Pair([0.0, 0.0])],
            label_text: Some("  Danube ".to_string()),
            font_size: None,
        };
        assert_eq!(req.normalize().expect("normalizes").label_text, "Danube");
    }

    #[test]
    fn rejects_missing_coordinates() {
        let req = PlacementRequest::from_json("{}").expect("parses");
        assert!(matches!(req.normalize(), Err(RequestError::MissingCoordinates)));
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let err = PlacementRequest::from_json(r#"{"coordinates": [["a", 1]]}"#);
        assert!(matches!(err, Err(RequestError::Json(_))));
    }
}
