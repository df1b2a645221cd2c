use river_label::report::{ComparisonReport, ErrorReport, PlacementReport};
use river_label::{Labeler, PlacementConfig, PlacementRequest};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LabelOptions {
    padding: Option<f64>,
}

fn build_labeler(options_json: Option<String>) -> Result<Labeler, String> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<LabelOptions>(&raw).map_err(|error| error.to_string())?,
        None => LabelOptions::default(),
    };
    let config = match options.padding {
        Some(padding) => PlacementConfig::with_padding(padding).map_err(|error| error.to_string())?,
        None => PlacementConfig::default(),
    };
    Ok(Labeler::new(config))
}

/// Validation failures come back as `{"error": ...}` so the page can show
/// them like any other response.
fn place_json(request: &str, options_json: Option<String>) -> Result<String, String> {
    let labeler = build_labeler(options_json)?;
    let request = PlacementRequest::from_json(request).map_err(|error| error.to_string())?;
    let json = match request.normalize() {
        Err(err) => serde_json::to_string(&ErrorReport::new(err)),
        Ok(norm) => match labeler.place_label(&norm.coordinates, &norm.label_text, norm.font_size) {
            Ok(result) => serde_json::to_string(&PlacementReport::new(result, &norm)),
            Err(err) => serde_json::to_string(&ErrorReport::new(err)),
        },
    };
    json.map_err(|error| error.to_string())
}

fn compare_json(request: &str, options_json: Option<String>) -> Result<String, String> {
    let labeler = build_labeler(options_json)?;
    let request = PlacementRequest::from_json(request).map_err(|error| error.to_string())?;
    let json = match request.normalize() {
        Err(err) => serde_json::to_string(&ErrorReport::new(err)),
        Ok(norm) => {
            match labeler.compare_algorithms(&norm.coordinates, &norm.label_text, norm.font_size) {
                Ok(result) => serde_json::to_string(&ComparisonReport::new(result, &norm)),
                Err(err) => serde_json::to_string(&ErrorReport::new(err)),
            }
        }
    };
    json.map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn place_label_json(request: &str, options_json: Option<String>) -> Result<String, JsValue> {
    place_json(request, options_json).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn compare_algorithms_json(request: &str, options_json: Option<String>) -> Result<String, JsValue> {
    compare_json(request, options_json).map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use crate::{compare_json, place_json};

    #[test]
    fn places_square_river() {
        let json = place_json(
            r#"{"coordinates": [[0, 0], [0, 10], [10, 10], [10, 0]], "label_text": "A", "font_size": 4}"#,
            None,
        )
        .expect("square places");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["optimal_x"], 5.0);
        assert_eq!(value["fits_inside"], true);
    }

    #[test]
    fn reports_too_few_points_as_error_json() {
        let json = compare_json(r#"{"coordinates": [[0, 0], [1, 1]]}"#, None).expect("error json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["error"], "Need at least 3 points, got 2");
    }

    #[test]
    fn padding_option_changes_fit() {
        let request = r#"{"coordinates": [[0, 0], [0, 10], [10, 10], [10, 0]], "label_text": "A", "font_size": 10}"#;
        let strict: serde_json::Value =
            serde_json::from_str(&place_json(request, None).expect("places")).expect("valid json");
        let loose: serde_json::Value =
            serde_json::from_str(&place_json(request, Some(r#"{"padding": 0}"#.to_string())).expect("places"))
                .expect("valid json");
        assert_eq!(strict["fits_inside"], false);
        assert_eq!(loose["fits_inside"], true);
    }

    #[test]
    fn negative_padding_is_rejected() {
        let request = r#"{"coordinates": [[0, 0], [0, 10], [10, 10], [10, 0]], "label_text": "A", "font_size": 10}"#;
        let err = place_json(request, Some(r#"{"padding": -3}"#.to_string())).unwrap_err();
        assert_eq!(err, "padding must be a non-negative number, got -3");
        assert!(compare_json(request, Some(r#"{"padding": -0.5}"#.to_string())).is_err());
    }

    #[test]
    fn oversized_polygon_reports_error_json() {
        let json = place_json(r#"{"coordinates": [[0, 0], [1e12, 0], [0, 1e12]]}"#, None).expect("error json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let message = value["error"].as_str().expect("error message");
        assert!(message.starts_with("Polygon extent too large"), "{message}");
    }
}
