use serde::{Deserialize, Serialize};

use crate::strategy::Strategy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub title_font_size: f32,
    pub heading_font_size: f32,
    pub polygon_fill: String,
    pub polygon_fill_opacity: f32,
    pub polygon_stroke: String,
    pub polygon_stroke_width: f32,
    pub label_background: String,
    pub label_background_opacity: f32,
    pub title_color: String,
    pub centroid_color: String,
    pub max_distance_color: String,
    pub weighted_color: String,
    pub background: String,
}

impl Theme {
    /// Red / green / blue strategy colors on a light blue river, the palette
    /// of the original comparison figures.
    pub fn classic() -> Self {
        Self {
            font_family: "DejaVu Sans, Verdana, Arial, sans-serif".to_string(),
            title_font_size: 14.0,
            heading_font_size: 16.0,
            polygon_fill: "#ADD8E6".to_string(),
            polygon_fill_opacity: 1.0,
            polygon_stroke: "#0000FF".to_string(),
            polygon_stroke_width: 2.0,
            label_background: "#FFFF00".to_string(),
            label_background_opacity: 0.8,
            title_color: "#000000".to_string(),
            centroid_color: "#FF0000".to_string(),
            max_distance_color: "#008000".to_string(),
            weighted_color: "#0000FF".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            title_font_size: 13.0,
            heading_font_size: 15.0,
            polygon_fill: "#CFE8F7".to_string(),
            polygon_fill_opacity: 0.85,
            polygon_stroke: "#3B82C4".to_string(),
            polygon_stroke_width: 1.6,
            label_background: "#FFF6C2".to_string(),
            label_background_opacity: 0.9,
            title_color: "#1C2430".to_string(),
            centroid_color: "#D64545".to_string(),
            max_distance_color: "#2F9E60".to_string(),
            weighted_color: "#3468C0".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn strategy_color(&self, strategy: Strategy) -> &str {
        match strategy {
            Strategy::Centroid => &self.centroid_color,
            Strategy::MaxDistance => &self.max_distance_color,
            Strategy::Weighted => &self.weighted_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
