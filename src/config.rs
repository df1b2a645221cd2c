use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Clearance added to the label extent before it counts as fitting.
pub const DEFAULT_PADDING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub padding: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
        }
    }
}

impl PlacementConfig {
    /// Padding must be a finite, non-negative number.
    pub fn with_padding(padding: f64) -> anyhow::Result<Self> {
        if !padding.is_finite() || padding < 0.0 {
            return Err(anyhow::anyhow!(
                "padding must be a non-negative number, got {padding}"
            ));
        }
        Ok(Self { padding })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Size of one figure panel in pixels.
    pub panel_width: f32,
    pub panel_height: f32,
    /// Space between the polygon and the panel edge.
    pub panel_padding: f32,
    pub marker_radius: f32,
    /// Output scale for PNG export.
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            panel_width: 600.0,
            panel_height: 500.0,
            panel_padding: 40.0,
            marker_radius: 5.0,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub placement: PlacementConfig,
    pub theme: Theme,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    title_font_size: Option<f32>,
    polygon_fill: Option<String>,
    polygon_stroke: Option<String>,
    label_background: Option<String>,
    centroid_color: Option<String>,
    max_distance_color: Option<String>,
    weighted_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    panel_width: Option<f32>,
    panel_height: Option<f32>,
    panel_padding: Option<f32>,
    marker_radius: Option<f32>,
    scale: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    padding: Option<f64>,
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Strict JSON first; JSON5 (comments, trailing commas) as a fallback.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(strict_err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("invalid config: {strict_err}"))?,
    };

    let mut config = Config::default();

    if let Some(padding) = parsed.padding {
        config.placement = PlacementConfig::with_padding(padding)?;
    }

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.title_font_size {
            config.theme.title_font_size = v;
        }
        if let Some(v) = vars.polygon_fill {
            config.theme.polygon_fill = v;
        }
        if let Some(v) = vars.polygon_stroke {
            config.theme.polygon_stroke = v;
        }
        if let Some(v) = vars.label_background {
            config.theme.label_background = v;
        }
        if let Some(v) = vars.centroid_color {
            config.theme.centroid_color = v;
        }
        if let Some(v) = vars.max_distance_color {
            config.theme.max_distance_color = v;
        }
        if let Some(v) = vars.weighted_color {
            config.theme.weighted_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.panel_width {
            config.render.panel_width = v;
        }
        if let Some(v) = render.panel_height {
            config.render.panel_height = v;
        }
        if let Some(v) = render.panel_padding {
            config.render.panel_padding = v;
        }
        if let Some(v) = render.marker_radius {
            config.render.marker_radius = v;
        }
        if let Some(v) = render.scale {
            config.render.scale = v;
        }
    }

    Ok(config)
}
