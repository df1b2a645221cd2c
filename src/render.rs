use crate::config::RenderConfig;
use crate::geometry::{Bounds, Polygon};
use crate::report::{ComparisonReport, PlacementReport};
use crate::strategy::Strategy;
use crate::text_metrics::estimate_footprint;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const TITLE_BAND: f32 = 48.0;
const HEADING_BAND: f32 = 44.0;
const LABEL_PAD_X: f32 = 8.0;
const LABEL_PAD_Y: f32 = 5.0;

/// Before/after figure: the centroid placement next to the
/// distance-transform placement.
pub fn render_placement_svg(report: &PlacementReport, theme: &Theme, config: &RenderConfig) -> String {
    let polygon = polygon_of(&report.polygon_coords);
    let panels = [
        PanelSpec {
            title: "Naive (Centroid)".to_string(),
            point: (report.result.naive_x, report.result.naive_y),
            color: theme.centroid_color.clone(),
        },
        PanelSpec {
            title: "Optimal (Distance Transform)".to_string(),
            point: (report.result.optimal_x, report.result.optimal_y),
            color: theme.max_distance_color.clone(),
        },
    ];
    render_figure(&polygon, &report.text, report.font_size, &panels, None, theme, config)
}

/// Three panels, one per strategy, with the winner starred.
pub fn render_comparison_svg(report: &ComparisonReport, theme: &Theme, config: &RenderConfig) -> String {
    let polygon = polygon_of(&report.polygon_coords);
    let panels: Vec<PanelSpec> = Strategy::ALL
        .iter()
        .map(|&strategy| {
            let candidate = report.result.candidate(strategy);
            let marker = if report.result.winner == strategy { "★ " } else { "" };
            PanelSpec {
                title: format!(
                    "{marker}{} · Edge Distance: {:.1}pt",
                    candidate.name, candidate.distance_to_boundary
                ),
                point: (candidate.x, candidate.y),
                color: theme.strategy_color(strategy).to_string(),
            }
        })
        .collect();
    render_figure(
        &polygon,
        &report.text,
        report.font_size,
        &panels,
        Some("Algorithm Comparison: Which Places Label Better?"),
        theme,
        config,
    )
}

struct PanelSpec {
    title: String,
    point: (f64, f64),
    color: String,
}

/// Maps world coordinates into one panel: uniform scale, y up.
struct PanelFrame {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    scale: f32,
    bounds: Bounds,
}

impl PanelFrame {
    fn new(left: f32, top: f32, bounds: Bounds, config: &RenderConfig) -> Self {
        let width = config.panel_width;
        let height = config.panel_height - TITLE_BAND;
        let avail_w = (width - 2.0 * config.panel_padding).max(1.0);
        let avail_h = (height - 2.0 * config.panel_padding).max(1.0);
        let span_w = (bounds.width() as f32).max(1e-3);
        let span_h = (bounds.height() as f32).max(1e-3);
        let scale = (avail_w / span_w).min(avail_h / span_h);
        Self {
            left,
            top: top + TITLE_BAND,
            width,
            height,
            scale,
            bounds,
        }
    }

    fn map(&self, x: f64, y: f64) -> (f32, f32) {
        let cx = (self.bounds.min_x + self.bounds.max_x) / 2.0;
        let cy = (self.bounds.min_y + self.bounds.max_y) / 2.0;
        let px = self.left + self.width / 2.0 + (x - cx) as f32 * self.scale;
        let py = self.top + self.height / 2.0 - (y - cy) as f32 * self.scale;
        (px, py)
    }
}

fn render_figure(
    polygon: &Polygon,
    text: &str,
    font_size: u32,
    panels: &[PanelSpec],
    heading: Option<&str>,
    theme: &Theme,
    config: &RenderConfig,
) -> String {
    let heading_h = if heading.is_some() { HEADING_BAND } else { 0.0 };
    let width = config.panel_width * panels.len() as f32;
    let height = config.panel_height + heading_h;
    let bounds = polygon.bounds();

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    if let Some(heading) = heading {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            width / 2.0,
            HEADING_BAND * 0.65,
            theme.font_family,
            theme.heading_font_size,
            theme.title_color,
            escape_xml(heading)
        ));
    }

    let outline = polygon_path(polygon);
    for (idx, panel) in panels.iter().enumerate() {
        let left = idx as f32 * config.panel_width;
        let frame = PanelFrame::new(left, heading_h, bounds, config);

        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            left + config.panel_width / 2.0,
            heading_h + TITLE_BAND * 0.6,
            theme.font_family,
            theme.title_font_size,
            theme.title_color,
            escape_xml(&panel.title)
        ));

        let d = points_to_path(&outline.iter().map(|&(x, y)| frame.map(x, y)).collect::<Vec<_>>());
        svg.push_str(&format!(
            "<path d=\"{d} Z\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            theme.polygon_fill,
            theme.polygon_fill_opacity,
            theme.polygon_stroke,
            theme.polygon_stroke_width
        ));

        let (px, py) = frame.map(panel.point.0, panel.point.1);
        svg.push_str(&label_svg(px, py, text, font_size, &panel.color, theme));
        svg.push_str(&format!(
            "<circle cx=\"{px:.2}\" cy=\"{py:.2}\" r=\"{}\" fill=\"{}\"/>",
            config.marker_radius, panel.color
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn label_svg(x: f32, y: f32, text: &str, font_size: u32, color: &str, theme: &Theme) -> String {
    let footprint = estimate_footprint(text, font_size);
    let w = footprint.width as f32 + 2.0 * LABEL_PAD_X;
    let h = footprint.height as f32 + 2.0 * LABEL_PAD_Y;
    let mut out = String::new();
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"6\" ry=\"6\" fill=\"{}\" fill-opacity=\"{}\"/>",
        x - w / 2.0,
        y - h / 2.0,
        theme.label_background,
        theme.label_background_opacity
    ));
    out.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{font_size}\" font-weight=\"bold\" fill=\"{color}\">{}</text>",
        theme.font_family,
        escape_xml(text)
    ));
    out
}

fn polygon_of(coords: &[[f64; 2]]) -> Polygon {
    Polygon::from_coords(&coords.iter().map(|&[x, y]| (x, y)).collect::<Vec<_>>())
}

fn polygon_path(polygon: &Polygon) -> Vec<(f64, f64)> {
    polygon.points().iter().map(|p| (p.x, p.y)).collect()
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = render_cfg.scale.max(0.1);
    let size = tree.size().to_int_size();
    let width = (size.width() as f32 * scale).ceil() as u32;
    let height = (size.height() as f32 * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
