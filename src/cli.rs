use crate::config::{Config, load_config};
use crate::placement::Labeler;
use crate::render::{render_comparison_svg, render_placement_svg, write_output_svg};
use crate::report::{ComparisonReport, PlacementReport, write_report};
use crate::request::{FontSize, PlacementRequest};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "rlabel", version, about = "Place a label at the widest point of a river polygon")]
pub struct Args {
    /// Request JSON file ({"coordinates": [...], "label_text": ..., "font_size": ...}) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Single placement or three-strategy comparison
    #[arg(short = 'm', long = "mode", value_enum, default_value = "place")]
    pub mode: Mode,

    /// Figure output file (svg/png). No figure is rendered if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Figure format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (padding, theme, render sizes)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(short = 'j', long = "json")]
    pub json: Option<PathBuf>,

    /// Override the request's label text
    #[arg(short = 't', long = "text")]
    pub text: Option<String>,

    /// Override the request's font size
    #[arg(short = 's', long = "font-size")]
    pub font_size: Option<i64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Place,
    Compare,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    run_with(Args::parse())
}

fn run_with(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let mut request = PlacementRequest::from_json(&input)?;
    if let Some(text) = args.text.clone() {
        request.label_text = Some(text);
    }
    if let Some(size) = args.font_size {
        request.font_size = Some(FontSize::Integer(size));
    }
    let request = request.normalize()?;

    let labeler = Labeler::new(config.placement);
    let svg = match args.mode {
        Mode::Place => {
            let result =
                labeler.place_label(&request.coordinates, &request.label_text, request.font_size)?;
            let report = PlacementReport::new(result, &request);
            write_report(&report, args.json.as_deref())?;
            render_placement_svg(&report, &config.theme, &config.render)
        }
        Mode::Compare => {
            let result = labeler.compare_algorithms(
                &request.coordinates,
                &request.label_text,
                request.font_size,
            )?;
            let report = ComparisonReport::new(result, &request);
            write_report(&report, args.json.as_deref())?;
            render_comparison_svg(&report, &config.theme, &config.render)
        }
    };

    if let Some(output) = args.output.as_deref() {
        write_figure(&svg, output, args.output_format, &config)?;
    }
    Ok(())
}

fn write_figure(svg: &str, output: &Path, format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Svg => write_output_svg(svg, Some(output)),
        OutputFormat::Png => write_png(svg, output, config),
    }
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
