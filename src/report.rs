use crate::placement::{ComparisonResult, PlacementResult};
use crate::request::NormalizedRequest;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Response for a single placement: the result fields plus the echoed
/// request.
#[derive(Debug, Serialize)]
pub struct PlacementReport {
    #[serde(flatten)]
    pub result: PlacementResult,
    pub text: String,
    pub font_size: u32,
    pub polygon_coords: Vec<[f64; 2]>,
}

/// Response for a strategy comparison, keyed by strategy.
#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub text: String,
    pub font_size: u32,
    pub polygon_coords: Vec<[f64; 2]>,
    #[serde(flatten)]
    pub result: ComparisonResult,
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: String,
}

impl PlacementReport {
    pub fn new(result: PlacementResult, request: &NormalizedRequest) -> Self {
        Self {
            result,
            text: request.label_text.clone(),
            font_size: request.font_size,
            polygon_coords: coords(request),
        }
    }
}

impl ComparisonReport {
    pub fn new(result: ComparisonResult, request: &NormalizedRequest) -> Self {
        Self {
            text: request.label_text.clone(),
            font_size: request.font_size,
            polygon_coords: coords(request),
            result,
        }
    }
}

impl ErrorReport {
    pub fn new(err: impl std::fmt::Display) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

fn coords(request: &NormalizedRequest) -> Vec<[f64; 2]> {
    request.coordinates.iter().map(|&(x, y)| [x, y]).collect()
}

pub fn write_report<T: Serialize>(report: &T, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, report)?;
            writer.flush()?;
        }
        None => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}
