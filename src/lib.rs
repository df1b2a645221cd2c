#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod distance_field;
pub mod geometry;
pub mod placement;
pub mod raster;
pub mod render;
pub mod report;
pub mod request;
pub mod strategy;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, PlacementConfig, RenderConfig};
pub use placement::{
    ComparisonResult, Labeler, PlacementError, PlacementResult, compare_algorithms, place_label,
};
pub use request::{NormalizedRequest, PlacementRequest, RequestError};
pub use strategy::{Candidate, Strategy};
pub use theme::Theme;
