use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::args::{PositiveU64, PositiveUsize};

/// Raw config file contents before CLI overrides and validation.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub requests: Option<u64>,
    pub workers: Option<usize>,
    /// Per-request timeout in seconds.
    pub timeout: Option<u64>,
    #[serde(alias = "proxy_url")]
    pub proxy: Option<String>,
    pub output: Option<String>,
    pub service: Option<ServiceSection>,
    pub image: Option<ImageSection>,
    pub tiles: Option<TilesSection>,
    pub extent: Option<ExtentSection>,
    #[serde(default, rename = "bounding_box", alias = "bounding_boxes")]
    pub bounding_boxes: Vec<BoundingBoxEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceSection {
    pub url: Option<String>,
    pub layers: Option<String>,
    pub styles: Option<String>,
    pub format: Option<String>,
    pub version: Option<String>,
    pub srs: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageSection {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TilesSection {
    pub enabled: Option<bool>,
    pub min_level: Option<u8>,
    pub max_level: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtentSection {
    pub min_map_width: Option<f64>,
    pub max_map_width: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoundingBoxEntry {
    pub name: String,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Validated, immutable parameters for one load run.
#[derive(Debug)]
pub struct RunConfig {
    pub requests: PositiveU64,
    pub workers: PositiveUsize,
    pub request_timeout: Duration,
    pub proxy_url: Option<String>,
    pub output: String,
    pub service: ServiceParams,
    /// Effective image size; forced to the tile size in tile mode.
    pub image: ImageSize,
    pub mode: SampleMode,
    pub bounding_boxes: Vec<NamedBounds>,
}

/// GetMap query parameters shared by every request.
#[derive(Debug)]
pub struct ServiceParams {
    pub url: Url,
    pub layers: String,
    pub styles: String,
    pub format: String,
    pub version: String,
    pub srs: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// How map windows are sized: grid-aligned tiles at a sampled zoom level,
/// or free windows with a sampled width in SRS units.
#[derive(Debug, Clone, Copy)]
pub enum SampleMode {
    Tiles { min_level: u8, max_level: u8 },
    Scales { min_map_width: f64, max_map_width: f64 },
}

#[derive(Debug, Clone)]
pub struct NamedBounds {
    pub name: String,
    pub bounds: Bounds,
}

/// Axis-aligned rectangle in SRS units.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}
