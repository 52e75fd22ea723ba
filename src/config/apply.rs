use std::time::Duration;

use url::Url;

use crate::args::{LoadArgs, PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};
use crate::workload::grid;

use super::types::{
    Bounds, ConfigFile, ImageSize, NamedBounds, RunConfig, SampleMode, ServiceParams,
};

const DEFAULT_REQUESTS: u64 = 100;
const DEFAULT_WORKERS: usize = 8;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_IMAGE_WIDTH: u32 = 1024;
const DEFAULT_IMAGE_HEIGHT: u32 = 768;
const DEFAULT_MIN_TILE_LEVEL: u8 = 11;
const DEFAULT_MAX_TILE_LEVEL: u8 = 18;
const DEFAULT_MIN_MAP_WIDTH: f64 = 100.0;
const DEFAULT_MAX_MAP_WIDTH: f64 = 10_000.0;
const DEFAULT_OUTPUT_BASE: &str = "wmsload_results";
const DEFAULT_IMAGE_FORMAT: &str = "image/png";
const DEFAULT_VERSION: &str = "1.3.0";
const DEFAULT_SRS: &str = "EPSG:900913";

/// Merges CLI overrides, file values and defaults into a validated
/// [`RunConfig`]. CLI flags win over file values, which win over defaults.
///
/// # Errors
///
/// Returns a validation error for a missing or unparsable service URL, an
/// empty or inverted bounding-box table, an inverted tile-level or map-width
/// range, a tile level outside the resolution table, or a zero image
/// dimension.
pub fn apply_config(args: &LoadArgs, file: ConfigFile) -> AppResult<RunConfig> {
    let requests = match args.requests {
        Some(value) => value,
        None => PositiveU64::try_from(file.requests.unwrap_or(DEFAULT_REQUESTS))
            .map_err(AppError::validation)?,
    };
    let workers = match args.workers {
        Some(value) => value,
        None => PositiveUsize::try_from(file.workers.unwrap_or(DEFAULT_WORKERS))
            .map_err(AppError::validation)?,
    };
    let timeout_secs = args
        .timeout
        .map(PositiveU64::get)
        .or(file.timeout)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let service = resolve_service(args, &file)?;
    let mode = resolve_mode(&file)?;
    let image = resolve_image(&file, mode)?;
    let bounding_boxes = resolve_bounding_boxes(file.bounding_boxes)?;

    Ok(RunConfig {
        requests,
        workers,
        request_timeout: Duration::from_secs(timeout_secs),
        proxy_url: args.proxy.clone().or(file.proxy),
        output: args
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| DEFAULT_OUTPUT_BASE.to_owned()),
        service,
        image,
        mode,
        bounding_boxes,
    })
}

fn resolve_service(args: &LoadArgs, file: &ConfigFile) -> AppResult<ServiceParams> {
    let section = file.service.as_ref();
    let url_text = args
        .url
        .clone()
        .or_else(|| section.and_then(|service| service.url.clone()))
        .ok_or_else(|| AppError::validation(ValidationError::MissingServiceUrl))?;
    let url = Url::parse(&url_text).map_err(|err| {
        AppError::validation(ValidationError::InvalidServiceUrl {
            url: url_text,
            source: err,
        })
    })?;

    let field = |pick: fn(&super::types::ServiceSection) -> Option<&String>, default: &str| {
        section
            .and_then(pick)
            .cloned()
            .unwrap_or_else(|| default.to_owned())
    };

    Ok(ServiceParams {
        url,
        layers: field(|service| service.layers.as_ref(), ""),
        styles: field(|service| service.styles.as_ref(), ""),
        format: field(|service| service.format.as_ref(), DEFAULT_IMAGE_FORMAT),
        version: field(|service| service.version.as_ref(), DEFAULT_VERSION),
        srs: field(|service| service.srs.as_ref(), DEFAULT_SRS),
    })
}

fn resolve_mode(file: &ConfigFile) -> AppResult<SampleMode> {
    // A [tiles] section turns tile mode on unless it says enabled = false.
    let tile_mode = file
        .tiles
        .as_ref()
        .map(|tiles| tiles.enabled.unwrap_or(true))
        .unwrap_or(false);

    if tile_mode {
        let tiles = file.tiles.as_ref();
        let min_level = tiles
            .and_then(|section| section.min_level)
            .unwrap_or(DEFAULT_MIN_TILE_LEVEL);
        let max_level = tiles
            .and_then(|section| section.max_level)
            .unwrap_or(DEFAULT_MAX_TILE_LEVEL);
        if min_level > max_level {
            return Err(AppError::validation(ValidationError::TileLevelOrder {
                min: min_level,
                max: max_level,
            }));
        }
        if max_level > grid::MAX_TILE_LEVEL {
            return Err(AppError::validation(ValidationError::TileLevelOutOfRange {
                level: max_level,
                max: grid::MAX_TILE_LEVEL,
            }));
        }
        return Ok(SampleMode::Tiles {
            min_level,
            max_level,
        });
    }

    let extent = file.extent.as_ref();
    let min_map_width = extent
        .and_then(|section| section.min_map_width)
        .unwrap_or(DEFAULT_MIN_MAP_WIDTH);
    let max_map_width = extent
        .and_then(|section| section.max_map_width)
        .unwrap_or(DEFAULT_MAX_MAP_WIDTH);
    if !(min_map_width > 0.0) {
        return Err(AppError::validation(ValidationError::MapWidthNotPositive {
            value: min_map_width,
        }));
    }
    if min_map_width > max_map_width {
        return Err(AppError::validation(ValidationError::MapWidthOrder {
            min: min_map_width,
            max: max_map_width,
        }));
    }
    Ok(SampleMode::Scales {
        min_map_width,
        max_map_width,
    })
}

fn resolve_image(file: &ConfigFile, mode: SampleMode) -> AppResult<ImageSize> {
    // Tiles are always requested at the fixed grid size, whatever [image] says.
    if matches!(mode, SampleMode::Tiles { .. }) {
        return Ok(ImageSize {
            width: grid::TILE_SIZE_PX,
            height: grid::TILE_SIZE_PX,
        });
    }

    let section = file.image.as_ref();
    let width = section
        .and_then(|image| image.width)
        .unwrap_or(DEFAULT_IMAGE_WIDTH);
    let height = section
        .and_then(|image| image.height)
        .unwrap_or(DEFAULT_IMAGE_HEIGHT);
    if width == 0 || height == 0 {
        return Err(AppError::validation(ValidationError::ImageSizeZero));
    }
    Ok(ImageSize { width, height })
}

fn resolve_bounding_boxes(
    entries: Vec<super::types::BoundingBoxEntry>,
) -> AppResult<Vec<NamedBounds>> {
    if entries.is_empty() {
        return Err(AppError::validation(ValidationError::NoBoundingBoxes));
    }
    let mut boxes = Vec::with_capacity(entries.len());
    for entry in entries {
        if !(entry.min_x < entry.max_x) || !(entry.min_y < entry.max_y) {
            return Err(AppError::validation(ValidationError::InvalidBoundingBox {
                name: entry.name,
            }));
        }
        boxes.push(NamedBounds {
            name: entry.name,
            bounds: Bounds {
                min_x: entry.min_x,
                min_y: entry.min_y,
                max_x: entry.max_x,
                max_y: entry.max_y,
            },
        });
    }
    Ok(boxes)
}
