use rand::Rng;

use crate::config::types::{RunConfig, SampleMode};

use super::grid;

/// One randomized GetMap request: the chosen area of interest, the sampled
/// window extent and the pixel size to ask for.
#[derive(Debug, Clone)]
pub struct MapRequest {
    pub bounds_name: String,
    /// Zoom level in tile mode, `None` for free windows.
    pub level: Option<u8>,
    pub extent: Extent,
    pub width_px: u32,
    pub height_px: u32,
}

/// Window extent in SRS units.
#[derive(Debug, Clone, Copy)]
pub struct Extent {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

/// Draws one randomized map window.
///
/// The bounding box is chosen uniformly over box identities, not box area.
/// In tile mode the window is a grid-aligned tile at a uniformly sampled
/// level; otherwise the window width is uniform over the configured range
/// and the height keeps the configured pixel aspect ratio. A window larger
/// than its box anchors at the box origin instead of sampling an inverted
/// range.
#[must_use]
pub fn sample<R: Rng + ?Sized>(config: &RunConfig, rng: &mut R) -> MapRequest {
    let index = rng.gen_range(0..config.bounding_boxes.len());
    // Non-empty by config validation.
    let chosen = &config.bounding_boxes[index];
    let bounds = chosen.bounds;

    let (width, height, level) = match config.mode {
        SampleMode::Tiles {
            min_level,
            max_level,
        } => {
            let level = rng.gen_range(min_level..=max_level);
            let span = grid::tile_span(level);
            (span, span, Some(level))
        }
        SampleMode::Scales {
            min_map_width,
            max_map_width,
        } => {
            let width = rng.gen_range(min_map_width..=max_map_width);
            let ratio = f64::from(config.image.height) / f64::from(config.image.width);
            (width, width * ratio, None)
        }
    };

    let max_left = (bounds.max_x - width).max(bounds.min_x);
    let max_bottom = (bounds.max_y - height).max(bounds.min_y);
    let mut left = rng.gen_range(bounds.min_x..=max_left);
    let mut bottom = rng.gen_range(bounds.min_y..=max_bottom);

    if level.is_some() {
        left = grid::snap_down(left, width);
        bottom = grid::snap_down(bottom, height);
    }

    MapRequest {
        bounds_name: chosen.name.clone(),
        level,
        extent: Extent {
            left,
            bottom,
            right: left + width,
            top: bottom + height,
        },
        width_px: config.image.width,
        height_px: config.image.height,
    }
}
