//! The Google/Bing web-mercator tile grid.

/// Tile edge length in pixels.
pub(crate) const TILE_SIZE_PX: u32 = 256;

/// Highest zoom level covered by [`RESOLUTIONS`].
pub(crate) const MAX_TILE_LEVEL: u8 = 30;

/// Metres per pixel at each zoom level. The exact digits matter: tile
/// extents at deep levels are reproducible only if these values never drift.
pub(crate) const RESOLUTIONS: [f64; 31] = [
    156543.03390625,
    78271.516953125,
    39135.7584765625,
    19567.8792382812,
    9783.93961914062,
    4891.96980957031,
    2445.98490478516,
    1222.99245239258,
    611.496226196289,
    305.748113098145,
    152.874056549072,
    76.4370282745361,
    38.2185141372681,
    19.109257068634,
    9.55462853431702,
    4.77731426715851,
    2.38865713357925,
    1.19432856678963,
    0.597164283394814,
    0.298582141697407,
    0.149291070848703,
    0.0746455354243517,
    0.0373227677121758,
    0.0186613838560879,
    0.00933069192804396,
    0.00466534596402198,
    0.00233267298201099,
    0.0011663364910055,
    0.000583168245502748,
    0.000291584122751374,
    0.000145792061375687,
];

/// Ground span of one tile edge at `level`, in SRS units.
///
/// Levels are checked against the table when the config is applied, so the
/// index is always in range here.
pub(crate) fn tile_span(level: u8) -> f64 {
    f64::from(TILE_SIZE_PX) * RESOLUTIONS[level as usize]
}

/// Snaps `value` down to the nearest multiple of `span`.
pub(crate) fn snap_down(value: f64, span: f64) -> f64 {
    (value / span).floor() * span
}
