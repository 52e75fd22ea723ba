use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing service URL (set [service].url in config or pass --url).")]
    MissingServiceUrl,
    #[error("Invalid service URL '{url}': {source}")]
    InvalidServiceUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("No bounding boxes configured. Add at least one [[bounding_box]].")]
    NoBoundingBoxes,
    #[error("Bounding box '{name}' has an inverted or empty extent.")]
    InvalidBoundingBox { name: String },
    #[error("Tile level range is inverted: min {min} > max {max}.")]
    TileLevelOrder { min: u8, max: u8 },
    #[error("Tile level {level} is outside the resolution table (max {max}).")]
    TileLevelOutOfRange { level: u8, max: u8 },
    #[error("Map width range is inverted: min {min} > max {max}.")]
    MapWidthOrder { min: f64, max: f64 },
    #[error("Map width must be positive, got {value}.")]
    MapWidthNotPositive { value: f64 },
    #[error("Map image width and height must both be non-zero.")]
    ImageSizeZero,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid number: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
}
