use once_cell::sync::Lazy;
use std::path::PathBuf;

pub static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    std::env::var("PARKSPOT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/data"))
});

pub static CONFIG_PATH: Lazy<PathBuf> = Lazy::new(|| DATA_DIR.join("config.yaml"));

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

pub const DEFAULT_MAP_ZOOM: i32 = 10;
pub const DEGENERATE_SPAN_ZOOM: i32 = 14;
pub const MIN_MAP_ZOOM: i32 = 0;
pub const MAX_MAP_ZOOM: i32 = 21;
pub const VIEWPORT_PADDING_DEGREES: f64 = 2.0;

/// Pixel width of one web-mercator tile.
pub const MAP_TILE_SIZE: f64 = 256.0;

/// Backend status code of a spot that can be booked.
pub const SPOT_STATUS_AVAILABLE: i64 = 0;

pub const SLOT_LABEL_FORMAT: &str = "%I:%M %p";
pub const CLIENT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
