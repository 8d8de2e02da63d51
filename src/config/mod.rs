use crate::constants::{
    DEFAULT_MAP_ZOOM, DEFAULT_MAX_DISTANCE_KM, DEGENERATE_SPAN_ZOOM, MAX_MAP_ZOOM, MIN_MAP_ZOOM,
    VIEWPORT_PADDING_DEGREES,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub debug: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default = "default_available_only")]
    pub available_only: bool,
}

fn default_max_distance_km() -> f64 {
    DEFAULT_MAX_DISTANCE_KM
}

fn default_available_only() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance_km(),
            available_only: default_available_only(),
        }
    }
}

/// How the viewport bounds are accumulated over the spot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundsMode {
    /// True bounding box over every valid spot.
    #[default]
    Envelope,
    /// Bounds of the last valid spot only, as the legacy web client computed them.
    LastSpot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_zoom")]
    pub default_zoom: i32,
    #[serde(default = "default_degenerate_zoom")]
    pub degenerate_zoom: i32,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: i32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: i32,
    #[serde(default = "default_padding_degrees")]
    pub padding_degrees: f64,
    #[serde(default)]
    pub bounds_mode: BoundsMode,
}

fn default_zoom() -> i32 {
    DEFAULT_MAP_ZOOM
}

fn default_degenerate_zoom() -> i32 {
    DEGENERATE_SPAN_ZOOM
}

fn default_min_zoom() -> i32 {
    MIN_MAP_ZOOM
}

fn default_max_zoom() -> i32 {
    MAX_MAP_ZOOM
}

fn default_padding_degrees() -> f64 {
    VIEWPORT_PADDING_DEGREES
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            degenerate_zoom: default_degenerate_zoom(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            padding_degrees: default_padding_degrees(),
            bounds_mode: BoundsMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub map: MapSettings,
}

pub fn load_config(config_path: &Path) -> Config {
    if !config_path.exists() {
        return Config::default();
    }

    match fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config {:?}: {}", config_path, e);
                Config::default()
            }
        },
        Err(_) => Config::default(),
    }
}

pub fn save_default_config(config_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).map_err(|e| std::io::Error::other(e.to_string()))?;
    fs::write(config_path, yaml)
}
