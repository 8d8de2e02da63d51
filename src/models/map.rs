use serde::{Deserialize, Serialize};

use crate::config::BoundsMode;
use crate::constants::DEFAULT_MAP_ZOOM;
use crate::utils::geo::{Coordinate, ParkingSpotLocation};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Box spanning `padding` degrees on every side of `point`.
    pub fn around(point: Coordinate, padding: f64) -> Self {
        Self {
            north: point.latitude + padding,
            south: point.latitude - padding,
            east: point.longitude + padding,
            west: point.longitude - padding,
        }
    }

    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            north: self.north.max(other.north),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            west: self.west.min(other.west),
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.north + self.south) / 2.0,
            lng: (self.east + self.west) / 2.0,
        }
    }

    pub fn lng_span(&self) -> f64 {
        (self.east - self.west).abs()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewport {
    pub center: LatLng,
    pub zoom: i32,
    pub bounds: Option<BoundingBox>,
}

impl MapViewport {
    pub fn fallback(zoom: i32) -> Self {
        Self {
            center: LatLng { lat: 0.0, lng: 0.0 },
            zoom,
            bounds: None,
        }
    }
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::fallback(DEFAULT_MAP_ZOOM)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewportRequest {
    pub spots: Vec<ParkingSpotLocation>,
    pub bounds_mode: Option<BoundsMode>,
}
