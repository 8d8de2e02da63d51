#![cfg(test)]

use crate::app::create_app;
use crate::config::Config;
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;

pub const AUSTIN_LAT: f64 = 30.2672;
pub const AUSTIN_LNG: f64 = -97.7431;

/// Client wall-clock time used by slot tests: 2:30 PM.
pub const TEST_NOW: &str = "2026-10-18T14:30:00";

/// Create a test app with default configuration
pub fn create_test_app() -> Router {
    create_app(Arc::new(Config::default()))
}

/// Test fixture: search results around downtown Austin, keyed by spot id.
///
/// Keys are in ascending order so the order survives `serde_json::Value`.
/// - `12`: available, ~0.4 km away
/// - `3`: available, ~2 km away
/// - `40`: booked (status 1), at the search origin
/// - `7`: available, New York
/// - `99`: malformed latitude
pub fn austin_search_response() -> Value {
    json!({
        "12": {
            "latitude": "30.2700",
            "longitude": "-97.7400",
            "fee": "5.00",
            "photos": ["spots/12/front.jpg"],
            "status": 0,
            "address": "401 Congress Ave"
        },
        "3": {
            "latitude": "30.2500",
            "longitude": "-97.7500",
            "fee": 3,
            "photos": [],
            "status": 0
        },
        "40": {
            "latitude": "30.2672",
            "longitude": "-97.7431",
            "fee": "8",
            "status": 1
        },
        "7": {
            "latitude": "40.7128",
            "longitude": "-74.0060",
            "fee": "12.50",
            "status": 0
        },
        "99": {
            "latitude": "north",
            "longitude": "-97.7431",
            "status": 0
        }
    })
}
