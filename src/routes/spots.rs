use axum::{extract::State, routing::post, Json, Router};
use validator::Validate;

use crate::config::Config;
use crate::error::AppResult;
use crate::extractors::AppJson;
use crate::models::{parse_search_response, NearbySpotsRequest, NearbySpotsResponse, ParkingSpot};
use crate::state::AppState;
use crate::utils::geo::{nearby_with_distance, Coordinate};
use crate::utils::viewport::calculate_map_params;

pub fn router() -> Router<AppState> {
    Router::new().route("/spots/nearby", post(nearby_spots))
}

async fn nearby_spots(
    State(state): State<AppState>,
    AppJson(req): AppJson<NearbySpotsRequest>,
) -> AppResult<Json<NearbySpotsResponse>> {
    req.validate()?;
    Ok(Json(find_nearby(&state.config, &req)))
}

fn find_nearby(config: &Config, req: &NearbySpotsRequest) -> NearbySpotsResponse {
    let base = Coordinate::new(req.latitude, req.longitude);
    let max_distance_km = req.max_distance_km.unwrap_or(config.search.max_distance_km);
    let available_only = req.available_only.unwrap_or(config.search.available_only);

    let mut spots = parse_search_response(&req.spots);
    if available_only {
        spots.retain(ParkingSpot::is_available);
    }

    let nearby = nearby_with_distance(base, spots, max_distance_km);
    let viewport = calculate_map_params(&nearby, &config.map);

    tracing::debug!(
        "{} of {} spots within {} km",
        nearby.len(),
        req.spots.len(),
        max_distance_km
    );

    NearbySpotsResponse {
        total_count: nearby.len(),
        spots: nearby,
        viewport,
    }
}
