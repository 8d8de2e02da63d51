use axum::{extract::State, routing::post, Json, Router};

use crate::config::MapSettings;
use crate::error::AppResult;
use crate::extractors::AppJson;
use crate::models::{MapViewport, MapViewportRequest};
use crate::state::AppState;
use crate::utils::viewport::calculate_map_params;

pub fn router() -> Router<AppState> {
    Router::new().route("/map/viewport", post(get_viewport))
}

async fn get_viewport(
    State(state): State<AppState>,
    AppJson(req): AppJson<MapViewportRequest>,
) -> AppResult<Json<MapViewport>> {
    let settings = MapSettings {
        bounds_mode: req.bounds_mode.unwrap_or(state.config.map.bounds_mode),
        ..state.config.map.clone()
    };

    Ok(Json(calculate_map_params(&req.spots, &settings)))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_empty_spot_list_returns_default() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server
            .post("/api/v1/map/viewport")
            .json(&json!({ "spots": [] }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "center": { "lat": 0.0, "lng": 0.0 }, "zoom": 10, "bounds": null })
        );
    }

    #[tokio::test]
    async fn test_string_coordinates_are_framed() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server
            .post("/api/v1/map/viewport")
            .json(&json!({
                "spots": [
                    { "id": 1, "latitude": "30", "longitude": "-97" },
                    { "id": "2", "latitude": 40, "longitude": -74 },
                ]
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["bounds"]["west"], -99.0);
        assert_eq!(body["bounds"]["east"], -72.0);
        assert_eq!(body["zoom"], 3);
    }

    #[tokio::test]
    async fn test_bounds_mode_override() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server
            .post("/api/v1/map/viewport")
            .json(&json!({
                "boundsMode": "last_spot",
                "spots": [
                    { "latitude": 30, "longitude": -97 },
                    { "latitude": 40, "longitude": -74 },
                ]
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["center"], json!({ "lat": 40.0, "lng": -74.0 }));
        assert_eq!(body["bounds"]["west"], -76.0);
    }

    #[tokio::test]
    async fn test_null_and_missing_coordinates_are_skipped() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server
            .post("/api/v1/map/viewport")
            .json(&json!({
                "spots": [
                    { "id": 1, "latitude": 30, "longitude": -97 },
                    { "id": 2, "latitude": null, "longitude": -74 },
                    { "id": 3, "longitude": -60 },
                ]
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["center"], json!({ "lat": 30.0, "lng": -97.0 }));
        assert_eq!(body["bounds"]["east"], -95.0);
    }
}
