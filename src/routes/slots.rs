use axum::{routing::post, Json, Router};

use crate::error::AppResult;
use crate::extractors::AppJson;
use crate::models::{
    FromSlotsRequest, FromSlotsResponse, SearchForm, ToSlotsRequest, ToSlotsResponse,
};
use crate::state::AppState;
use crate::utils::datetime::{parse_date, resolve_now};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/slots/from", post(from_slots))
        .route("/slots/to", post(to_slots))
}

async fn from_slots(
    AppJson(req): AppJson<FromSlotsRequest>,
) -> AppResult<Json<FromSlotsResponse>> {
    let date = parse_date(&req.date)?;
    let now = resolve_now(req.now.as_deref())?;

    let mut form = SearchForm::new();
    form.set_date(date, now);

    Ok(Json(FromSlotsResponse {
        date,
        slots: form.from_slots().to_vec(),
        default_from: form.from(),
        default_to: form.to(),
    }))
}

async fn to_slots(
    AppJson(req): AppJson<ToSlotsRequest>,
) -> AppResult<Json<ToSlotsResponse>> {
    let date = parse_date(&req.date)?;
    let now = resolve_now(req.now.as_deref())?;

    let mut form = SearchForm::new();
    form.set_date(date, now);
    form.select_from(&req.from)?;

    Ok(Json(ToSlotsResponse {
        date: form.to_date(),
        slots: form.to_slots().to_vec(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, TEST_NOW};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_from_slots_for_today() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server
            .post("/api/v1/slots/from")
            .json(&json!({ "date": "2026-10-18", "now": TEST_NOW }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["date"], "2026-10-18");
        assert_eq!(body["slots"][0], "03:00 PM");
        assert_eq!(body["slots"].as_array().unwrap().len(), 9);
        assert_eq!(body["defaultFrom"], "03:00 PM");
        assert_eq!(body["defaultTo"], "04:00 PM");
    }

    #[tokio::test]
    async fn test_from_slots_for_future_day() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server
            .post("/api/v1/slots/from")
            .json(&json!({ "date": "2026-10-25", "now": TEST_NOW }))
            .await;

        let body: Value = response.json();
        let slots = body["slots"].as_array().unwrap();
        assert_eq!(slots.len(), 24);
        assert_eq!(slots[0], "12:00 AM");
        assert_eq!(slots[23], "11:00 PM");
    }

    #[tokio::test]
    async fn test_to_slots_roll_over_after_eleven_pm() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server
            .post("/api/v1/slots/to")
            .json(&json!({ "date": "2026-10-18", "from": "11:00 PM", "now": TEST_NOW }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["date"], "2026-10-19");
        assert_eq!(body["slots"][0], "12:00 AM");
        assert_eq!(body["slots"].as_array().unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_to_slots_reject_past_from() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server
            .post("/api/v1/slots/to")
            .json(&json!({ "date": "2026-10-18", "from": "10:00 AM", "now": TEST_NOW }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_date_is_rejected() {
        let server = TestServer::new(create_test_app()).unwrap();

        let response = server
            .post("/api/v1/slots/from")
            .json(&json!({ "date": "tomorrow" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
