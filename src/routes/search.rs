use axum::{routing::post, Json, Router};
use validator::Validate;

use crate::error::AppResult;
use crate::extractors::AppJson;
use crate::models::{SearchForm, SearchQuery, SearchQueryRequest};
use crate::state::AppState;
use crate::utils::datetime::{parse_date, resolve_now};
use crate::utils::geo::Coordinate;

pub fn router() -> Router<AppState> {
    Router::new().route("/search/query", post(build_query))
}

async fn build_query(
    AppJson(req): AppJson<SearchQueryRequest>,
) -> AppResult<Json<SearchQuery>> {
    req.validate()?;
    let date = parse_date(&req.date)?;
    let now = resolve_now(req.now.as_deref())?;

    let mut form = SearchForm::new();
    form.set_destination(Coordinate::new(req.latitude, req.longitude));
    form.set_date(date, now);
    form.select_from(&req.from)?;
    form.select_to(&req.to)?;

    Ok(Json(form.to_query()?))
}
