mod map;
mod search;
mod slots;
mod spots;

use crate::state::AppState;
use axum::Router;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(spots::router())
        .merge(map::router())
        .merge(slots::router())
        .merge(search::router())
}
