pub mod dto;
pub mod handlers;
pub mod record;
pub mod store;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/progress",
        get(handlers::list_progress)
            .post(handlers::create_progress)
            .fallback(handlers::method_not_allowed),
    )
}
