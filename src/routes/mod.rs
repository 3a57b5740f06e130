use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

mod assets;
mod health;
mod inquiry;
mod pages;

use crate::mailer::Dispatcher;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/success", get(pages::success))
        .route("/health", get(health::health))
        // Only a form POST is a valid submission; any other method gets the
        // generic rejection without touching the payload.
        .route(
            "/inquiry",
            post(inquiry::action).fallback(inquiry::invalid_request),
        )
        .route("/static/{*path}", get(assets::serve))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
