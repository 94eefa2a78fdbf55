use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_snippet_handler, health_handler, home_handler, show_snippet_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(home_handler))
            .route("/health", get(health_handler))
            .route("/snippets", post(create_snippet_handler))
            .route("/snippets/{id}", get(show_snippet_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
