use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_url_handler, health_handler, list_urls_handler, redirect_handler, stats_handler,
};
use crate::state::AppState;

pub struct App;

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .nest(
                "/api",
                Router::new()
                    .route("/shorten", post(create_url_handler))
                    .route("/stats/{short_code}", get(stats_handler))
                    .route("/urls", get(list_urls_handler))
                    .route("/health", get(health_handler)),
            )
            .route("/{short_code}", get(redirect_handler))
            .layer(Self::cors())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    fn cors() -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    }
}
