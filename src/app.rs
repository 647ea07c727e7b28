use crate::cors::open_cors;
use crate::handlers;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).fallback(handlers::not_found))
        .route("/app.js", get(handlers::script).fallback(handlers::not_found))
        .route(
            "/api/greetings",
            get(handlers::list_greetings)
                .post(handlers::create_greeting)
                .fallback(handlers::not_found),
        )
        .route(
            "/api/audiences",
            get(handlers::list_audiences)
                .post(handlers::create_audience)
                .fallback(handlers::not_found),
        )
        .route(
            "/api/combos",
            get(handlers::list_combos)
                .post(handlers::create_combo)
                .fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(open_cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
