use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::state::AppState;

/// Builds the full application router: two resource groups plus health
/// endpoints, permissive CORS, request tracing and panic recovery.
pub fn build_router(state: AppState) -> Router {
    let hives = Router::new()
        .route(
            "/",
            get(handlers::hives::get_hives).post(handlers::hives::add_hive),
        )
        .route(
            "/{hive_id}",
            get(handlers::hives::get_hive)
                .put(handlers::hives::update_hive)
                .delete(handlers::hives::delete_hive),
        )
        .route("/{hive_id}/sections", get(handlers::hives::get_hive_sections))
        .route(
            "/{hive_id}/status/{deleted_status}",
            put(handlers::hives::set_status),
        );

    let sections = Router::new()
        .route(
            "/",
            get(handlers::hive_sections::get_sections).post(handlers::hive_sections::add_section),
        )
        .route(
            "/{section_id}",
            get(handlers::hive_sections::get_section)
                .put(handlers::hive_sections::update_section)
                .delete(handlers::hive_sections::delete_section),
        )
        .route(
            "/{section_id}/status/{deleted_status}",
            put(handlers::hive_sections::set_status),
        );

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .nest("/api/hives", hives)
        .nest("/api/sections", sections)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
