//! Request logging middleware.

use crate::config::AppMode;
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

/// Wrap `router` with request tracing for the given mode.
///
/// Development logs headers at debug level, production logs one line per
/// request at info level, test installs nothing.
pub fn with_request_logging(router: Router, mode: AppMode) -> Router {
    match mode {
        AppMode::Test => router,
        AppMode::Development => router.layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::DEBUG)
                        .include_headers(true),
                )
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::DEBUG)
                        .latency_unit(LatencyUnit::Micros),
                ),
        ),
        AppMode::Production => router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        ),
    }
}
