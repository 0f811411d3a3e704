pub mod grades;
pub mod logging;
pub mod restaurants;

use crate::config::Config;
use crate::db::Repository;
use crate::error::AppError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Config,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        Self { repo, config }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let mode = state.config.mode;

    let router = Router::new()
        .route(
            "/restaurants",
            get(restaurants::list_restaurants)
                .post(restaurants::create_restaurant)
                .fallback(not_found),
        )
        .route(
            "/restaurants/:id",
            get(restaurants::get_restaurant)
                .put(restaurants::update_restaurant)
                .delete(restaurants::delete_restaurant)
                .fallback(not_found),
        )
        .route(
            "/restaurants/:id/grades",
            get(restaurants::get_restaurant_grades).fallback(not_found),
        )
        .route("/grades", post(grades::create_grade).fallback(not_found))
        .route(
            "/grades/:id",
            get(grades::get_grade)
                .put(grades::update_grade)
                .delete(grades::delete_grade)
                .fallback(not_found),
        )
        .fallback(not_found)
        .layer(cors)
        .with_state(state);

    logging::with_request_logging(router, mode)
}

/// Catch-all for unmatched paths and methods.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Not Found" })),
    )
}

/// Parse a path identifier into a row id.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid id: {}", raw)))
}

/// Unwrap a required body field, reporting it by its wire name when absent.
pub(crate) fn require<T>(value: Option<T>, field: &'static str) -> Result<T, AppError> {
    value.ok_or_else(|| {
        warn!(field, "Missing field in request body");
        AppError::MissingField(field)
    })
}

/// Check that the body id equals the path id, compared as strings.
///
/// The body id may be a JSON number or string. Returns the parsed id.
pub(crate) fn ensure_ids_match(path_id: &str, body_id: Option<&Value>) -> Result<i64, AppError> {
    let body_id = body_id.and_then(|v| match v {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    });

    match body_id.as_deref() {
        Some(body) if !path_id.is_empty() && body == path_id => parse_id(path_id),
        other => {
            let message = format!(
                "Request path id ({}) and request body id ({}) must match",
                path_id,
                other.unwrap_or("missing")
            );
            warn!("{}", message);
            Err(AppError::BadRequest(message))
        }
    }
}
