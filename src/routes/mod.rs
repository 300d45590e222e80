use axum::{
    Json, Router,
    extract::{
        Path,
        rejection::{JsonRejection, PathRejection},
    },
    http::{Method, StatusCode, Uri},
    routing::get,
};

use crate::{
    error::{AppError, AppResult},
    response::ErrorResponse,
    state::AppState,
};

pub mod auth;
pub mod doc;
pub mod health;
pub mod orders;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/product", products::router())
        .nest("/order", orders::router())
}

/// Health, API and docs routes bound to `state`. Middleware is layered on in `main`.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    let body = ErrorResponse::new("Not Found", format!("No route for {}", uri.path()));
    (StatusCode::NOT_FOUND, Json(body))
}

async fn method_not_allowed(method: Method, uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    let body = ErrorResponse::new(
        "Method Not Allowed",
        format!("{method} is not supported for {}", uri.path()),
    );
    (StatusCode::METHOD_NOT_ALLOWED, Json(body))
}

/// Unwrap a JSON body, turning malformed input into a 400 with the standard error shape.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Unwrap a path parameter, turning unparsable segments into a 400 with the standard error shape.
pub(crate) fn path_param<T>(param: Result<Path<T>, PathRejection>) -> AppResult<T> {
    param
        .map(|Path(inner)| inner)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
