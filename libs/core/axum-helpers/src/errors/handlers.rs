use axum::response::{IntoResponse, Response};

use super::{AppError, messages};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    AppError::NotFound(messages::NOT_FOUND_ROUTE.to_string()).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    AppError::MethodNotAllowed(messages::METHOD_NOT_ALLOWED.to_string()).into_response()
}
