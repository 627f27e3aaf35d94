use actix_web::{HttpRequest, HttpResponse};

use crate::errors::AppError;

/// Fallback for every unmatched route.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    tracing::debug!(path = %req.path(), method = %req.method(), "No route matched");
    AppError::NotFound.to_http_response()
}
