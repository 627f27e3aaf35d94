use actix_web::web;

use crate::errors::AppError;

const MAX_JSON_PAYLOAD: usize = 64 * 1024;

/// Malformed or oversized JSON bodies answer with the structured validation error.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(MAX_JSON_PAYLOAD)
            .error_handler(|err, _req| {
                tracing::debug!(error = %err, "Rejected JSON payload");
                AppError::from(err).into()
            }),
    );
}
