use actix_web::{web, get, HttpResponse, Responder};
use chrono::Utc;

use crate::{entities::contact::HealthResponse, AppState};

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        success: true,
        message: "Server is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        email_configured: state.contact_handler.is_configured(),
    })
}
