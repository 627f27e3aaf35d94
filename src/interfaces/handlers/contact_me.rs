use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::{entities::contact::ContactForm, errors::AppError, utils::get_client_ip::get_client_ip, AppState};

pub async fn submit_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    let client_ip = get_client_ip(&req, state.trust_x_forwarded_for);

    let response = state.contact_handler
        .submit(form.into_inner(), &client_ip).await?;

    Ok(HttpResponse::Ok().json(response))
}
