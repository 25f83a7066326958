use actix_web::{HttpResponse, Responder, get};

/// Liveness probe for the hosting platform. Sends no mail.
#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}
