use super::method_not_allowed;
use crate::models::HealthResponse;
use crate::validation::EmailValidator;
use actix_web::{HttpResponse, Responder, web};

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp.
///
/// ## Response
///
/// - **200 OK**: Service is healthy
///   - Body: `status` ("healthy"), `service`, `check_mx` and `timestamp` in ISO 8601 format
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(validator: web::Data<EmailValidator>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::up(validator.check_mx()))
}

/// # Route Configuration
///
/// - `GET /health`: Health check endpoint
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/health")
            .route(web::get().to(health))
            .default_service(web::to(method_not_allowed)),
    );
}
