use crate::models::email::ErrorResponse;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

/// # Health Check Endpoint
///
/// Reports that the service is up, whether MX checking is enabled, and the
/// current time.
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "email-validator",
///   "check_mx": false,
///   "timestamp": "2023-10-05T12:34:56.789Z"
/// }
/// ```
pub mod health;

/// # Email Validation Endpoints
///
/// - `POST /validate`: full verdict for one address
/// - `POST /validate/batch`: verdicts for several addresses, in request order
/// - `GET /quick-check`: syntax-only verdict, MX never consulted
///
/// A malformed address is a normal `200` response with `is_valid: false`.
/// Only a malformed request body is a client error.
pub mod email;


/// # API Route Configuration
///
/// Mounts every endpoint at the service root.
///
/// ```text
/// GET  /health         - Service health status
/// POST /validate       - Single address validation
/// POST /validate/batch - Batch validation
/// GET  /quick-check    - Syntax-only check
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(email::configure_routes);
}

/// JSON extractor settings that turn body errors into JSON responses.
///
/// - Wrong or missing Content-Type: `415 Unsupported Media Type`
/// - Unparsable body or wrong field types: `400 Bad Request`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected request body: {}", err);

    let resp = match &err {
        JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType()
            .json(ErrorResponse::new("Content-Type must be application/json")),
        JsonPayloadError::Deserialize(e) if e.is_data() => {
            HttpResponse::BadRequest().json(ErrorResponse::new(format!("Invalid request body: {e}")))
        }
        _ => HttpResponse::BadRequest().json(ErrorResponse::new("Invalid JSON body")),
    };

    InternalError::from_response(err, resp).into()
}

/// Fallback for unknown paths
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Endpoint not found"))
}

/// Fallback for a known path requested with the wrong method
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::new("Method not allowed"))
}
