use super::method_not_allowed;
use crate::models::email::{
    BatchEmailRequest, BatchEntry, BatchValidationResponse, EmailRequest, ErrorResponse,
    QuickCheckQuery, QuickCheckResponse,
};
use crate::validation::{EmailValidator, ValidationResult};
use actix_web::{HttpResponse, Responder, web};
use tracing::debug;

/// # Email Validation Endpoint
///
/// Runs every syntax rule against the address and, when the service was
/// started with MX checking, verifies the domain's mail exchangers.
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with `email` field
///
/// ## Responses
/// - **200 OK**: Validation verdict, including for malformed addresses
/// - **400 Bad Request**: Body is not a JSON object, `email` is missing or not a string
/// - **415 Unsupported Media Type**: Content-Type is not `application/json`
///
/// ## Example Request
/// ```json
/// { "email": "user@example.com" }
/// ```
#[utoipa::path(
    post,
    path = "/validate",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Validation verdict", body = ValidationResult),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 415, description = "Content-Type must be application/json", body = ErrorResponse)
    ),
    tag = "Email Validation"
)]
pub async fn validate_email(
    req: web::Json<EmailRequest>,
    validator: web::Data<EmailValidator>,
) -> impl Responder {
    let Some(email) = req.into_inner().email else {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Missing required field: email"));
    };

    HttpResponse::Ok().json(validator.validate(&email).await)
}

/// # Batch Validation Endpoint
///
/// Validates several addresses concurrently. Results keep the order of the
/// request; one malformed entry never affects the others. A `null` entry is
/// reported as `EMPTY_ADDRESS` and any other non-string as `ADDRESS_NOT_STRING`.
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with a non-empty `emails` array
///
/// ## Responses
/// - **200 OK**: `results`, `total`, `valid_count` and `invalid_count`
/// - **400 Bad Request**: `emails` missing, not an array, or empty
/// - **415 Unsupported Media Type**: Content-Type is not `application/json`
///
/// ## Example Request
/// ```json
/// { "emails": ["user1@example.com", "user2@example.com"] }
/// ```
#[utoipa::path(
    post,
    path = "/validate/batch",
    request_body = BatchEmailRequest,
    responses(
        (status = 200, description = "Batch validation verdicts", body = BatchValidationResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 415, description = "Content-Type must be application/json", body = ErrorResponse)
    ),
    tag = "Email Validation"
)]
pub async fn validate_batch(
    req: web::Json<BatchEmailRequest>,
    validator: web::Data<EmailValidator>,
) -> impl Responder {
    let entries = match req.into_inner().into_entries() {
        Ok(entries) => entries,
        Err(message) => return HttpResponse::BadRequest().json(ErrorResponse::new(message)),
    };

    let addresses: Vec<&str> = entries.iter().filter_map(BatchEntry::address).collect();
    debug!(
        "Validating batch of {} entries ({} addresses)",
        entries.len(),
        addresses.len()
    );

    // Verdicts come back in address order; splice them between the rejected entries
    let mut verdicts = validator.validate_batch(&addresses).await.into_iter();
    let results: Vec<ValidationResult> = entries
        .iter()
        .filter_map(|entry| match entry {
            BatchEntry::Address(_) => verdicts.next(),
            BatchEntry::Rejected { email, code } => {
                Some(ValidationResult::rejected(email.as_str(), *code))
            }
        })
        .collect();

    HttpResponse::Ok().json(BatchValidationResponse::from(results))
}

/// # Quick Check Endpoint
///
/// Syntax-only verdict for one address passed as a query parameter. MX
/// records are never consulted here, whatever the service configuration.
///
/// ## Example Request
/// ```text
/// GET /quick-check?email=user@example.com
/// ```
#[utoipa::path(
    get,
    path = "/quick-check",
    params(QuickCheckQuery),
    responses(
        (status = 200, description = "Syntax verdict", body = QuickCheckResponse),
        (status = 400, description = "Missing email parameter", body = ErrorResponse)
    ),
    tag = "Email Validation"
)]
pub async fn quick_check(
    query: web::Query<QuickCheckQuery>,
    validator: web::Data<EmailValidator>,
) -> impl Responder {
    let Some(email) = query.into_inner().email else {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("Missing required query parameter: email"));
    };

    let is_valid = validator.is_valid(&email);
    HttpResponse::Ok().json(QuickCheckResponse { email, is_valid })
}

/// Registers the validation endpoints.
///
/// Any other method on these paths gets `405 Method Not Allowed`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/validate")
            .route(web::post().to(validate_email))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/validate/batch")
            .route(web::post().to(validate_batch))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/quick-check")
            .route(web::get().to(quick_check))
            .default_service(web::to(method_not_allowed)),
    );
}
