use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Defines the API contract using OpenAPI 3.0 format with utoipa procedural macros.
///
/// # Endpoints
/// - Health Check: `GET /health`
/// - Email Validation: `POST /validate`, `POST /validate/batch`, `GET /quick-check`
///
/// # Schemas
/// - `ValidationResult`: Verdict for one address, with its error and warning codes
/// - `BatchValidationResponse`: Verdicts for a batch plus summary counts
/// - `ErrorResponse`: Body of every client error
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::email::validate_email,
        crate::routes::email::validate_batch,
        crate::routes::email::quick_check,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::models::email::EmailRequest,
            crate::models::email::BatchEmailRequest,
            crate::models::email::BatchValidationResponse,
            crate::models::email::QuickCheckResponse,
            crate::models::email::ErrorResponse,
            crate::validation::ValidationResult,
            crate::validation::ErrorCode,
            crate::validation::WarningCode,
        )
    ),
    tags(
        (name = "Health", description = "Service health monitoring endpoints"),
        (name = "Email Validation", description = "Email address validation endpoints")
    ),
    info(
        description = "Rule-based email address validation with optional MX record verification",
        title = "Email Validator API",
        version = "1.0.0",
    )
)]
pub struct ApiDoc;
