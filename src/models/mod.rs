/// # Health Status Response
///
/// Represents the operational status of the service with a timestamp.
/// Used as the response format for health check endpoints.
///
/// ## Fields
/// - `status`: `"healthy"` whenever the service answers
/// - `service`: Service name
/// - `check_mx`: Whether MX verification is enabled
/// - `timestamp`: ISO 8601 formatted timestamp of the status check
///
/// ## Example JSON
/// ```json
/// {
///   "status": "healthy",
///   "service": "email-validator",
///   "check_mx": false,
///   "timestamp": "2024-03-10T15:30:45.123456789Z"
/// }
/// ```
pub mod health;

/// Request and response payloads of the validation endpoints.
pub mod email;

pub use health::HealthResponse;
