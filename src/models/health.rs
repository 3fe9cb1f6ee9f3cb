use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SERVICE_NAME: &str = "email-validator";

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub check_mx: bool,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn up(check_mx: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            check_mx,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
