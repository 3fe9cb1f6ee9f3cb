use crate::validation::{ErrorCode, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

/// Body of `POST /validate`; only a JSON object is accepted
#[derive(Deserialize, ToSchema, Debug, PartialEq)]
#[serde(try_from = "Map<String, Value>")]
pub struct EmailRequest {
    /// Address to validate; `null` and a missing field are both rejected
    pub email: Option<String>,
}

impl TryFrom<Map<String, Value>> for EmailRequest {
    type Error = &'static str;

    fn try_from(mut body: Map<String, Value>) -> Result<Self, Self::Error> {
        match body.remove("email") {
            None | Some(Value::Null) => Ok(Self { email: None }),
            Some(Value::String(email)) => Ok(Self { email: Some(email) }),
            Some(_) => Err("email must be a string"),
        }
    }
}

/// Body of `POST /validate/batch`; only a JSON object is accepted
#[derive(Deserialize, ToSchema, Debug, PartialEq)]
#[serde(from = "Map<String, Value>")]
pub struct BatchEmailRequest {
    /// Addresses to validate, at least one
    #[schema(value_type = Option<Vec<String>>)]
    pub emails: Option<Value>,
}

impl From<Map<String, Value>> for BatchEmailRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            emails: body.remove("emails"),
        }
    }
}

/// One element of a batch request
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEntry {
    Address(String),
    /// Entry that cannot be an address; `email` is its JSON text
    Rejected { email: String, code: ErrorCode },
}

impl BatchEntry {
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Address(email) => Some(email),
            Self::Rejected { .. } => None,
        }
    }
}

impl From<Value> for BatchEntry {
    fn from(value: Value) -> Self {
        match value {
            Value::String(email) => Self::Address(email),
            Value::Null => Self::Rejected {
                email: String::new(),
                code: ErrorCode::EmptyAddress,
            },
            other => Self::Rejected {
                email: other.to_string(),
                code: ErrorCode::AddressNotString,
            },
        }
    }
}

impl BatchEmailRequest {
    /// Extracts the batch entries, describing what is wrong with the list otherwise.
    ///
    /// Individual entries are never rejected here; see [`BatchEntry`].
    pub fn into_entries(self) -> Result<Vec<BatchEntry>, &'static str> {
        let emails = match self.emails {
            None | Some(Value::Null) => return Err("Missing required field: emails"),
            Some(Value::Array(items)) => items,
            Some(_) => return Err("emails must be an array"),
        };

        if emails.is_empty() {
            return Err("emails array cannot be empty");
        }

        Ok(emails.into_iter().map(BatchEntry::from).collect())
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuickCheckQuery {
    /// Address to check
    pub email: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct BatchValidationResponse {
    pub results: Vec<ValidationResult>,
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
}

impl From<Vec<ValidationResult>> for BatchValidationResponse {
    fn from(results: Vec<ValidationResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.is_valid()).count();
        Self {
            total: results.len(),
            invalid_count: results.len() - valid_count,
            valid_count,
            results,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct QuickCheckResponse {
    pub email: String,
    pub is_valid: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
