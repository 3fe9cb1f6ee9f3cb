use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Machine-readable syntax rule violations.
///
/// The declaration order mirrors the order in which the rules run, so a
/// result's `errors` list is always sorted by this order.
#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmptyAddress,
    /// Batch entry that is not a JSON string
    AddressNotString,
    MissingAt,
    MultipleAt,
    EmptyLocalPart,
    LocalPartTooLong,
    LocalPartInvalidDot,
    LocalPartInvalidChars,
    EmptyDomain,
    DomainTooLong,
    DomainMissingDot,
    DomainInvalidFormat,
    DomainConsecutiveDots,
    DomainInvalidLabel,
    DomainInvalidTld,
    AddressTooLong,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyAddress => "EMPTY_ADDRESS",
            Self::AddressNotString => "ADDRESS_NOT_STRING",
            Self::MissingAt => "MISSING_AT",
            Self::MultipleAt => "MULTIPLE_AT",
            Self::EmptyLocalPart => "EMPTY_LOCAL_PART",
            Self::LocalPartTooLong => "LOCAL_PART_TOO_LONG",
            Self::LocalPartInvalidDot => "LOCAL_PART_INVALID_DOT",
            Self::LocalPartInvalidChars => "LOCAL_PART_INVALID_CHARS",
            Self::EmptyDomain => "EMPTY_DOMAIN",
            Self::DomainTooLong => "DOMAIN_TOO_LONG",
            Self::DomainMissingDot => "DOMAIN_MISSING_DOT",
            Self::DomainInvalidFormat => "DOMAIN_INVALID_FORMAT",
            Self::DomainConsecutiveDots => "DOMAIN_CONSECUTIVE_DOTS",
            Self::DomainInvalidLabel => "DOMAIN_INVALID_LABEL",
            Self::DomainInvalidTld => "DOMAIN_INVALID_TLD",
            Self::AddressTooLong => "ADDRESS_TOO_LONG",
        }
    }

    /// Human-readable description of the violated rule
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyAddress => "Email address is empty",
            Self::AddressNotString => "Email must be a string",
            Self::MissingAt => "Email is missing '@' symbol",
            Self::MultipleAt => "Email contains multiple '@' symbols",
            Self::EmptyLocalPart => "Local part (before @) is empty",
            Self::LocalPartTooLong => "Local part exceeds maximum length of 64 characters",
            Self::LocalPartInvalidDot => "Local part starts or ends with a dot, or contains consecutive dots",
            Self::LocalPartInvalidChars => "Local part contains characters outside letters, digits and . _ % + -",
            Self::EmptyDomain => "Domain part (after @) is empty",
            Self::DomainTooLong => "Domain exceeds maximum length of 253 characters",
            Self::DomainMissingDot => "Domain is missing TLD (top-level domain)",
            Self::DomainInvalidFormat => "Domain starts or ends with '.', or a label starts or ends with '-'",
            Self::DomainConsecutiveDots => "Domain contains consecutive dots",
            Self::DomainInvalidLabel => "Domain contains an invalid label",
            Self::DomainInvalidTld => "Top-level domain must be alphabetic and at least 2 characters",
            Self::AddressTooLong => "Email exceeds maximum length of 254 characters",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory conditions that never invalidate an address
#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// Input had leading or trailing whitespace; rules ran on the trimmed value
    SurroundingWhitespace,
    /// Local part uses `+` subaddressing
    PlusAddressing,
    /// MX check ran and the domain has no mail exchanger
    NoMxRecord,
    /// MX check could not reach a conclusion (timeout, DNS unreachable)
    MxCheckFailed,
}

impl WarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SurroundingWhitespace => "SURROUNDING_WHITESPACE",
            Self::PlusAddressing => "PLUS_ADDRESSING",
            Self::NoMxRecord => "NO_MX_RECORD",
            Self::MxCheckFailed => "MX_CHECK_FAILED",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Validation Verdict
///
/// Outcome of validating one candidate address.
///
/// ## Fields
/// - `is_valid`: `true` exactly when `errors` is empty
/// - `email`: the input exactly as received
/// - `errors`: every violated syntax rule, in rule order
/// - `warnings`: advisory codes, in detection order
/// - `mx_valid`: MX verdict, `null` when MX checking was off or syntax failed
///
/// ## Example JSON
/// ```json
/// {
///   "is_valid": true,
///   "email": "user+news@example.com",
///   "errors": [],
///   "warnings": ["PLUS_ADDRESSING"],
///   "mx_valid": null
/// }
/// ```
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    is_valid: bool,
    email: String,
    errors: Vec<ErrorCode>,
    warnings: Vec<WarningCode>,
    mx_valid: Option<bool>,
}

impl ValidationResult {
    /// Builds a verdict, deriving `is_valid` from `errors`.
    ///
    /// An MX verdict is dropped when syntax errors are present.
    pub(crate) fn new(
        email: impl Into<String>,
        errors: Vec<ErrorCode>,
        warnings: Vec<WarningCode>,
        mx_valid: Option<bool>,
    ) -> Self {
        let is_valid = errors.is_empty();
        Self {
            is_valid,
            email: email.into(),
            errors,
            warnings,
            mx_valid: if is_valid { mx_valid } else { None },
        }
    }

    /// Verdict for input that never reached the syntax rules
    pub(crate) fn rejected(email: impl Into<String>, code: ErrorCode) -> Self {
        Self::new(email, vec![code], Vec::new(), None)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn errors(&self) -> &[ErrorCode] {
        &self.errors
    }

    pub fn warnings(&self) -> &[WarningCode] {
        &self.warnings
    }

    pub fn mx_valid(&self) -> Option<bool> {
        self.mx_valid
    }

    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.contains(&code)
    }

    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.contains(&code)
    }
}
