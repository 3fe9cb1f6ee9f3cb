/// Caching decorator for MX verdicts, with in-memory and Redis backends.
pub mod cache;

/// Mail exchanger lookups.
///
/// [`dnsmx::DomainResolver`] is the capability the validator depends on.
/// [`dnsmx::DnsResolver`] is the production implementation: it queries MX
/// records through trust-dns and falls back to plain host resolution when no
/// DNS configuration is available. [`dnsmx::StaticResolver`] answers from a
/// fixed table for tests and offline use.
pub mod dnsmx;

/// Validation verdicts and their error/warning codes.
pub mod result;

/// Rule-based syntax checks for email addresses.
///
/// Every rule runs and every violation is collected:
/// - Non-empty input containing exactly one `@`
/// - Local part: 1-64 characters from letters, digits and `. _ % + -`,
///   no leading, trailing or doubled dots
/// - Domain part: at most 253 characters, dot-separated labels of
///   letters, digits and inner hyphens, alphabetic TLD of 2+ characters
/// - Whole address at most 254 characters
///
/// # Examples
/// ```
/// use email_validator::validation::syntax::is_valid_email;
///
/// assert!(is_valid_email("user.name+tag@example.com"));
/// assert!(!is_valid_email("invalid@ex_mple.com"));
/// ```
pub mod syntax;

/// The address validator combining syntax rules with optional MX checks.
pub mod validator;

#[cfg(test)]
mod dnsmx_test;

pub use dnsmx::{DnsResolver, DomainResolver, MxRecord, StaticResolver, default_resolver};
pub use result::{ErrorCode, ValidationResult, WarningCode};
pub use validator::{EmailValidator, ValidatorOptions};
