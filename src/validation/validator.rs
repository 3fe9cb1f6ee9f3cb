use super::dnsmx::{DEFAULT_DNS_TIMEOUT, DomainResolver, default_resolver};
use super::result::{ValidationResult, WarningCode};
use super::syntax::{SyntaxReport, check_syntax};
use crate::error::ConfigError;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Construction options for [`EmailValidator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Verify the domain's MX records after syntax passes
    pub check_mx: bool,
    /// Bound on each lookup made by the default resolver
    pub dns_timeout: Duration,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            check_mx: false,
            dns_timeout: DEFAULT_DNS_TIMEOUT,
        }
    }
}

/// Validates email addresses and, optionally, their domain's mail exchangers.
///
/// Syntax problems are reported in the result, never as errors. When MX
/// checking is on, the domain is only looked up for addresses whose syntax
/// passed, and DNS failures degrade to `mx_valid = false` with a
/// [`WarningCode::MxCheckFailed`] warning.
///
/// # Example
/// ```
/// # tokio_test::block_on(async {
/// use email_validator::validation::EmailValidator;
///
/// let validator = EmailValidator::new();
/// let result = validator.validate("user@example.com").await;
/// assert!(result.is_valid());
/// assert_eq!(result.mx_valid(), None);
/// # });
/// ```
#[derive(Clone, Default)]
pub struct EmailValidator {
    mx_resolver: Option<Arc<dyn DomainResolver>>,
}

impl EmailValidator {
    /// Syntax-only validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator using an injected resolver; the resolver is ignored unless `check_mx`
    pub fn with_resolver(check_mx: bool, resolver: Arc<dyn DomainResolver>) -> Self {
        Self {
            mx_resolver: check_mx.then_some(resolver),
        }
    }

    /// Builds a validator from options, creating the default resolver when MX
    /// checking is requested and none is injected.
    pub fn from_options(
        options: ValidatorOptions,
        resolver: Option<Arc<dyn DomainResolver>>,
    ) -> Result<Self, ConfigError> {
        if !options.check_mx {
            return Ok(Self::new());
        }

        let resolver = match resolver {
            Some(resolver) => resolver,
            None if options.dns_timeout.is_zero() => {
                return Err(ConfigError::invalid_options(
                    "MX checking needs a DNS timeout greater than zero",
                ));
            }
            None => default_resolver(options.dns_timeout),
        };

        Ok(Self::with_resolver(true, resolver))
    }

    pub fn check_mx(&self) -> bool {
        self.mx_resolver.is_some()
    }

    /// Validates one address, consulting DNS when MX checking is enabled
    pub async fn validate(&self, email: &str) -> ValidationResult {
        let SyntaxReport {
            errors,
            mut warnings,
            domain,
        } = check_syntax(email);

        let mut mx_valid = None;
        if errors.is_empty() {
            if let (Some(resolver), Some(domain)) = (&self.mx_resolver, domain) {
                mx_valid = Some(Self::lookup_mx(resolver.as_ref(), domain, &mut warnings).await);
            }
        }

        let result = ValidationResult::new(email, errors, warnings, mx_valid);
        debug!(
            "Validated {:?}: valid={} errors={:?} mx_valid={:?}",
            email,
            result.is_valid(),
            result.errors(),
            result.mx_valid()
        );
        result
    }

    /// Validates one address with MX checking forced off
    pub fn validate_syntax(&self, email: &str) -> ValidationResult {
        let SyntaxReport {
            errors, warnings, ..
        } = check_syntax(email);
        ValidationResult::new(email, errors, warnings, None)
    }

    /// Quick syntax-only verdict
    pub fn is_valid(&self, email: &str) -> bool {
        self.validate_syntax(email).is_valid()
    }

    /// Validates every address concurrently.
    ///
    /// Results are index-aligned with the input regardless of which lookups
    /// finish first.
    pub async fn validate_batch<S: AsRef<str>>(&self, emails: &[S]) -> Vec<ValidationResult> {
        join_all(emails.iter().map(|email| self.validate(email.as_ref()))).await
    }

    async fn lookup_mx(
        resolver: &dyn DomainResolver,
        domain: &str,
        warnings: &mut Vec<WarningCode>,
    ) -> bool {
        match resolver.has_mail_exchanger(domain).await {
            Ok(true) => true,
            Ok(false) => {
                warnings.push(WarningCode::NoMxRecord);
                false
            }
            Err(e) => {
                warn!("MX check for {} failed: {}", domain, e);
                warnings.push(WarningCode::MxCheckFailed);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DnsError;
    use crate::validation::dnsmx::{MockDomainResolver, StaticResolver};
    use crate::validation::result::ErrorCode;
    use mockall::predicate::eq;

    fn mx_validator(resolver: StaticResolver) -> (EmailValidator, Arc<StaticResolver>) {
        let resolver = Arc::new(resolver);
        (EmailValidator::with_resolver(true, resolver.clone()), resolver)
    }

    #[tokio::test]
    async fn test_valid_email_without_mx() {
        let result = EmailValidator::new().validate("user@example.com").await;

        assert!(result.is_valid());
        assert_eq!(result.email(), "user@example.com");
        assert!(result.errors().is_empty());
        assert_eq!(result.mx_valid(), None);
    }

    #[tokio::test]
    async fn test_mx_true_from_resolver() {
        let mut resolver = MockDomainResolver::new();
        resolver
            .expect_has_mail_exchanger()
            .with(eq("example.com"))
            .times(1)
            .returning(|_| Ok(true));

        let validator = EmailValidator::with_resolver(true, Arc::new(resolver));
        let result = validator.validate("user@example.com").await;

        assert!(result.is_valid());
        assert_eq!(result.mx_valid(), Some(true));
        assert!(result.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_mx_false_is_a_warning_only() {
        let (validator, _) = mx_validator(StaticResolver::new().with_response("nomail.org", false));
        let result = validator.validate("user@nomail.org").await;

        assert!(result.is_valid());
        assert_eq!(result.mx_valid(), Some(false));
        assert_eq!(result.warnings(), &[WarningCode::NoMxRecord]);
    }

    #[tokio::test]
    async fn test_dns_failure_degrades() {
        let mut resolver = MockDomainResolver::new();
        resolver
            .expect_has_mail_exchanger()
            .returning(|_| Err(DnsError::Timeout(Duration::from_secs(5))));

        let validator = EmailValidator::with_resolver(true, Arc::new(resolver));
        let result = validator.validate("user@example.com").await;

        assert!(result.is_valid());
        assert_eq!(result.mx_valid(), Some(false));
        assert!(result.has_warning(WarningCode::MxCheckFailed));
    }

    #[tokio::test]
    async fn test_mx_skipped_on_syntax_failure() {
        let mut resolver = MockDomainResolver::new();
        resolver.expect_has_mail_exchanger().never();

        let validator = EmailValidator::with_resolver(true, Arc::new(resolver));
        for email in ["", "plainaddress", "@domain.com", "user@", "user@@domain.com", "user@domain..com"] {
            let result = validator.validate(email).await;
            assert!(!result.is_valid(), "{email} should be invalid");
            assert_eq!(result.mx_valid(), None, "{email} should skip MX");
        }
    }

    #[tokio::test]
    async fn test_resolver_ignored_when_mx_disabled() {
        let mut resolver = MockDomainResolver::new();
        resolver.expect_has_mail_exchanger().never();

        let validator = EmailValidator::with_resolver(false, Arc::new(resolver));
        assert!(!validator.check_mx());
        assert_eq!(validator.validate("user@example.com").await.mx_valid(), None);
    }

    #[tokio::test]
    async fn test_whitespace_is_reported_not_hidden() {
        let (validator, resolver) = mx_validator(StaticResolver::new().with_response("example.com", true));
        let result = validator.validate("  user@example.com  ").await;

        assert!(result.is_valid());
        assert_eq!(result.email(), "  user@example.com  ");
        assert_eq!(result.warnings(), &[WarningCode::SurroundingWhitespace]);
        assert_eq!(result.mx_valid(), Some(true));
        assert_eq!(resolver.calls(), vec!["example.com"]);
    }

    #[tokio::test]
    async fn test_validate_syntax_forces_mx_off() {
        let mut resolver = MockDomainResolver::new();
        resolver.expect_has_mail_exchanger().never();

        let validator = EmailValidator::with_resolver(true, Arc::new(resolver));
        assert_eq!(validator.validate_syntax("user@example.com").mx_valid(), None);
        assert!(validator.is_valid("user@example.com"));
        assert!(!validator.is_valid("user@"));
    }

    #[tokio::test]
    async fn test_validate_is_idempotent() {
        let (validator, _) = mx_validator(StaticResolver::new().with_response("example.com", true));

        for email in ["user+tag@example.com", "bad..local@example.com", "user@nomail.org"] {
            assert_eq!(validator.validate(email).await, validator.validate(email).await);
        }
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_independence() {
        let (validator, _) = mx_validator(
            StaticResolver::new()
                .with_response("example.com", true)
                .with_failure("down.net"),
        );
        let emails = vec![
            "user@example.com".to_string(),
            "not-an-email".to_string(),
            "user@down.net".to_string(),
            "user@@example.com".to_string(),
            "other@example.com".to_string(),
        ];

        let results = validator.validate_batch(&emails).await;

        assert_eq!(results.len(), emails.len());
        for (result, email) in results.iter().zip(&emails) {
            assert_eq!(result.email(), email);
        }
        assert_eq!(results[0].mx_valid(), Some(true));
        assert_eq!(results[1].errors(), &[ErrorCode::MissingAt]);
        assert!(results[2].has_warning(WarningCode::MxCheckFailed));
        assert_eq!(results[3].errors(), &[ErrorCode::MultipleAt]);
        assert_eq!(results[4].mx_valid(), Some(true));
    }

    #[tokio::test]
    async fn test_batch_lookups_run_concurrently() {
        struct SlowResolver;

        #[async_trait::async_trait]
        impl DomainResolver for SlowResolver {
            async fn has_mail_exchanger(&self, _domain: &str) -> Result<bool, DnsError> {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(true)
            }

            async fn mx_records(
                &self,
                _domain: &str,
            ) -> Result<Vec<crate::validation::dnsmx::MxRecord>, DnsError> {
                Ok(Vec::new())
            }
        }

        let validator = EmailValidator::with_resolver(true, Arc::new(SlowResolver));
        let emails: Vec<String> = (0..10).map(|i| format!("user{i}@example.com")).collect();

        let started = std::time::Instant::now();
        let results = validator.validate_batch(&emails).await;

        assert!(results.iter().all(|r| r.mx_valid() == Some(true)));
        assert!(started.elapsed() < Duration::from_millis(1500));
    }

    #[test]
    fn test_from_options_without_mx() {
        let validator = EmailValidator::from_options(ValidatorOptions::default(), None).unwrap();
        assert!(!validator.check_mx());
    }

    #[test]
    fn test_from_options_with_injected_resolver() {
        let options = ValidatorOptions {
            check_mx: true,
            ..ValidatorOptions::default()
        };
        let validator =
            EmailValidator::from_options(options, Some(Arc::new(StaticResolver::new()))).unwrap();
        assert!(validator.check_mx());
    }

    #[test]
    fn test_from_options_rejects_zero_timeout() {
        let options = ValidatorOptions {
            check_mx: true,
            dns_timeout: Duration::ZERO,
        };
        assert!(matches!(
            EmailValidator::from_options(options, None),
            Err(ConfigError::InvalidOptions { .. })
        ));
    }

    #[tokio::test]
    async fn test_from_options_builds_default_resolver() {
        let options = ValidatorOptions {
            check_mx: true,
            dns_timeout: Duration::from_secs(1),
        };
        let validator = EmailValidator::from_options(options, None).unwrap();
        assert!(validator.check_mx());
    }
}
