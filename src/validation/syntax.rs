use super::result::{ErrorCode, WarningCode};

/// Maximum length of a full address (RFC 5321 path limit minus brackets)
pub const MAX_ADDRESS_LENGTH: usize = 254;
/// Maximum length of the local part (RFC 5321)
pub const MAX_LOCAL_LENGTH: usize = 64;
/// Maximum length of the domain part
pub const MAX_DOMAIN_LENGTH: usize = 253;
/// Maximum length of a single domain label (RFC 1035)
pub const MAX_LABEL_LENGTH: usize = 63;

/// Outcome of the syntax rule pipeline for one address
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyntaxReport<'a> {
    pub errors: Vec<ErrorCode>,
    pub warnings: Vec<WarningCode>,
    /// Domain part, present whenever exactly one `@` was found
    pub domain: Option<&'a str>,
}

impl SyntaxReport<'_> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn fail(&mut self, code: ErrorCode) {
        if !self.errors.contains(&code) {
            self.errors.push(code);
        }
    }
}

/// Runs every syntax rule against an address and collects all violations.
///
/// Leading and trailing whitespace is trimmed before the rules run and
/// reported as [`WarningCode::SurroundingWhitespace`]. Rules run in a fixed
/// order:
/// 1. non-empty input
/// 2. exactly one `@`
/// 3. local part rules (skipped unless step 2 passed)
/// 4. domain part rules (skipped unless step 2 passed)
/// 5. overall length
///
/// # Examples
/// ```
/// use email_validator::validation::syntax::check_syntax;
/// use email_validator::validation::ErrorCode;
///
/// assert!(check_syntax("user.name+tag@example.com").is_valid());
/// assert_eq!(check_syntax("user@@example.com").errors, vec![ErrorCode::MultipleAt]);
/// ```
pub fn check_syntax(email: &str) -> SyntaxReport<'_> {
    let mut report = SyntaxReport::default();

    let candidate = email.trim();
    if candidate.len() != email.len() {
        report.warnings.push(WarningCode::SurroundingWhitespace);
    }

    if candidate.is_empty() {
        report.fail(ErrorCode::EmptyAddress);
        return report;
    }

    match candidate.matches('@').count() {
        0 => report.fail(ErrorCode::MissingAt),
        1 => {
            if let Some((local, domain)) = candidate.split_once('@') {
                check_local_part(local, &mut report);
                check_domain_part(domain, &mut report);
                report.domain = Some(domain);
            }
        }
        _ => report.fail(ErrorCode::MultipleAt),
    }

    if candidate.chars().count() > MAX_ADDRESS_LENGTH {
        report.fail(ErrorCode::AddressTooLong);
    }

    report
}

/// Quick boolean form of [`check_syntax`]
pub fn is_valid_email(email: &str) -> bool {
    check_syntax(email).is_valid()
}

fn check_local_part(local: &str, report: &mut SyntaxReport<'_>) {
    if local.is_empty() {
        report.fail(ErrorCode::EmptyLocalPart);
        return;
    }

    if local.chars().count() > MAX_LOCAL_LENGTH {
        report.fail(ErrorCode::LocalPartTooLong);
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        report.fail(ErrorCode::LocalPartInvalidDot);
    }

    if !local.chars().all(is_local_char) {
        report.fail(ErrorCode::LocalPartInvalidChars);
    }

    if local.contains('+') {
        report.warnings.push(WarningCode::PlusAddressing);
    }
}

fn check_domain_part(domain: &str, report: &mut SyntaxReport<'_>) {
    if domain.is_empty() {
        report.fail(ErrorCode::EmptyDomain);
        return;
    }

    if domain.chars().count() > MAX_DOMAIN_LENGTH {
        report.fail(ErrorCode::DomainTooLong);
    }

    let has_dot = domain.contains('.');
    if !has_dot {
        report.fail(ErrorCode::DomainMissingDot);
    }

    let labels: Vec<&str> = domain.split('.').collect();

    // Stray dots at either end, or a hyphen at the edge of any label
    if domain.starts_with('.')
        || domain.ends_with('.')
        || labels
            .iter()
            .any(|label| label.starts_with('-') || label.ends_with('-'))
    {
        report.fail(ErrorCode::DomainInvalidFormat);
    }

    if domain.contains("..") {
        report.fail(ErrorCode::DomainConsecutiveDots);
    }

    // Empty labels come from stray dots, which the checks above already report
    if labels
        .iter()
        .filter(|label| !label.is_empty())
        .any(|label| !is_valid_label(label))
    {
        report.fail(ErrorCode::DomainInvalidLabel);
    }

    if has_dot {
        if let Some(tld) = labels.last().filter(|label| !label.is_empty()) {
            if !is_valid_tld(tld) {
                report.fail(ErrorCode::DomainInvalidTld);
            }
        }
    }
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

/// Label must be `[A-Za-z0-9-]+`, not hyphen-bounded, at most 63 characters
fn is_valid_label(label: &str) -> bool {
    label.len() <= MAX_LABEL_LENGTH
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_valid_tld(tld: &str) -> bool {
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_standard_emails() {
        assert!(is_valid_email("simple@example.com"));
        assert!(is_valid_email("very.common@example.com"));
        assert!(is_valid_email("x@example.com"));
        assert!(is_valid_email("user_name%tag@sub.example.co.uk"));
    }

    #[test]
    fn domain_is_reported_with_single_at() {
        assert_eq!(check_syntax("user@example.com").domain, Some("example.com"));
        assert_eq!(check_syntax("user@").domain, Some(""));
        assert_eq!(check_syntax("user@@example.com").domain, None);
        assert_eq!(check_syntax("plainaddress").domain, None);
    }

    #[test]
    fn empty_input_stops_pipeline() {
        let report = check_syntax("");
        assert_eq!(report.errors, vec![ErrorCode::EmptyAddress]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn whitespace_only_is_empty() {
        let report = check_syntax("   ");
        assert_eq!(report.errors, vec![ErrorCode::EmptyAddress]);
        assert_eq!(report.warnings, vec![WarningCode::SurroundingWhitespace]);
    }

    #[test]
    fn missing_at() {
        assert_eq!(check_syntax("plainaddress").errors, vec![ErrorCode::MissingAt]);
    }

    #[test]
    fn collects_every_violation() {
        let report = check_syntax(".us er@-bad_label..c");
        assert_eq!(
            report.errors,
            vec![
                ErrorCode::LocalPartInvalidDot,
                ErrorCode::LocalPartInvalidChars,
                ErrorCode::DomainInvalidFormat,
                ErrorCode::DomainConsecutiveDots,
                ErrorCode::DomainInvalidLabel,
                ErrorCode::DomainInvalidTld,
            ]
        );
    }

    #[test]
    fn hyphen_at_any_label_edge_is_a_format_error() {
        let expected = vec![ErrorCode::DomainInvalidFormat, ErrorCode::DomainInvalidLabel];
        assert_eq!(check_syntax("user@-domain.com").errors, expected);
        assert_eq!(check_syntax("user@domain-.com").errors, expected);
        assert_eq!(check_syntax("user@mail.-domain.com").errors, expected);
        assert!(check_syntax("user@my-domain.com").is_valid());
    }

    #[test]
    fn codes_are_not_repeated() {
        let report = check_syntax("a..b.@x..y..com");
        assert_eq!(
            report.errors,
            vec![ErrorCode::LocalPartInvalidDot, ErrorCode::DomainConsecutiveDots]
        );
    }
}
