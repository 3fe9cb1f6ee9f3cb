use crate::error::ConfigError;
use crate::validation::ValidatorOptions;
use std::env;
use std::time::Duration;

/// Service settings read from the environment.
///
/// | Variable            | Default   |
/// |---------------------|-----------|
/// | `CHECK_MX`          | `false`   |
/// | `HOST`              | `0.0.0.0` |
/// | `PORT`              | `5000`    |
/// | `DEBUG`             | `false`   |
/// | `DNS_TIMEOUT_SECS`  | `5`       |
/// | `MX_CACHE_TTL_SECS` | `300`     |
/// | `REDIS_URL`         | unset     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub check_mx: bool,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub dns_timeout: Duration,
    /// Zero disables MX caching
    pub mx_cache_ttl: Duration,
    pub redis_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            check_mx: false,
            host: "0.0.0.0".to_string(),
            port: 5000,
            debug: false,
            dns_timeout: Duration::from_secs(5),
            mx_cache_ttl: Duration::from_secs(300),
            redis_url: None,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, which returns the raw value of a variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let dns_timeout_secs = parse_u64(&lookup, "DNS_TIMEOUT_SECS", defaults.dns_timeout.as_secs())?;
        if dns_timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "DNS_TIMEOUT_SECS",
                "0",
                "timeout must be greater than zero",
            ));
        }

        Ok(Self {
            check_mx: parse_bool(&lookup, "CHECK_MX", defaults.check_mx)?,
            host: lookup("HOST")
                .filter(|host| !host.trim().is_empty())
                .unwrap_or(defaults.host),
            port: match lookup("PORT") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::invalid_value("PORT", raw.as_str(), e.to_string()))?,
                None => defaults.port,
            },
            debug: parse_bool(&lookup, "DEBUG", defaults.debug)?,
            dns_timeout: Duration::from_secs(dns_timeout_secs),
            mx_cache_ttl: Duration::from_secs(parse_u64(
                &lookup,
                "MX_CACHE_TTL_SECS",
                defaults.mx_cache_ttl.as_secs(),
            )?),
            redis_url: lookup("REDIS_URL").filter(|url| !url.trim().is_empty()),
        })
    }

    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            check_mx: self.check_mx,
            dns_timeout: self.dns_timeout,
        }
    }
}

fn parse_bool<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::invalid_value(key, raw, "expected true or false")),
    }
}

fn parse_u64<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::invalid_value(key, raw.as_str(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.check_mx);
        assert_eq!(settings.port, 5000);
        assert!(!settings.debug);
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("CHECK_MX", "TRUE"),
            ("PORT", "8080"),
            ("DEBUG", "1"),
            ("HOST", "127.0.0.1"),
            ("DNS_TIMEOUT_SECS", "2"),
            ("MX_CACHE_TTL_SECS", "0"),
            ("REDIS_URL", "redis://127.0.0.1:6379"),
        ])
        .unwrap();

        assert!(settings.check_mx);
        assert_eq!(settings.port, 8080);
        assert!(settings.debug);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.dns_timeout, Duration::from_secs(2));
        assert_eq!(settings.mx_cache_ttl, Duration::ZERO);
        assert_eq!(settings.redis_url.as_deref(), Some("redis://127.0.0.1:6379"));
    }

    #[test]
    fn test_invalid_port() {
        let err = settings(&[("PORT", "abc")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn test_invalid_bool() {
        let err = settings(&[("CHECK_MX", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "CHECK_MX", .. }));
    }

    #[test]
    fn test_zero_dns_timeout_rejected() {
        assert!(settings(&[("DNS_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn test_blank_redis_url_ignored() {
        assert_eq!(settings(&[("REDIS_URL", "  ")]).unwrap().redis_url, None);
    }

    #[test]
    fn test_validator_options() {
        let settings = settings(&[("CHECK_MX", "true"), ("DNS_TIMEOUT_SECS", "3")]).unwrap();
        let options = settings.validator_options();
        assert!(options.check_mx);
        assert_eq!(options.dns_timeout, Duration::from_secs(3));
    }
}
