use std::time::Duration;

/// Failures raised while building the service from its configuration.
///
/// These are caller mistakes (bad environment values, impossible options) and
/// surface once at startup rather than on individual requests.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Validator options that cannot work together
    #[error("invalid validator options: {message}")]
    InvalidOptions { message: String },

    /// The Redis client rejected the connection URL
    #[error("redis cache unavailable: {source}")]
    Cache {
        #[from]
        source: redis::RedisError,
    },
}

impl ConfigError {
    pub fn invalid_value(key: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}

/// Infrastructural DNS failure.
///
/// A domain without MX records is not a `DnsError`; resolvers report that as
/// `Ok(false)`. This type only covers lookups whose outcome is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DnsError {
    #[error("DNS lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("DNS lookup failed: {0}")]
    Unavailable(String),
}
