//! Error types for the rates crate.
//!
//! Every failure an adapter or derivation can produce falls into one of
//! three classes, and each class maps to a distinct HTTP status at the
//! request boundary:
//!
//! - [`RateError::Transport`]: the provider could not be reached (500)
//! - [`RateError::Upstream`]: the provider was reached but returned a
//!   non-success status, so no payload was obtained (500)
//! - [`RateError::Parse`]: a successfully fetched payload that could not be
//!   interpreted as a valid rate (502)

use thiserror::Error;

/// Errors that can occur while fetching or interpreting a provider rate.
#[derive(Error, Debug)]
pub enum RateError {
    /// The provider could not be reached at all (connect failure, timeout).
    #[error("Could not reach provider {provider}: {message}")]
    Transport {
        /// The provider that was unreachable
        provider: String,
        /// Underlying transport error message
        message: String,
    },

    /// The provider responded with a non-success HTTP status.
    /// The payload was never obtained, so this is not a parse problem.
    #[error("Provider {provider} responded with status {status}")]
    Upstream {
        /// The provider that returned the status
        provider: String,
        /// HTTP status code returned by the provider
        status: u16,
    },

    /// The payload was fetched with a success status but the expected rate
    /// fields were missing, malformed, or produced a non-positive value.
    #[error("Could not parse exchange rate from {provider}: {message}")]
    Parse {
        /// The provider whose payload could not be interpreted
        provider: String,
        /// Which field category was missing or malformed
        message: String,
    },
}

impl RateError {
    /// Build a [`RateError::Transport`] from a reqwest error.
    pub fn transport(provider: &str, err: reqwest::Error) -> Self {
        Self::Transport {
            provider: provider.to_string(),
            message: err.to_string(),
        }
    }

    /// Build a [`RateError::Upstream`] for a non-success status.
    pub fn upstream(provider: &str, status: reqwest::StatusCode) -> Self {
        Self::Upstream {
            provider: provider.to_string(),
            status: status.as_u16(),
        }
    }

    /// Build a [`RateError::Parse`] naming the missing field category.
    pub fn parse(provider: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_names_provider_and_field() {
        let error = RateError::parse("Wise", "missing rate field");
        assert_eq!(
            format!("{}", error),
            "Could not parse exchange rate from Wise: missing rate field"
        );
    }

    #[test]
    fn test_upstream_error_display() {
        let error = RateError::upstream("Banxico", reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            format!("{}", error),
            "Provider Banxico responded with status 503"
        );
    }
}
