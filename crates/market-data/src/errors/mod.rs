//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching prices.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered, but the payload could not be understood.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the payload
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// The provider is not configured well enough to be used.
    #[error("Provider misconfigured: {0}")]
    Configuration(String),

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether a later attempt could succeed without any change on our side.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            MarketDataError::Timeout { .. }
                | MarketDataError::Network(_)
                | MarketDataError::ProviderError { .. }
        )
    }
}
