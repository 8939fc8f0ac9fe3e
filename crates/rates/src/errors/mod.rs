//! Error types for the exchange rate service crate.
//!
//! This module provides [`ServiceError`], the single error enum returned by
//! the registry, the factory, the HTTP transports and the services themselves.

use thiserror::Error;

/// Errors that can occur while configuring or using exchange rate services.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The supplied HTTP client does not satisfy the client contract.
    /// Raised when building a transport from configuration fails.
    #[error("Invalid HTTP client: {0}")]
    InvalidClient(String),

    /// No HTTP client was supplied and none could be discovered.
    #[error("No HTTP client found. Enable a discoverable client implementation or pass one explicitly")]
    NoClientFound,

    /// The requested service name has no registry entry.
    #[error("Unknown service '{name}'. Available services: {available:?}")]
    UnknownService {
        /// The name that was looked up
        name: String,
        /// Names registered at the time of the lookup
        available: Vec<String>,
    },

    /// A service was constructed without one of its required options.
    #[error("Service '{service}' requires the '{option}' option")]
    MissingOption {
        /// The service being constructed
        service: String,
        /// The missing option key
        option: String,
    },

    /// An option was present but had the wrong shape.
    #[error("Invalid option '{option}' for service '{service}': {message}")]
    InvalidOption {
        /// The service being constructed
        service: String,
        /// The offending option key
        option: String,
        /// What was wrong with the value
        message: String,
    },

    /// Options could not be built from the given value.
    #[error("Invalid service options: {0}")]
    InvalidOptions(String),

    /// A currency pair string could not be parsed.
    #[error("Invalid currency pair: {0}")]
    InvalidCurrencyPair(String),

    /// The service cannot answer this query (pair, base currency or date).
    #[error("Service '{service}' does not support query {query}")]
    UnsupportedQuery {
        /// The service that rejected the query
        service: String,
        /// Display form of the query
        query: String,
    },

    /// The operation is not implemented by the service.
    #[error("Operation '{operation}' not supported by service '{service}'")]
    NotSupported {
        /// The unsupported operation
        operation: String,
        /// The service that does not support it
        service: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("Service '{service}' returned HTTP {status}")]
    HttpStatus {
        /// The service that issued the request
        service: String,
        /// The HTTP status code
        status: u16,
    },

    /// A transport failed without a lower-level network error.
    #[error("Transport error from '{client}': {message}")]
    Transport {
        /// The transport that failed
        client: String,
        /// The failure message
        message: String,
    },

    /// A network error occurred while talking to a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ServiceError {
    /// Returns true for errors caused by how the factory or a service was
    /// configured, as opposed to failures while talking to a provider.
    ///
    /// # Examples
    ///
    /// ```
    /// use swap_rates::errors::ServiceError;
    ///
    /// let error = ServiceError::MissingOption {
    ///     service: "fixer".to_string(),
    ///     option: "access_key".to_string(),
    /// };
    /// assert!(error.is_configuration_error());
    ///
    /// let error = ServiceError::HttpStatus { service: "fixer".to_string(), status: 503 };
    /// assert!(!error.is_configuration_error());
    /// ```
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::InvalidClient(_)
            | Self::NoClientFound
            | Self::UnknownService { .. }
            | Self::MissingOption { .. }
            | Self::InvalidOption { .. }
            | Self::InvalidOptions(_) => true,

            Self::InvalidCurrencyPair(_)
            | Self::UnsupportedQuery { .. }
            | Self::NotSupported { .. }
            | Self::HttpStatus { .. }
            | Self::Transport { .. }
            | Self::Network(_) => false,
        }
    }

    pub(crate) fn missing_option(service: &str, option: &str) -> Self {
        Self::MissingOption {
            service: service.to_string(),
            option: option.to_string(),
        }
    }

    pub(crate) fn invalid_option(service: &str, option: &str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            service: service.to_string(),
            option: option.to_string(),
            message: message.into(),
        }
    }
}
