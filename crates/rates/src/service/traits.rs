//! Exchange rate service trait definitions.
//!
//! This module defines [`ExchangeRateService`], implemented by every
//! provider client, and [`BuildService`], the constructor contract the
//! registry uses when a service is registered by type.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::models::{ExchangeRate, ExchangeRateQuery, ServiceOptions};

/// A client for one exchange rate data source.
///
/// # Example
///
/// ```ignore
/// use swap_rates::{ExchangeRateQuery, ExchangeRateService};
///
/// struct FixedRate;
///
/// #[async_trait::async_trait]
/// impl ExchangeRateService for FixedRate {
///     fn name(&self) -> &'static str {
///         "fixed"
///     }
///
///     fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
///         query.pair.base() == "EUR"
///     }
/// }
/// ```
#[async_trait]
pub trait ExchangeRateService: Send + Sync {
    /// Registry name of the service, e.g. "fixer".
    fn name(&self) -> &'static str;

    /// Whether the service can answer this query at all.
    ///
    /// Covers static restrictions such as a fixed base currency or the lack
    /// of historical data. It does not contact the provider.
    fn supports_query(&self, query: &ExchangeRateQuery) -> bool;

    /// The transport injected at construction, if the service uses HTTP.
    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        None
    }

    /// Build the provider request for a query, credentials included.
    ///
    /// Default implementation returns `NotSupported`.
    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        let _ = query;
        Err(ServiceError::NotSupported {
            operation: "request".to_string(),
            service: self.name().to_string(),
        })
    }

    /// Send the request for `query` through the injected transport.
    ///
    /// Fails with `UnsupportedQuery` before any I/O if the service cannot
    /// answer the query, and with `HttpStatus` on a non-2xx response.
    async fn fetch_response(&self, query: &ExchangeRateQuery) -> Result<HttpResponse, ServiceError> {
        if !self.supports_query(query) {
            return Err(ServiceError::UnsupportedQuery {
                service: self.name().to_string(),
                query: query.to_string(),
            });
        }

        let client = self.http_client().ok_or_else(|| ServiceError::NotSupported {
            operation: "fetch_response".to_string(),
            service: self.name().to_string(),
        })?;

        let request = self.request(query)?;
        let response = client.send(request).await?;

        if !response.is_success() {
            return Err(ServiceError::HttpStatus {
                service: self.name().to_string(),
                status: response.status,
            });
        }

        Ok(response)
    }

    /// Look up the rate for a query.
    ///
    /// Default implementation returns `NotSupported`; services that can
    /// answer locally override it.
    async fn get_exchange_rate(&self, query: &ExchangeRateQuery) -> Result<ExchangeRate, ServiceError> {
        let _ = query;
        Err(ServiceError::NotSupported {
            operation: "get_exchange_rate".to_string(),
            service: self.name().to_string(),
        })
    }
}

/// Constructor contract for services registered by type.
///
/// Each service reads the option keys it needs and reports missing or
/// malformed ones itself; the factory never inspects the options.
pub trait BuildService: ExchangeRateService + Sized + 'static {
    fn build(client: Arc<dyn HttpClient>, options: &ServiceOptions) -> Result<Self, ServiceError>;
}
