//! Keyless public APIs that only publish current rates.

use std::sync::Arc;

use crate::constants::*;
use crate::errors::ServiceError;
use crate::http::{HttpClient, HttpRequest};
use crate::models::{ExchangeRateQuery, ServiceOptions};
use crate::service::{BuildService, ExchangeRateService};

const WEBSERVICEX_URL: &str = "http://www.webservicex.net/currencyconvertor.asmx/ConversionRate";
const CRYPTONATOR_URL: &str = "https://api.cryptonator.com/api/ticker";

/// WebserviceX currency converter.
pub struct WebserviceX {
    client: Arc<dyn HttpClient>,
}

impl WebserviceX {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }
}

impl BuildService for WebserviceX {
    fn build(client: Arc<dyn HttpClient>, _options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self::new(client))
    }
}

impl ExchangeRateService for WebserviceX {
    fn name(&self) -> &'static str {
        SERVICE_WEBSERVICEX
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        !query.is_historical()
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        Ok(HttpRequest::get(format!(
            "{}?FromCurrency={}&ToCurrency={}",
            WEBSERVICEX_URL,
            query.pair.base(),
            query.pair.quote()
        )))
    }
}

/// Cryptonator crypto-currency ticker.
pub struct Cryptonator {
    client: Arc<dyn HttpClient>,
}

impl Cryptonator {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }
}

impl BuildService for Cryptonator {
    fn build(client: Arc<dyn HttpClient>, _options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self::new(client))
    }
}

impl ExchangeRateService for Cryptonator {
    fn name(&self) -> &'static str {
        SERVICE_CRYPTONATOR
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        !query.is_historical()
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        // Ticker ids are lower-case, e.g. btc-usd
        Ok(HttpRequest::get(format!(
            "{}/{}-{}",
            CRYPTONATOR_URL,
            query.pair.base().to_ascii_lowercase(),
            query.pair.quote().to_ascii_lowercase()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::{historical, latest, RecordingClient};

    #[test]
    fn test_webservicex() {
        let service = WebserviceX::new(RecordingClient::shared());
        assert!(service.supports_query(&latest("EUR/USD")));
        assert!(!service.supports_query(&historical("EUR/USD", 2024, 1, 2)));
        assert_eq!(
            service.request(&latest("EUR/USD")).unwrap().url,
            "http://www.webservicex.net/currencyconvertor.asmx/ConversionRate?FromCurrency=EUR&ToCurrency=USD"
        );
    }

    #[test]
    fn test_cryptonator_ticker_id() {
        let service = Cryptonator::new(RecordingClient::shared());
        assert_eq!(
            service.request(&latest("BTC/USD")).unwrap().url,
            "https://api.cryptonator.com/api/ticker/btc-usd"
        );
    }

    #[tokio::test]
    async fn test_cryptonator_rejects_history_before_io() {
        let client = Arc::new(RecordingClient::new());
        let service = Cryptonator::new(client.clone());

        let result = service.fetch_response(&historical("BTC/USD", 2024, 1, 2)).await;
        assert!(matches!(result, Err(ServiceError::UnsupportedQuery { .. })));
        assert!(client.requests().is_empty());
    }
}
