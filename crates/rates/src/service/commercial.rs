//! Commercial API services.
//!
//! These providers require credentials passed as service options. The
//! credential key differs per provider (`access_key`, `app_id`, `api_key`,
//! `token`, `api-key`) and is checked when the service is built, so a
//! missing key surfaces from `ServiceFactory::create`.
//!
//! Fixer, currencylayer and Open Exchange Rates restrict the base currency
//! on their free plans; pass `enterprise: true` to lift the restriction.

use std::sync::Arc;

use urlencoding::encode;

use crate::constants::*;
use crate::errors::ServiceError;
use crate::http::{HttpClient, HttpRequest};
use crate::models::{ExchangeRateQuery, ServiceOptions};
use crate::service::{BuildService, ExchangeRateService};

const OPTION_ENTERPRISE: &str = "enterprise";

const FIXER_BASE_URL: &str = "http://data.fixer.io/api";
const CURRENCY_LAYER_BASE_URL: &str = "http://apilayer.net/api";
const OPEN_EXCHANGE_RATES_BASE_URL: &str = "https://openexchangerates.org/api";
const CURRENCY_DATA_FEED_URL: &str = "https://currencydatafeed.com/api/data.php";
const FORGE_URL: &str = "https://forex.1forge.com/1.0.3/quotes";
const XIGNITE_BASE_URL: &str = "https://globalcurrencies.xignite.com/xGlobalCurrencies.json";
const XCHANGEAPI_BASE_URL: &str = "https://api.xchangeapi.com";

/// Fixer.io. Requires `access_key`; base currency EUR unless `enterprise`.
pub struct Fixer {
    client: Arc<dyn HttpClient>,
    access_key: String,
    enterprise: bool,
}

impl BuildService for Fixer {
    fn build(client: Arc<dyn HttpClient>, options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self {
            access_key: options.require_str(SERVICE_FIXER, "access_key")?.to_string(),
            enterprise: options.get_bool(SERVICE_FIXER, OPTION_ENTERPRISE)?,
            client,
        })
    }
}

impl ExchangeRateService for Fixer {
    fn name(&self) -> &'static str {
        SERVICE_FIXER
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        self.enterprise || query.pair.base() == "EUR"
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        let endpoint = match query.date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "latest".to_string(),
        };
        Ok(HttpRequest::get(format!(
            "{}/{}?access_key={}&base={}&symbols={}",
            FIXER_BASE_URL,
            endpoint,
            encode(&self.access_key),
            query.pair.base(),
            query.pair.quote()
        )))
    }
}

/// currencylayer. Requires `access_key`; base currency USD unless `enterprise`.
pub struct CurrencyLayer {
    client: Arc<dyn HttpClient>,
    access_key: String,
    enterprise: bool,
}

impl BuildService for CurrencyLayer {
    fn build(client: Arc<dyn HttpClient>, options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self {
            access_key: options
                .require_str(SERVICE_CURRENCY_LAYER, "access_key")?
                .to_string(),
            enterprise: options.get_bool(SERVICE_CURRENCY_LAYER, OPTION_ENTERPRISE)?,
            client,
        })
    }
}

impl ExchangeRateService for CurrencyLayer {
    fn name(&self) -> &'static str {
        SERVICE_CURRENCY_LAYER
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        self.enterprise || query.pair.base() == "USD"
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        let mut url = match query.date {
            Some(date) => format!(
                "{}/historical?access_key={}&date={}",
                CURRENCY_LAYER_BASE_URL,
                encode(&self.access_key),
                date.format("%Y-%m-%d")
            ),
            None => format!(
                "{}/live?access_key={}",
                CURRENCY_LAYER_BASE_URL,
                encode(&self.access_key)
            ),
        };
        url.push_str(&format!("&currencies={}", query.pair.quote()));
        if self.enterprise {
            url.push_str(&format!("&source={}", query.pair.base()));
        }
        Ok(HttpRequest::get(url))
    }
}

/// Open Exchange Rates. Requires `app_id`; base currency USD unless `enterprise`.
pub struct OpenExchangeRates {
    client: Arc<dyn HttpClient>,
    app_id: String,
    enterprise: bool,
}

impl BuildService for OpenExchangeRates {
    fn build(client: Arc<dyn HttpClient>, options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self {
            app_id: options
                .require_str(SERVICE_OPEN_EXCHANGE_RATES, "app_id")?
                .to_string(),
            enterprise: options.get_bool(SERVICE_OPEN_EXCHANGE_RATES, OPTION_ENTERPRISE)?,
            client,
        })
    }
}

impl ExchangeRateService for OpenExchangeRates {
    fn name(&self) -> &'static str {
        SERVICE_OPEN_EXCHANGE_RATES
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        self.enterprise || query.pair.base() == "USD"
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        let path = match query.date {
            Some(date) => format!("historical/{}.json", date.format("%Y-%m-%d")),
            None => "latest.json".to_string(),
        };
        let mut url = format!(
            "{}/{}?app_id={}",
            OPEN_EXCHANGE_RATES_BASE_URL,
            path,
            encode(&self.app_id)
        );
        if self.enterprise {
            url.push_str(&format!(
                "&base={}&symbols={}",
                query.pair.base(),
                query.pair.quote()
            ));
        }
        Ok(HttpRequest::get(url))
    }
}

/// Currency Data Feed. Requires `api_key`; latest rates only.
pub struct CurrencyDataFeed {
    client: Arc<dyn HttpClient>,
    api_key: String,
}

impl BuildService for CurrencyDataFeed {
    fn build(client: Arc<dyn HttpClient>, options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self {
            api_key: options
                .require_str(SERVICE_CURRENCY_DATA_FEED, "api_key")?
                .to_string(),
            client,
        })
    }
}

impl ExchangeRateService for CurrencyDataFeed {
    fn name(&self) -> &'static str {
        SERVICE_CURRENCY_DATA_FEED
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        !query.is_historical()
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        Ok(HttpRequest::get(format!(
            "{}?token={}&currency={}",
            CURRENCY_DATA_FEED_URL,
            encode(&self.api_key),
            encode(&query.pair.to_string())
        )))
    }
}

/// 1Forge. Requires `api_key`; latest rates only.
pub struct Forge {
    client: Arc<dyn HttpClient>,
    api_key: String,
}

impl BuildService for Forge {
    fn build(client: Arc<dyn HttpClient>, options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self {
            api_key: options.require_str(SERVICE_FORGE, "api_key")?.to_string(),
            client,
        })
    }
}

impl ExchangeRateService for Forge {
    fn name(&self) -> &'static str {
        SERVICE_FORGE
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        !query.is_historical()
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        Ok(HttpRequest::get(format!(
            "{}?pairs={}&api_key={}",
            FORGE_URL,
            query.pair.concatenated(),
            encode(&self.api_key)
        )))
    }
}

/// Xignite global currencies. Requires `token`.
pub struct Xignite {
    client: Arc<dyn HttpClient>,
    token: String,
}

impl BuildService for Xignite {
    fn build(client: Arc<dyn HttpClient>, options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self {
            token: options.require_str(SERVICE_XIGNITE, "token")?.to_string(),
            client,
        })
    }
}

impl ExchangeRateService for Xignite {
    fn name(&self) -> &'static str {
        SERVICE_XIGNITE
    }

    fn supports_query(&self, _query: &ExchangeRateQuery) -> bool {
        true
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        let url = match query.date {
            Some(date) => format!(
                "{}/GetHistoricalRates?Symbols={}&AsOfDate={}&_Token={}&FixingTime=&PriceType=Mid",
                XIGNITE_BASE_URL,
                query.pair.concatenated(),
                encode(&date.format("%m/%d/%Y").to_string()),
                encode(&self.token)
            ),
            None => format!(
                "{}/GetRealTimeRates?Symbols={}&_fields=Outcome,Message,Symbol,Date,Time,Bid&_Token={}",
                XIGNITE_BASE_URL,
                query.pair.concatenated(),
                encode(&self.token)
            ),
        };
        Ok(HttpRequest::get(url))
    }
}

/// xchangeapi.com. Requires `api-key`, sent as a request header.
pub struct XchangeApi {
    client: Arc<dyn HttpClient>,
    api_key: String,
}

impl BuildService for XchangeApi {
    fn build(client: Arc<dyn HttpClient>, options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self {
            api_key: options.require_str(SERVICE_XCHANGEAPI, "api-key")?.to_string(),
            client,
        })
    }
}

impl ExchangeRateService for XchangeApi {
    fn name(&self) -> &'static str {
        SERVICE_XCHANGEAPI
    }

    fn supports_query(&self, _query: &ExchangeRateQuery) -> bool {
        true
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        let url = match query.date {
            Some(date) => format!(
                "{}/historical/{}?base={}",
                XCHANGEAPI_BASE_URL,
                date.format("%Y-%m-%d"),
                query.pair.base()
            ),
            None => format!("{}/latest?base={}", XCHANGEAPI_BASE_URL, query.pair.base()),
        };
        Ok(HttpRequest::get(url).with_header("api-key", self.api_key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::{historical, latest, RecordingClient};

    fn options(key: &str, value: &str) -> ServiceOptions {
        ServiceOptions::new().with(key, value)
    }

    #[test]
    fn test_missing_credentials() {
        let client = RecordingClient::shared();
        let empty = ServiceOptions::new();

        let cases: Vec<(&str, Result<(), ServiceError>)> = vec![
            ("access_key", Fixer::build(client.clone(), &empty).map(|_| ())),
            ("access_key", CurrencyLayer::build(client.clone(), &empty).map(|_| ())),
            ("app_id", OpenExchangeRates::build(client.clone(), &empty).map(|_| ())),
            ("api_key", CurrencyDataFeed::build(client.clone(), &empty).map(|_| ())),
            ("api_key", Forge::build(client.clone(), &empty).map(|_| ())),
            ("token", Xignite::build(client.clone(), &empty).map(|_| ())),
            ("api-key", XchangeApi::build(client.clone(), &empty).map(|_| ())),
        ];

        for (expected, result) in cases {
            match result {
                Err(ServiceError::MissingOption { option, .. }) => assert_eq!(option, expected),
                other => panic!("expected missing '{}', got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_fixer_free_plan_is_euro_only() {
        let fixer = Fixer::build(RecordingClient::shared(), &options("access_key", "k")).unwrap();
        assert!(fixer.supports_query(&latest("EUR/USD")));
        assert!(!fixer.supports_query(&latest("USD/EUR")));

        let enterprise = Fixer::build(
            RecordingClient::shared(),
            &options("access_key", "k").with("enterprise", true),
        )
        .unwrap();
        assert!(enterprise.supports_query(&latest("USD/EUR")));
    }

    #[test]
    fn test_fixer_urls() {
        let fixer = Fixer::build(RecordingClient::shared(), &options("access_key", "k y")).unwrap();
        assert_eq!(
            fixer.request(&latest("EUR/USD")).unwrap().url,
            "http://data.fixer.io/api/latest?access_key=k%20y&base=EUR&symbols=USD"
        );
        assert_eq!(
            fixer.request(&historical("EUR/USD", 2024, 1, 2)).unwrap().url,
            "http://data.fixer.io/api/2024-01-02?access_key=k%20y&base=EUR&symbols=USD"
        );
    }

    #[test]
    fn test_enterprise_flag_must_be_boolean() {
        let result = CurrencyLayer::build(
            RecordingClient::shared(),
            &options("access_key", "k").with("enterprise", "yes"),
        );
        assert!(matches!(result, Err(ServiceError::InvalidOption { .. })));
    }

    #[test]
    fn test_currency_layer_urls() {
        let layer =
            CurrencyLayer::build(RecordingClient::shared(), &options("access_key", "k")).unwrap();
        assert!(!layer.supports_query(&latest("EUR/USD")));
        assert_eq!(
            layer.request(&latest("USD/EUR")).unwrap().url,
            "http://apilayer.net/api/live?access_key=k&currencies=EUR"
        );

        let enterprise = CurrencyLayer::build(
            RecordingClient::shared(),
            &options("access_key", "k").with("enterprise", true),
        )
        .unwrap();
        assert_eq!(
            enterprise.request(&historical("EUR/GBP", 2019, 5, 6)).unwrap().url,
            "http://apilayer.net/api/historical?access_key=k&date=2019-05-06&currencies=GBP&source=EUR"
        );
    }

    #[test]
    fn test_open_exchange_rates_urls() {
        let oxr =
            OpenExchangeRates::build(RecordingClient::shared(), &options("app_id", "abc")).unwrap();
        assert!(oxr.supports_query(&latest("USD/JPY")));
        assert!(!oxr.supports_query(&latest("JPY/USD")));
        assert_eq!(
            oxr.request(&historical("USD/JPY", 2021, 12, 31)).unwrap().url,
            "https://openexchangerates.org/api/historical/2021-12-31.json?app_id=abc"
        );
    }

    #[test]
    fn test_latest_only_services() {
        let feed =
            CurrencyDataFeed::build(RecordingClient::shared(), &options("api_key", "k")).unwrap();
        let forge = Forge::build(RecordingClient::shared(), &options("api_key", "k")).unwrap();

        for service in [&feed as &dyn ExchangeRateService, &forge] {
            assert!(service.supports_query(&latest("EUR/USD")));
            assert!(!service.supports_query(&historical("EUR/USD", 2024, 1, 2)));
        }

        assert_eq!(
            feed.request(&latest("EUR/USD")).unwrap().url,
            "https://currencydatafeed.com/api/data.php?token=k&currency=EUR%2FUSD"
        );
        assert_eq!(
            forge.request(&latest("EUR/USD")).unwrap().url,
            "https://forex.1forge.com/1.0.3/quotes?pairs=EURUSD&api_key=k"
        );
    }

    #[test]
    fn test_xignite_historical_date_format() {
        let xignite = Xignite::build(RecordingClient::shared(), &options("token", "t")).unwrap();
        let url = xignite.request(&historical("GBP/AUD", 2016, 3, 1)).unwrap().url;
        assert!(url.contains("GetHistoricalRates?Symbols=GBPAUD"));
        assert!(url.contains("AsOfDate=03%2F01%2F2016"));
        assert!(url.contains("_Token=t"));
    }

    #[tokio::test]
    async fn test_xchangeapi_sends_key_header() {
        let client = Arc::new(RecordingClient::new());
        let api = XchangeApi::build(client.clone(), &options("api-key", "secret")).unwrap();

        api.fetch_response(&latest("EUR/USD")).await.unwrap();

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://api.xchangeapi.com/latest?base=EUR");
        assert_eq!(requests[0].header("api-key"), Some("secret"));
    }

    #[tokio::test]
    async fn test_rate_decoding_is_not_supported() {
        let forge = Forge::build(RecordingClient::shared(), &options("api_key", "k")).unwrap();
        assert!(matches!(
            forge.get_exchange_rate(&latest("EUR/USD")).await,
            Err(ServiceError::NotSupported { .. })
        ));
    }
}
