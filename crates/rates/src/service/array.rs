//! In-memory service backed by seed data.
//!
//! Useful for tests, fixtures and fixed internal rates. Rates are read from
//! the `latest` (or positional `"0"`) and `historical` (or positional `"1"`)
//! options:
//!
//! ```text
//! latest:     { "EUR/USD": 1.1, "EUR/GBP": "0.85" }
//! historical: { "2024-01-02": { "EUR/USD": 1.09 } }
//! ```

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::constants::SERVICE_ARRAY;
use crate::errors::ServiceError;
use crate::http::HttpClient;
use crate::models::{CurrencyPair, ExchangeRate, ExchangeRateQuery, ServiceOptions};
use crate::service::{BuildService, ExchangeRateService};

const OPTION_LATEST: [&str; 2] = ["latest", "0"];
const OPTION_HISTORICAL: [&str; 2] = ["historical", "1"];

type RateTable = HashMap<CurrencyPair, Decimal>;

/// Exchange rate service answering from in-memory tables.
#[derive(Clone, Debug, Default)]
pub struct ArrayService {
    latest: RateTable,
    historical: HashMap<NaiveDate, RateTable>,
}

impl ArrayService {
    pub fn new(latest: RateTable, historical: HashMap<NaiveDate, RateTable>) -> Self {
        Self { latest, historical }
    }

    /// Service with no rates at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn latest_rates(&self) -> &RateTable {
        &self.latest
    }

    pub fn historical_rates(&self) -> &HashMap<NaiveDate, RateTable> {
        &self.historical
    }

    /// Parse rates from service options.
    pub fn from_options(options: &ServiceOptions) -> Result<Self, ServiceError> {
        let latest = match options.get_any(&OPTION_LATEST) {
            None | Some(Value::Null) => RateTable::new(),
            Some(value) => parse_table(OPTION_LATEST[0], as_object(OPTION_LATEST[0], value)?)?,
        };

        let mut historical = HashMap::new();
        if let Some(value) = options.get_any(&OPTION_HISTORICAL) {
            if !value.is_null() {
                for (date, table) in as_object(OPTION_HISTORICAL[0], value)? {
                    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                        ServiceError::invalid_option(
                            SERVICE_ARRAY,
                            OPTION_HISTORICAL[0],
                            format!("invalid date '{}': {}", date, e),
                        )
                    })?;
                    let table = parse_table(
                        OPTION_HISTORICAL[0],
                        as_object(OPTION_HISTORICAL[0], table)?,
                    )?;
                    historical.insert(date, table);
                }
            }
        }

        Ok(Self { latest, historical })
    }

    fn lookup(&self, query: &ExchangeRateQuery) -> Option<Decimal> {
        let table = match query.date {
            Some(date) => self.historical.get(&date)?,
            None => &self.latest,
        };
        table.get(&query.pair).copied()
    }
}

fn as_object<'a>(option: &str, value: &'a Value) -> Result<&'a Map<String, Value>, ServiceError> {
    value.as_object().ok_or_else(|| {
        ServiceError::invalid_option(
            SERVICE_ARRAY,
            option,
            format!("expected a map of rates, got {}", value),
        )
    })
}

fn parse_table(option: &str, raw: &Map<String, Value>) -> Result<RateTable, ServiceError> {
    raw.iter()
        .map(|(pair, rate)| {
            let pair = CurrencyPair::from_str(pair)
                .map_err(|e| ServiceError::invalid_option(SERVICE_ARRAY, option, e.to_string()))?;
            let rate = parse_rate(rate).ok_or_else(|| {
                ServiceError::invalid_option(
                    SERVICE_ARRAY,
                    option,
                    format!("invalid rate for {}: {}", pair, rate),
                )
            })?;
            Ok((pair, rate))
        })
        .collect()
}

/// Numbers go through their textual form so 1.1 stays exactly 1.1.
fn parse_rate(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

impl BuildService for ArrayService {
    fn build(_client: Arc<dyn HttpClient>, options: &ServiceOptions) -> Result<Self, ServiceError> {
        Self::from_options(options)
    }
}

#[async_trait]
impl ExchangeRateService for ArrayService {
    fn name(&self) -> &'static str {
        SERVICE_ARRAY
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        self.lookup(query).is_some()
    }

    async fn get_exchange_rate(&self, query: &ExchangeRateQuery) -> Result<ExchangeRate, ServiceError> {
        let value = self
            .lookup(query)
            .ok_or_else(|| ServiceError::UnsupportedQuery {
                service: SERVICE_ARRAY.to_string(),
                query: query.to_string(),
            })?;

        let date = match query.date {
            Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
            None => Utc::now(),
        };

        Ok(ExchangeRate::new(
            query.pair.clone(),
            value,
            date,
            SERVICE_ARRAY.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::{historical, latest, RecordingClient};
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_positional_seed_data() {
        let options = ServiceOptions::try_from(json!([{"EUR/USD": 1.0}])).unwrap();
        let service = ArrayService::build(RecordingClient::shared(), &options).unwrap();

        assert_eq!(service.latest_rates().len(), 1);
        assert!(service.supports_query(&latest("EUR/USD")));
        assert!(!service.supports_query(&latest("USD/EUR")));
    }

    #[test]
    fn test_named_seed_data() {
        let options = ServiceOptions::new()
            .with("latest", json!({"EUR/GBP": "0.85"}))
            .with("historical", json!({"2024-01-02": {"EUR/USD": 1.0945}}));
        let service = ArrayService::from_options(&options).unwrap();

        assert!(service.supports_query(&latest("EUR/GBP")));
        assert!(service.supports_query(&historical("EUR/USD", 2024, 1, 2)));
        assert!(!service.supports_query(&historical("EUR/USD", 2024, 1, 3)));
        assert!(!service.supports_query(&latest("EUR/USD")));
    }

    #[test]
    fn test_empty_service_supports_nothing() {
        let service = ArrayService::from_options(&ServiceOptions::new()).unwrap();
        assert!(service.latest_rates().is_empty());
        assert!(service.historical_rates().is_empty());
        assert!(!ArrayService::empty().supports_query(&latest("EUR/USD")));
    }

    #[test]
    fn test_invalid_seed_data() {
        let bad_pair = ServiceOptions::new().with("latest", json!({"EURUSD": 1.0}));
        assert!(matches!(
            ArrayService::from_options(&bad_pair),
            Err(ServiceError::InvalidOption { .. })
        ));

        let bad_rate = ServiceOptions::new().with("latest", json!({"EUR/USD": true}));
        assert!(matches!(
            ArrayService::from_options(&bad_rate),
            Err(ServiceError::InvalidOption { .. })
        ));

        let bad_date = ServiceOptions::new().with("historical", json!({"02/01/2024": {}}));
        assert!(matches!(
            ArrayService::from_options(&bad_date),
            Err(ServiceError::InvalidOption { .. })
        ));

        let not_a_map = ServiceOptions::new().with("latest", json!([1, 2]));
        assert!(matches!(
            ArrayService::from_options(&not_a_map),
            Err(ServiceError::InvalidOption { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_latest_rate() {
        let options = ServiceOptions::new().with("latest", json!({"EUR/USD": 1.1}));
        let service = ArrayService::from_options(&options).unwrap();

        let rate = service.get_exchange_rate(&latest("EUR/USD")).await.unwrap();
        assert_eq!(rate.value, dec!(1.1));
        assert_eq!(rate.provider, "array");
        assert_eq!(rate.pair.to_string(), "EUR/USD");
    }

    #[tokio::test]
    async fn test_get_historical_rate() {
        let options = ServiceOptions::new()
            .with("historical", json!({"2024-01-02": {"EUR/USD": "1.0945"}}));
        let service = ArrayService::from_options(&options).unwrap();

        let rate = service
            .get_exchange_rate(&historical("EUR/USD", 2024, 1, 2))
            .await
            .unwrap();
        assert_eq!(rate.value, dec!(1.0945));
        assert_eq!(rate.date.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[tokio::test]
    async fn test_missing_rate_is_unsupported() {
        let service = ArrayService::empty();
        assert!(matches!(
            service.get_exchange_rate(&latest("EUR/USD")).await,
            Err(ServiceError::UnsupportedQuery { .. })
        ));
        assert!(matches!(
            service.fetch_response(&latest("EUR/USD")).await,
            Err(ServiceError::UnsupportedQuery { .. })
        ));
    }

    #[tokio::test]
    async fn test_no_http_for_seeded_rates() {
        let service = ArrayService::from_options(
            &ServiceOptions::new().with("latest", json!({"EUR/USD": 1.1})),
        )
        .unwrap();
        assert!(service.http_client().is_none());
        assert!(matches!(
            service.fetch_response(&latest("EUR/USD")).await,
            Err(ServiceError::NotSupported { .. })
        ));
    }
}
