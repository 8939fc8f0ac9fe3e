use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pair::CurrencyPair;

/// A request for the rate of a currency pair, latest or as of a date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateQuery {
    /// Pair being priced
    pub pair: CurrencyPair,

    /// Historical date, `None` for the latest rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ExchangeRateQuery {
    /// Query for the latest rate.
    pub fn latest(pair: CurrencyPair) -> Self {
        Self { pair, date: None }
    }

    /// Query for the rate as of `date`.
    pub fn historical(pair: CurrencyPair, date: NaiveDate) -> Self {
        Self {
            pair,
            date: Some(date),
        }
    }

    pub fn is_historical(&self) -> bool {
        self.date.is_some()
    }
}

impl fmt::Display for ExchangeRateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(date) => write!(f, "{} at {}", self.pair, date),
            None => write!(f, "{} (latest)", self.pair),
        }
    }
}

/// An exchange rate returned by a service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Pair the rate applies to
    pub pair: CurrencyPair,

    /// Units of quote currency per unit of base currency
    pub value: Decimal,

    /// When the rate was observed
    pub date: DateTime<Utc>,

    /// Name of the service that produced the rate
    pub provider: String,
}

impl ExchangeRate {
    pub fn new(pair: CurrencyPair, value: Decimal, date: DateTime<Utc>, provider: String) -> Self {
        Self {
            pair,
            value,
            date,
            provider,
        }
    }
}
