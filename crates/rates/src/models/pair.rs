use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A currency pair such as `EUR/USD`.
///
/// The base currency is the one being priced, the quote currency the one it
/// is priced in. Codes are stored upper-cased.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    /// Create a pair from two currency codes.
    pub fn new(base: &str, quote: &str) -> Result<Self, ServiceError> {
        let base = normalize_code(base)
            .ok_or_else(|| ServiceError::InvalidCurrencyPair(format!("{}/{}", base, quote)))?;
        let quote = normalize_code(quote)
            .ok_or_else(|| ServiceError::InvalidCurrencyPair(format!("{}/{}", base, quote)))?;
        Ok(Self { base, quote })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// The pair with base and quote swapped.
    pub fn inverted(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }

    /// Pair rendered without the separator, e.g. `EURUSD`.
    pub fn concatenated(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

/// Currency codes are 2 to 10 ASCII alphanumerics (ISO 4217 plus crypto tickers).
fn normalize_code(code: &str) -> Option<String> {
    let code = code.trim();
    let valid = (2..=10).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| code.to_ascii_uppercase())
}

impl FromStr for CurrencyPair {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((base, quote)) => Self::new(base, quote),
            None => Err(ServiceError::InvalidCurrencyPair(s.to_string())),
        }
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = ServiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
