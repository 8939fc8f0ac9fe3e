//! Exchange rate models
//!
//! This module contains the data types shared by the registry, the factory
//! and the services:
//! - `pair` - Currency pair identity (CurrencyPair)
//! - `rate` - Query and result types (ExchangeRateQuery, ExchangeRate)
//! - `options` - Per-service construction options (ServiceOptions, ServiceSpec)

mod options;
mod pair;
mod rate;

pub use options::{ServiceOptions, ServiceSpec};
pub use pair::CurrencyPair;
pub use rate::{ExchangeRate, ExchangeRateQuery};
