//! Exchange rate service abstractions and the built-in services.
//!
//! This module contains:
//! - The `ExchangeRateService` trait that all services implement
//! - The `BuildService` constructor contract used by the registry
//! - The built-in services: central banks, commercial APIs, keyless public
//!   APIs and the in-memory `ArrayService`
//!
//! Services only describe provider requests and send them through the
//! injected `HttpClient`. Decoding each provider's payload into a rate is
//! left to the provider integrations built on top of this crate.

mod array;
mod central_bank;
mod commercial;
mod public_api;
mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use array::ArrayService;
pub use central_bank::{
    CentralBankOfCzechRepublic, CentralBankOfRepublicTurkey, EuropeanCentralBank,
    NationalBankOfRomania, RussianCentralBank,
};
pub use commercial::{
    CurrencyDataFeed, CurrencyLayer, Fixer, Forge, OpenExchangeRates, XchangeApi, Xignite,
};
pub use public_api::{Cryptonator, WebserviceX};
pub use traits::{BuildService, ExchangeRateService};
