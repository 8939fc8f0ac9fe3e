//! Swap Rates Crate
//!
//! This crate maps service names such as `"fixer"` or
//! `"european_central_bank"` to exchange rate service clients, configured
//! with per-service options (API keys, tokens, seed data).
//!
//! # Overview
//!
//! - [`ServiceRegistry`]: name → constructor table, seeded with the built-in
//!   services and open to custom registrations and overrides
//! - [`ServiceFactory`]: resolves a name through the registry and builds the
//!   service, injecting the HTTP transport and the caller's options
//! - [`HttpClient`]: the transport capability services send requests through
//!
//! # Example
//!
//! ```no_run
//! use swap_rates::{ExchangeRateService, ServiceFactory, ServiceOptions};
//!
//! let factory = ServiceFactory::discover()?;
//! let fixer = factory.create("fixer", &ServiceOptions::new().with("access_key", "secret"))?;
//! assert_eq!(fixer.name(), "fixer");
//! # Ok::<(), swap_rates::errors::ServiceError>(())
//! ```
//!
//! # Core Types
//!
//! - [`ExchangeRateService`] - A client for one rate data source
//! - [`BuildService`] - Constructor contract for services registered by type
//! - [`ServiceOptions`] - Options handed to a service at construction
//! - [`ExchangeRateQuery`] / [`ExchangeRate`] - Rate requests and results

pub mod constants;
pub mod errors;
pub mod factory;
pub mod http;
pub mod models;
pub mod registry;
pub mod service;

pub use errors::ServiceError;
pub use factory::ServiceFactory;

pub use models::{CurrencyPair, ExchangeRate, ExchangeRateQuery, ServiceOptions, ServiceSpec};

pub use http::{
    ClientDiscovery, HttpClient, HttpClientConfig, HttpRequest, HttpResponse, ReqwestClient,
};

pub use registry::{ServiceCallback, ServiceConstructor, ServiceEntry, ServiceRegistry};

pub use service::{
    ArrayService, BuildService, CentralBankOfCzechRepublic, CentralBankOfRepublicTurkey,
    Cryptonator, CurrencyDataFeed, CurrencyLayer, EuropeanCentralBank, ExchangeRateService, Fixer,
    Forge, NationalBankOfRomania, OpenExchangeRates, RussianCentralBank, WebserviceX, XchangeApi,
    Xignite,
};
