//! Name to constructor lookup for exchange rate services.
//!
//! The registry is an ordinary value: build one, register what you need and
//! hand it to a `ServiceFactory`. Registering a name that already exists
//! replaces the previous entry, which is how built-ins are overridden and
//! how historical aliases are added.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};

use super::entry::{ServiceConstructor, ServiceEntry};
use crate::constants::*;
use crate::errors::ServiceError;
use crate::service::{
    ArrayService, BuildService, CentralBankOfCzechRepublic, CentralBankOfRepublicTurkey,
    Cryptonator, CurrencyDataFeed, CurrencyLayer, EuropeanCentralBank, ExchangeRateService,
    Fixer, Forge, NationalBankOfRomania, OpenExchangeRates, RussianCentralBank, WebserviceX,
    XchangeApi, Xignite,
};

/// Registry of service entries keyed by name.
pub struct ServiceRegistry {
    entries: Mutex<BTreeMap<String, ServiceEntry>>,
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ServiceRegistry {
    /// Create a registry with no entries.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Create a registry seeded with every built-in service.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register::<CentralBankOfCzechRepublic>(SERVICE_CENTRAL_BANK_OF_CZECH_REPUBLIC);
        registry.register::<CentralBankOfRepublicTurkey>(SERVICE_CENTRAL_BANK_OF_REPUBLIC_TURKEY);
        registry.register::<CurrencyDataFeed>(SERVICE_CURRENCY_DATA_FEED);
        registry.register::<CurrencyLayer>(SERVICE_CURRENCY_LAYER);
        registry.register::<EuropeanCentralBank>(SERVICE_EUROPEAN_CENTRAL_BANK);
        registry.register::<Fixer>(SERVICE_FIXER);
        registry.register::<Forge>(SERVICE_FORGE);
        registry.register::<NationalBankOfRomania>(SERVICE_NATIONAL_BANK_OF_ROMANIA);
        registry.register::<OpenExchangeRates>(SERVICE_OPEN_EXCHANGE_RATES);
        registry.register::<ArrayService>(SERVICE_ARRAY);
        registry.register::<WebserviceX>(SERVICE_WEBSERVICEX);
        registry.register::<Xignite>(SERVICE_XIGNITE);
        registry.register::<RussianCentralBank>(SERVICE_RUSSIAN_CENTRAL_BANK);
        registry.register::<Cryptonator>(SERVICE_CRYPTONATOR);
        registry.register::<XchangeApi>(SERVICE_XCHANGEAPI);
        registry
    }

    /// Convenience for sharing the registry with one or more factories.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Lock the entries mutex, recovering from poison if necessary.
    ///
    /// Entries are replaced whole, so a panic while holding the lock cannot
    /// leave a half-written entry behind.
    fn lock_entries(&self) -> MutexGuard<'_, BTreeMap<String, ServiceEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Service registry mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Register `T` under `name`, replacing any existing entry.
    pub fn register<T: BuildService>(&self, name: &str) {
        self.register_entry(name, ServiceEntry::of::<T>());
    }

    /// Register a raw constructor under `name`.
    pub fn register_constructor(&self, name: &str, constructor: ServiceConstructor) {
        self.register_entry(name, ServiceEntry::Constructor(constructor));
    }

    /// Register a zero-argument callback under `name`.
    ///
    /// `ServiceFactory::create` returns exactly what the callback produces
    /// and ignores the options passed to it.
    pub fn register_callback<F>(&self, name: &str, callback: F)
    where
        F: Fn() -> Arc<dyn ExchangeRateService> + Send + Sync + 'static,
    {
        self.register_entry(name, ServiceEntry::callback(callback));
    }

    /// Insert or replace the entry for `name`.
    pub fn register_entry(&self, name: &str, entry: ServiceEntry) {
        let mut entries = self.lock_entries();
        match entries.insert(name.to_string(), entry) {
            Some(_) => warn!("Replaced existing service entry '{}'", name),
            None => debug!("Registered service '{}'", name),
        }
    }

    /// Look up the entry for `name`.
    pub fn resolve(&self, name: &str) -> Result<ServiceEntry, ServiceError> {
        let entries = self.lock_entries();
        entries
            .get(name)
            .cloned()
            .ok_or_else(|| ServiceError::UnknownService {
                name: name.to_string(),
                available: entries.keys().cloned().collect(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock_entries().contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.lock_entries().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }
}
