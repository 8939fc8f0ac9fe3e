use std::fmt;
use std::sync::Arc;

use crate::errors::ServiceError;
use crate::http::HttpClient;
use crate::models::ServiceOptions;
use crate::service::{BuildService, ExchangeRateService};

/// Builds a service from the factory's transport and the caller's options.
pub type ServiceConstructor =
    fn(Arc<dyn HttpClient>, &ServiceOptions) -> Result<Arc<dyn ExchangeRateService>, ServiceError>;

/// Zero-argument callback producing a ready service.
pub type ServiceCallback = Arc<dyn Fn() -> Arc<dyn ExchangeRateService> + Send + Sync>;

/// How the registry produces a service for a name.
#[derive(Clone)]
pub enum ServiceEntry {
    /// Construct a new service, injecting transport and options.
    Constructor(ServiceConstructor),

    /// Return whatever the callback yields; options are not used.
    Callback(ServiceCallback),
}

impl ServiceEntry {
    /// Entry constructing `T` through its [`BuildService`] implementation.
    pub fn of<T: BuildService>() -> Self {
        Self::Constructor(construct::<T>)
    }

    pub fn callback<F>(callback: F) -> Self
    where
        F: Fn() -> Arc<dyn ExchangeRateService> + Send + Sync + 'static,
    {
        Self::Callback(Arc::new(callback))
    }

    pub fn is_callback(&self) -> bool {
        matches!(self, Self::Callback(_))
    }

    /// Produce a service from this entry.
    pub fn instantiate(
        &self,
        client: Arc<dyn HttpClient>,
        options: &ServiceOptions,
    ) -> Result<Arc<dyn ExchangeRateService>, ServiceError> {
        match self {
            Self::Constructor(constructor) => constructor(client, options),
            Self::Callback(callback) => Ok(callback()),
        }
    }
}

fn construct<T: BuildService>(
    client: Arc<dyn HttpClient>,
    options: &ServiceOptions,
) -> Result<Arc<dyn ExchangeRateService>, ServiceError> {
    Ok(Arc::new(T::build(client, options)?))
}

impl fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructor(_) => f.write_str("ServiceEntry::Constructor"),
            Self::Callback(_) => f.write_str("ServiceEntry::Callback"),
        }
    }
}
