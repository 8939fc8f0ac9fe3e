//! Service factory - turns service names into ready-to-use services.
//!
//! # Architecture
//!
//! ```text
//! caller ──▶ ServiceFactory::create(name, options)
//!                   │
//!                   ▼
//!          ServiceRegistry::resolve(name)
//!                   │
//!        ┌──────────┴───────────┐
//!        ▼                      ▼
//!   Constructor             Callback
//!   (transport + options)   (no arguments)
//!        │                      │
//!        └──────────┬───────────┘
//!                   ▼
//!      Arc<dyn ExchangeRateService>
//! ```

use std::sync::Arc;

use log::{debug, info, warn};

use crate::errors::ServiceError;
use crate::http::{ClientDiscovery, HttpClient, HttpClientConfig};
use crate::models::{ServiceOptions, ServiceSpec};
use crate::registry::{ServiceEntry, ServiceRegistry};
use crate::service::ExchangeRateService;

/// Creates exchange rate services by name.
///
/// The factory owns the HTTP transport handed to every service it builds
/// and shares a [`ServiceRegistry`] with whoever else holds it.
pub struct ServiceFactory {
    client: Arc<dyn HttpClient>,
    registry: Arc<ServiceRegistry>,
}

impl ServiceFactory {
    /// Create a factory around an explicit transport and the built-in registry.
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_registry(client, Arc::new(ServiceRegistry::with_builtins()))
    }

    /// Create a factory around an explicit transport and a shared registry.
    pub fn with_registry(client: Arc<dyn HttpClient>, registry: Arc<ServiceRegistry>) -> Self {
        info!("Service factory using HTTP client '{}'", client.name());
        Self { client, registry }
    }

    /// Create a factory with a discovered transport and the built-in registry.
    ///
    /// Fails with `NoClientFound` if no transport is available.
    pub fn discover() -> Result<Self, ServiceError> {
        Self::discover_with(
            &ClientDiscovery::default(),
            &HttpClientConfig::default(),
            Arc::new(ServiceRegistry::with_builtins()),
        )
    }

    /// Create a factory with a transport found by `discovery`.
    pub fn discover_with(
        discovery: &ClientDiscovery,
        config: &HttpClientConfig,
        registry: Arc<ServiceRegistry>,
    ) -> Result<Self, ServiceError> {
        let client = discovery.discover(config)?;
        Ok(Self::with_registry(client, registry))
    }

    /// Create a factory whose transport is described by configuration.
    ///
    /// An `"auto"` backend runs discovery; any other backend must name a
    /// known transport, otherwise `InvalidClient` is returned. Settings the
    /// chosen transport rejects are `InvalidClient` in both cases.
    pub fn from_config(config: &HttpClientConfig) -> Result<Self, ServiceError> {
        let client = client_from_config(&ClientDiscovery::default(), config)?;
        Ok(Self::new(client))
    }

    /// Build the service registered under `name`.
    ///
    /// Constructor entries receive this factory's transport and `options`;
    /// the options are not validated here, any error comes from the service
    /// itself. Callback entries ignore `options` and their result is
    /// returned as-is.
    pub fn create(
        &self,
        name: &str,
        options: &ServiceOptions,
    ) -> Result<Arc<dyn ExchangeRateService>, ServiceError> {
        let entry = self.registry.resolve(name)?;

        if let ServiceEntry::Callback(_) = entry {
            if !options.is_empty() {
                debug!(
                    "Service '{}' is registered as a callback, ignoring {} options",
                    name,
                    options.len()
                );
            }
        }

        let service = entry.instantiate(self.client.clone(), options)?;
        debug!("Created service '{}' ({})", name, service.name());
        Ok(service)
    }

    /// Build a service from a configuration entry.
    pub fn create_from_spec(
        &self,
        spec: &ServiceSpec,
    ) -> Result<Arc<dyn ExchangeRateService>, ServiceError> {
        self.create(&spec.service, &spec.options)
    }

    /// Build every configured service in order, stopping at the first error.
    pub fn create_all(
        &self,
        specs: &[ServiceSpec],
    ) -> Result<Vec<Arc<dyn ExchangeRateService>>, ServiceError> {
        specs.iter().map(|spec| self.create_from_spec(spec)).collect()
    }

    /// Replace the transport used by services created from now on.
    pub fn set_http_client(&mut self, client: Arc<dyn HttpClient>) {
        info!(
            "Service factory switching HTTP client '{}' -> '{}'",
            self.client.name(),
            client.name()
        );
        self.client = client;
    }

    /// Replace the transport with one built from configuration.
    ///
    /// On error the current transport is kept.
    pub fn configure_http_client(&mut self, config: &HttpClientConfig) -> Result<(), ServiceError> {
        let client = client_from_config(&ClientDiscovery::default(), config)?;
        self.set_http_client(client);
        Ok(())
    }

    pub fn http_client(&self) -> &Arc<dyn HttpClient> {
        &self.client
    }

    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }
}

fn client_from_config(
    discovery: &ClientDiscovery,
    config: &HttpClientConfig,
) -> Result<Arc<dyn HttpClient>, ServiceError> {
    if config.is_auto() {
        return discovery.discover(config);
    }

    match discovery.by_name(&config.backend, config) {
        Some(result) => result,
        None => {
            warn!("Unknown HTTP client backend '{}'", config.backend);
            Err(ServiceError::InvalidClient(format!(
                "unknown HTTP client backend '{}', expected one of {:?}",
                config.backend,
                discovery
                    .candidates()
                    .iter()
                    .map(|c| c.name)
                    .collect::<Vec<_>>()
            )))
        }
    }
}
