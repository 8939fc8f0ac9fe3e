//! HTTP transport abstractions.
//!
//! Services never talk to the network directly. They describe requests as
//! [`HttpRequest`] values and hand them to an [`HttpClient`] injected by the
//! factory. This module contains:
//! - The `HttpClient` capability trait and the request/response types
//! - `HttpClientConfig`, the configuration for building a transport
//! - `ReqwestClient`, the production transport
//! - `ClientDiscovery`, which finds a transport when none is supplied

mod config;
mod discovery;
mod reqwest_client;

pub use config::{HttpClientConfig, BACKEND_AUTO, BACKEND_REQWEST};
pub use discovery::{ClientDiscovery, DiscoveryCandidate, DiscoveryProbe};
pub use reqwest_client::ReqwestClient;

use async_trait::async_trait;

use crate::errors::ServiceError;

/// An outgoing GET request built by a service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response as seen by services: status code and body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP client capability every transport must provide.
///
/// Implement this trait to plug a custom transport (a mock, a caching
/// client, another HTTP stack) into the factory.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Short identifier used in logs and transport errors.
    fn name(&self) -> &str;

    /// Send a request and return the response, whatever its status.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ServiceError>;
}
