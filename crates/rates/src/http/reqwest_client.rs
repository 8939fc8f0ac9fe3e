//! Production transport built on `reqwest`.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::{HttpClient, HttpClientConfig, HttpRequest, HttpResponse, BACKEND_REQWEST};
use crate::errors::ServiceError;

/// HTTP transport backed by a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Build a client from configuration.
    ///
    /// Returns `InvalidClient` when the proxy URL or user agent is rejected.
    pub fn from_config(config: &HttpClientConfig) -> Result<Self, ServiceError> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent());

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str()).map_err(|e| {
                ServiceError::InvalidClient(format!("invalid proxy '{}': {}", proxy, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ServiceError::InvalidClient(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    fn name(&self) -> &str {
        BACKEND_REQWEST
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ServiceError> {
        debug!("GET {}", request.url);

        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let client = ReqwestClient::from_config(&HttpClientConfig::default()).unwrap();
        assert_eq!(client.name(), "reqwest");
    }

    #[tokio::test]
    async fn test_wraps_prebuilt_client() {
        let client = ReqwestClient::with_client(Client::new());
        assert_eq!(client.name(), "reqwest");

        let transport: std::sync::Arc<dyn HttpClient> = std::sync::Arc::new(client);
        assert_eq!(transport.name(), BACKEND_REQWEST);
    }

    #[test]
    fn test_invalid_proxy_is_invalid_client() {
        let config = HttpClientConfig {
            proxy: Some("http://[::1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ReqwestClient::from_config(&config),
            Err(ServiceError::InvalidClient(_))
        ));
    }

    #[test]
    fn test_invalid_user_agent_is_invalid_client() {
        let config = HttpClientConfig {
            user_agent: Some("bad\nagent".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ReqwestClient::from_config(&config),
            Err(ServiceError::InvalidClient(_))
        ));
    }
}
