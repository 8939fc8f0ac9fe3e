//! Discovery of an HTTP transport when the caller does not supply one.
//!
//! Discovery walks an ordered list of candidates and keeps the first one
//! that yields a client. The default list only knows about reqwest; callers
//! can prepend their own candidates or start from an empty list.
//!
//! A probe answers `Ok(None)` when its transport is not available in this
//! environment and `Err` when it is available but the configuration cannot
//! be applied to it. Errors stop discovery.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use super::{HttpClient, HttpClientConfig, ReqwestClient, BACKEND_REQWEST};
use crate::errors::ServiceError;

/// Probe that tries to build a transport from configuration.
pub type DiscoveryProbe =
    fn(&HttpClientConfig) -> Result<Option<Arc<dyn HttpClient>>, ServiceError>;

/// A named discovery probe.
#[derive(Clone, Copy)]
pub struct DiscoveryCandidate {
    pub name: &'static str,
    pub probe: DiscoveryProbe,
}

impl fmt::Debug for DiscoveryCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryCandidate")
            .field("name", &self.name)
            .finish()
    }
}

fn probe_reqwest(config: &HttpClientConfig) -> Result<Option<Arc<dyn HttpClient>>, ServiceError> {
    let client = ReqwestClient::from_config(config)?;
    Ok(Some(Arc::new(client)))
}

/// Ordered list of transport candidates.
#[derive(Clone, Debug)]
pub struct ClientDiscovery {
    candidates: Vec<DiscoveryCandidate>,
}

impl Default for ClientDiscovery {
    fn default() -> Self {
        Self {
            candidates: vec![DiscoveryCandidate {
                name: BACKEND_REQWEST,
                probe: probe_reqwest,
            }],
        }
    }
}

impl ClientDiscovery {
    /// Discovery with no candidates; always fails with `NoClientFound`.
    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Add a candidate ahead of the existing ones.
    pub fn prepend(mut self, name: &'static str, probe: DiscoveryProbe) -> Self {
        self.candidates.insert(0, DiscoveryCandidate { name, probe });
        self
    }

    /// Add a candidate after the existing ones.
    pub fn append(mut self, name: &'static str, probe: DiscoveryProbe) -> Self {
        self.candidates.push(DiscoveryCandidate { name, probe });
        self
    }

    pub fn candidates(&self) -> &[DiscoveryCandidate] {
        &self.candidates
    }

    /// Find the first candidate that produces a client.
    ///
    /// A candidate that rejects the configuration fails discovery with its
    /// own error instead of falling through to `NoClientFound`.
    pub fn discover(&self, config: &HttpClientConfig) -> Result<Arc<dyn HttpClient>, ServiceError> {
        for candidate in &self.candidates {
            match (candidate.probe)(config) {
                Ok(Some(client)) => {
                    debug!("Discovered HTTP client '{}'", candidate.name);
                    return Ok(client);
                }
                Ok(None) => debug!("HTTP client candidate '{}' not available", candidate.name),
                Err(e) => {
                    warn!(
                        "HTTP client candidate '{}' rejected the configuration: {}",
                        candidate.name, e
                    );
                    return Err(e);
                }
            }
        }

        warn!(
            "No HTTP client found among {} candidates",
            self.candidates.len()
        );
        Err(ServiceError::NoClientFound)
    }

    /// Build the client for a named backend, if one of the candidates has that name.
    pub fn by_name(
        &self,
        name: &str,
        config: &HttpClientConfig,
    ) -> Option<Result<Arc<dyn HttpClient>, ServiceError>> {
        let candidate = self
            .candidates
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))?;

        Some((candidate.probe)(config).and_then(|client| {
            client.ok_or_else(|| {
                ServiceError::InvalidClient(format!(
                    "HTTP client '{}' is not available",
                    candidate.name
                ))
            })
        }))
    }
}
