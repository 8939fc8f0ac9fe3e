//! Shared test doubles for service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::ServiceError;
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::models::ExchangeRateQuery;

/// Transport that records every request and answers with a fixed status.
pub struct RecordingClient {
    name: &'static str,
    status: u16,
    requests: Mutex<Vec<HttpRequest>>,
}

impl Default for RecordingClient {
    fn default() -> Self {
        Self::with_status(200)
    }
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            ..Self::new()
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            name: "recording",
            status,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn shared() -> Arc<dyn HttpClient> {
        Arc::new(Self::new())
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    fn name(&self) -> &str {
        self.name
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ServiceError> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse::new(self.status, "{}"))
    }
}

pub fn latest(pair: &str) -> ExchangeRateQuery {
    ExchangeRateQuery::latest(pair.parse().unwrap())
}

pub fn historical(pair: &str, year: i32, month: u32, day: u32) -> ExchangeRateQuery {
    ExchangeRateQuery::historical(
        pair.parse().unwrap(),
        NaiveDate::from_ymd_opt(year, month, day).unwrap(),
    )
}
