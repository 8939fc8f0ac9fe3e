//! Central bank services.
//!
//! Central banks publish reference rates for their own currency free of
//! charge, so none of these services take options. Each one only prices
//! pairs that involve the bank's home currency on the expected side.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};

use crate::constants::*;
use crate::errors::ServiceError;
use crate::http::{HttpClient, HttpRequest};
use crate::models::{ExchangeRateQuery, ServiceOptions};
use crate::service::{BuildService, ExchangeRateService};

const ECB_DAILY_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";
const ECB_HISTORICAL_90D_URL: &str =
    "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-hist-90d.xml";
const ECB_HISTORICAL_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-hist.xml";

/// Age limit of the ECB's short history file.
const ECB_SHORT_HISTORY_DAYS: i64 = 90;

const CNB_URL: &str = "https://www.cnb.cz/en/financial_markets/foreign_exchange_market/exchange_rate_fixing/daily.txt";
const CBRT_BASE_URL: &str = "https://www.tcmb.gov.tr/kurlar";
const NBR_URL: &str = "https://www.bnr.ro/nbrfxrates.xml";
const CBR_URL: &str = "https://www.cbr.ru/scripts/XML_daily.asp";

/// European Central Bank reference rates. Base currency is always EUR.
pub struct EuropeanCentralBank {
    client: Arc<dyn HttpClient>,
}

impl EuropeanCentralBank {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    fn historical_url(date: NaiveDate) -> &'static str {
        let cutoff = Utc::now().date_naive() - Duration::days(ECB_SHORT_HISTORY_DAYS);
        if date >= cutoff {
            ECB_HISTORICAL_90D_URL
        } else {
            ECB_HISTORICAL_URL
        }
    }
}

impl BuildService for EuropeanCentralBank {
    fn build(client: Arc<dyn HttpClient>, _options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self::new(client))
    }
}

impl ExchangeRateService for EuropeanCentralBank {
    fn name(&self) -> &'static str {
        SERVICE_EUROPEAN_CENTRAL_BANK
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        query.pair.base() == "EUR"
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        let url = match query.date {
            Some(date) => Self::historical_url(date),
            None => ECB_DAILY_URL,
        };
        Ok(HttpRequest::get(url))
    }
}

/// Czech National Bank daily fixing. Quote currency is always CZK.
pub struct CentralBankOfCzechRepublic {
    client: Arc<dyn HttpClient>,
}

impl CentralBankOfCzechRepublic {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }
}

impl BuildService for CentralBankOfCzechRepublic {
    fn build(client: Arc<dyn HttpClient>, _options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self::new(client))
    }
}

impl ExchangeRateService for CentralBankOfCzechRepublic {
    fn name(&self) -> &'static str {
        SERVICE_CENTRAL_BANK_OF_CZECH_REPUBLIC
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        query.pair.quote() == "CZK"
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        let url = match query.date {
            Some(date) => format!("{}?date={}", CNB_URL, date.format("%d.%m.%Y")),
            None => CNB_URL.to_string(),
        };
        Ok(HttpRequest::get(url))
    }
}

/// Central Bank of the Republic of Turkey. Quote currency is always TRY.
pub struct CentralBankOfRepublicTurkey {
    client: Arc<dyn HttpClient>,
}

impl CentralBankOfRepublicTurkey {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }
}

impl BuildService for CentralBankOfRepublicTurkey {
    fn build(client: Arc<dyn HttpClient>, _options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self::new(client))
    }
}

impl ExchangeRateService for CentralBankOfRepublicTurkey {
    fn name(&self) -> &'static str {
        SERVICE_CENTRAL_BANK_OF_REPUBLIC_TURKEY
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        query.pair.quote() == "TRY"
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        // Archive files are grouped by month: /kurlar/YYYYMM/DDMMYYYY.xml
        let url = match query.date {
            Some(date) => format!(
                "{}/{}/{}.xml",
                CBRT_BASE_URL,
                date.format("%Y%m"),
                date.format("%d%m%Y")
            ),
            None => format!("{}/today.xml", CBRT_BASE_URL),
        };
        Ok(HttpRequest::get(url))
    }
}

/// National Bank of Romania. Quote currency is always RON, latest rates only.
pub struct NationalBankOfRomania {
    client: Arc<dyn HttpClient>,
}

impl NationalBankOfRomania {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }
}

impl BuildService for NationalBankOfRomania {
    fn build(client: Arc<dyn HttpClient>, _options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self::new(client))
    }
}

impl ExchangeRateService for NationalBankOfRomania {
    fn name(&self) -> &'static str {
        SERVICE_NATIONAL_BANK_OF_ROMANIA
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        !query.is_historical() && query.pair.quote() == "RON"
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, _query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        Ok(HttpRequest::get(NBR_URL))
    }
}

/// Central Bank of the Russian Federation. Quote currency is always RUB.
pub struct RussianCentralBank {
    client: Arc<dyn HttpClient>,
}

impl RussianCentralBank {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }
}

impl BuildService for RussianCentralBank {
    fn build(client: Arc<dyn HttpClient>, _options: &ServiceOptions) -> Result<Self, ServiceError> {
        Ok(Self::new(client))
    }
}

impl ExchangeRateService for RussianCentralBank {
    fn name(&self) -> &'static str {
        SERVICE_RUSSIAN_CENTRAL_BANK
    }

    fn supports_query(&self, query: &ExchangeRateQuery) -> bool {
        query.pair.quote() == "RUB"
    }

    fn http_client(&self) -> Option<&Arc<dyn HttpClient>> {
        Some(&self.client)
    }

    fn request(&self, query: &ExchangeRateQuery) -> Result<HttpRequest, ServiceError> {
        let url = match query.date {
            Some(date) => format!("{}?date_req={}", CBR_URL, date.format("%d/%m/%Y")),
            None => CBR_URL.to_string(),
        };
        Ok(HttpRequest::get(url))
    }
}
