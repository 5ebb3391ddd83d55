//! Wise rate providers.
//!
//! Two variants share the provider id:
//! - [`WiseProvider`] reads the mid-market rate from the Wise rates API
//!   (JSON array, first element's `rate` field).
//! - [`WiseConverterProvider`] scrapes the public currency-converter page,
//!   extracting the rate from the literal `1 MXN = <number> USD` text.

use async_trait::async_trait;
use log::debug;
use regex::Regex;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use crate::envelope::RateSource;
use crate::errors::RateError;
use crate::models::{ProviderResult, QuoteKind, RawQuote};
use crate::normalize::parse_locale_decimal;
use crate::provider::RateProvider;

const PROVIDER_ID: &str = "Wise";

/// Default base URL for the Wise rates API.
pub const DEFAULT_BASE_URL: &str = "https://api.transferwise.com";

/// Default URL of the public MXN→USD converter page.
pub const DEFAULT_CONVERTER_URL: &str =
    "https://wise.com/us/currency-converter/mxn-to-usd-rate";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One element of the Wise rates response array.
#[derive(Debug, Deserialize)]
struct WiseRate {
    rate: Decimal,
}

/// Wise rates API provider (JSON variant).
pub struct WiseProvider {
    client: Client,
    base_url: String,
    api_token: String,
}

impl WiseProvider {
    /// Create a provider against the production API with the given token.
    pub fn new(api_token: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_token)
    }

    /// Create a provider against a specific base URL.
    pub fn with_base_url(base_url: String, api_token: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url,
            api_token,
        }
    }
}

#[async_trait]
impl RateProvider for WiseProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn source(&self) -> RateSource {
        RateSource::MidMarket
    }

    async fn fetch_rate(&self) -> Result<ProviderResult, RateError> {
        let url = format!("{}/v1/rates?source=MXN&target=USD", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| RateError::transport(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::upstream(PROVIDER_ID, status));
        }

        let rates: Vec<WiseRate> = response
            .json()
            .await
            .map_err(|e| RateError::parse(PROVIDER_ID, format!("malformed rates array: {}", e)))?;

        // Wise returns an array of rates, pick the first one
        let rate = rates
            .first()
            .map(|r| r.rate)
            .ok_or_else(|| RateError::parse(PROVIDER_ID, "missing rate field"))?;
        if rate <= Decimal::ZERO {
            return Err(RateError::parse(PROVIDER_ID, "non-positive rate value"));
        }

        debug!("Wise: fetched mid-market rate {}", rate);

        Ok(ProviderResult {
            provider: PROVIDER_ID,
            quotes: vec![RawQuote::new(rate, QuoteKind::MidMarket)],
        })
    }
}

/// Wise converter-page provider (HTML scrape variant).
pub struct WiseConverterProvider {
    client: Client,
    page_url: String,
    pattern: Regex,
}

impl WiseConverterProvider {
    /// Create a provider scraping the production converter page.
    pub fn new() -> Self {
        Self::with_page_url(DEFAULT_CONVERTER_URL.to_string())
    }

    /// Create a provider scraping a specific page URL.
    pub fn with_page_url(page_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        // Matches the literal converter text, e.g. "1 MXN = 0.0588 USD"
        let pattern = Regex::new(r"1\s+MXN\s*=\s*([0-9][0-9.,]*)\s+USD")
            .expect("converter pattern is valid");
        Self {
            client,
            page_url,
            pattern,
        }
    }

    /// Extract the rate from the converter page markup.
    fn extract_rate(&self, markup: &str) -> Option<Decimal> {
        let captures = self.pattern.captures(markup)?;
        parse_locale_decimal(captures.get(1)?.as_str())
    }
}

impl Default for WiseConverterProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProvider for WiseConverterProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn source(&self) -> RateSource {
        RateSource::MidMarket
    }

    async fn fetch_rate(&self) -> Result<ProviderResult, RateError> {
        let response = self
            .client
            .get(&self.page_url)
            .send()
            .await
            .map_err(|e| RateError::transport(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::upstream(PROVIDER_ID, status));
        }

        let markup = response
            .text()
            .await
            .map_err(|e| RateError::parse(PROVIDER_ID, format!("unreadable page body: {}", e)))?;

        // Absence of a match is a parse failure, not an exception-level fault
        let rate = self
            .extract_rate(&markup)
            .ok_or_else(|| RateError::parse(PROVIDER_ID, "rate pattern not found in page"))?;

        debug!("Wise: scraped converter rate {}", rate);

        Ok(ProviderResult {
            provider: PROVIDER_ID,
            quotes: vec![RawQuote::new(rate, QuoteKind::MidMarket)],
        })
    }
}
