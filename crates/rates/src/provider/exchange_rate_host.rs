//! ExchangeRate.host provider for public mid-market rates.
//!
//! Note: this provider quotes with base MXN, so `rates.USD` is the USD value
//! of one peso (the inverse direction of the aggregator variants). The
//! literal direction is preserved as-is.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::envelope::RateSource;
use crate::errors::RateError;
use crate::models::{ProviderResult, QuoteKind, RawQuote};
use crate::provider::RateProvider;

const PROVIDER_ID: &str = "ExchangeRate.host";

/// Default base URL for the ExchangeRate.host API.
pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate.host";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Latest-rates response from ExchangeRate.host.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    rates: HashMap<String, Decimal>,
}

/// ExchangeRate.host mid-market provider.
pub struct ExchangeRateHostProvider {
    client: Client,
    base_url: String,
}

impl ExchangeRateHostProvider {
    /// Create a provider against the production API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a provider against a specific base URL.
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, base_url }
    }
}

impl Default for ExchangeRateHostProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProvider for ExchangeRateHostProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn source(&self) -> RateSource {
        RateSource::MidMarket
    }

    async fn fetch_rate(&self) -> Result<ProviderResult, RateError> {
        let url = format!("{}/latest?base=MXN&symbols=USD", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::transport(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::upstream(PROVIDER_ID, status));
        }

        let latest: LatestResponse = response
            .json()
            .await
            .map_err(|e| RateError::parse(PROVIDER_ID, format!("malformed rates object: {}", e)))?;

        let rate = latest
            .rates
            .get("USD")
            .copied()
            .ok_or_else(|| RateError::parse(PROVIDER_ID, "missing USD rate entry"))?;
        if rate <= Decimal::ZERO {
            return Err(RateError::parse(PROVIDER_ID, "non-positive rate value"));
        }

        debug!("ExchangeRate.host: fetched mid-market rate {}", rate);

        Ok(ProviderResult {
            provider: PROVIDER_ID,
            quotes: vec![RawQuote::new(rate, QuoteKind::MidMarket)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_fetch_rate_reads_usd_entry() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/latest?base=MXN&symbols=USD")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"base": "MXN", "rates": {"USD": 0.0542}}"#)
            .create_async()
            .await;

        let provider = ExchangeRateHostProvider::with_base_url(server.url());
        let result = provider.fetch_rate().await.unwrap();
        assert_eq!(result.provider, "ExchangeRate.host");
        assert_eq!(result.quotes[0].value, dec!(0.0542));
    }

    #[tokio::test]
    async fn test_missing_usd_entry_is_parse_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/latest?base=MXN&symbols=USD")
            .with_status(200)
            .with_body(r#"{"base": "MXN", "rates": {"EUR": 0.051}}"#)
            .create_async()
            .await;

        let provider = ExchangeRateHostProvider::with_base_url(server.url());
        let err = provider.fetch_rate().await.unwrap_err();
        assert!(matches!(err, RateError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_zero_rate_is_parse_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/latest?base=MXN&symbols=USD")
            .with_status(200)
            .with_body(r#"{"rates": {"USD": 0}}"#)
            .create_async()
            .await;

        let provider = ExchangeRateHostProvider::with_base_url(server.url());
        let err = provider.fetch_rate().await.unwrap_err();
        assert!(matches!(err, RateError::Parse { .. }));
    }
}
