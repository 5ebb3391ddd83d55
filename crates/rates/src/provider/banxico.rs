//! Banxico SIE providers.
//!
//! The SIE API nests time series under `bmx.series`; each series carries an
//! `idSerie` and a list of `{ dato, fecha }` points where `dato` is a
//! locale-formatted numeral and `fecha` is `DD/MM/YYYY`.
//!
//! Two variants share one request shape:
//! - [`BanxicoFixProvider`] reads a single series (the official FIX
//!   reference rate).
//! - [`BanxicoMarketProvider`] requests a buy and a sell series together in
//!   one call and matches them by `idSerie`, not payload order.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::envelope::RateSource;
use crate::errors::RateError;
use crate::models::{ProviderResult, QuoteKind, RawQuote};
use crate::normalize::parse_locale_decimal;
use crate::provider::RateProvider;

const PROVIDER_ID: &str = "Banxico";

/// Default base URL for the Banxico SIE API.
pub const DEFAULT_BASE_URL: &str = "https://www.banxico.org.mx/SieAPIRest/service/v1";

/// Official MXN/USD FIX reference rate series.
pub const FIX_SERIES: &str = "SF43718";

/// Interbank wholesale buy series.
pub const BUY_SERIES: &str = "SF60653";

/// Interbank wholesale sell series.
pub const SELL_SERIES: &str = "SF60654";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Response structures for the SIE API
// ============================================================================

#[derive(Debug, Deserialize)]
struct SieResponse {
    bmx: SiePayload,
}

#[derive(Debug, Deserialize)]
struct SiePayload {
    series: Vec<SieSeries>,
}

#[derive(Debug, Deserialize)]
struct SieSeries {
    #[serde(rename = "idSerie")]
    id_serie: String,
    #[serde(default)]
    datos: Vec<SieDataPoint>,
}

#[derive(Debug, Deserialize)]
struct SieDataPoint {
    dato: String,
    fecha: String,
}

impl SieResponse {
    /// First data point of the series with the given id.
    fn first_point(&self, series_id: &str) -> Option<&SieDataPoint> {
        self.bmx
            .series
            .iter()
            .find(|s| s.id_serie == series_id)
            .and_then(|s| s.datos.first())
    }
}

fn new_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// One SIE call for the given comma-joined series ids.
async fn fetch_series(
    client: &Client,
    base_url: &str,
    token: &str,
    series_ids: &str,
) -> Result<SieResponse, RateError> {
    let url = format!("{}/series/{}/datos/oportuno", base_url, series_ids);
    let response = client
        .get(&url)
        .header("Bmx-Token", token)
        .send()
        .await
        .map_err(|e| RateError::transport(PROVIDER_ID, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RateError::upstream(PROVIDER_ID, status));
    }

    response
        .json()
        .await
        .map_err(|e| RateError::parse(PROVIDER_ID, format!("malformed series payload: {}", e)))
}

/// Extract a quote of the given kind from one series, or name what's missing.
fn quote_from_series(
    response: &SieResponse,
    series_id: &str,
    kind: QuoteKind,
    label: &str,
) -> Result<RawQuote, RateError> {
    let point = response
        .first_point(series_id)
        .ok_or_else(|| RateError::parse(PROVIDER_ID, format!("missing {} series", label)))?;
    let value = parse_locale_decimal(&point.dato).ok_or_else(|| {
        RateError::parse(
            PROVIDER_ID,
            format!("invalid {} value {:?}", label, point.dato),
        )
    })?;
    Ok(RawQuote::dated(value, point.fecha.clone(), kind))
}

/// Banxico single-series provider for the official FIX reference rate.
pub struct BanxicoFixProvider {
    client: Client,
    base_url: String,
    token: String,
    series_id: String,
}

impl BanxicoFixProvider {
    /// Create a provider for the production FIX series.
    pub fn new(token: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), token, FIX_SERIES.to_string())
    }

    /// Create a provider against a specific base URL and series id.
    pub fn with_base_url(base_url: String, token: String, series_id: String) -> Self {
        Self {
            client: new_client(),
            base_url,
            token,
            series_id,
        }
    }
}

#[async_trait]
impl RateProvider for BanxicoFixProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn source(&self) -> RateSource {
        RateSource::Fix
    }

    async fn fetch_rate(&self) -> Result<ProviderResult, RateError> {
        let response =
            fetch_series(&self.client, &self.base_url, &self.token, &self.series_id).await?;
        let quote = quote_from_series(
            &response,
            &self.series_id,
            QuoteKind::FixReference,
            "reference",
        )?;

        debug!(
            "Banxico: fetched FIX rate {} dated {:?}",
            quote.value, quote.raw_date
        );

        Ok(ProviderResult {
            provider: PROVIDER_ID,
            quotes: vec![quote],
        })
    }
}

/// Banxico dual-series provider for wholesale buy/sell quotes.
pub struct BanxicoMarketProvider {
    client: Client,
    base_url: String,
    token: String,
    buy_series: String,
    sell_series: String,
}

impl BanxicoMarketProvider {
    /// Create a provider for the production interbank series pair.
    pub fn new(token: String) -> Self {
        Self::with_base_url(
            DEFAULT_BASE_URL.to_string(),
            token,
            BUY_SERIES.to_string(),
            SELL_SERIES.to_string(),
        )
    }

    /// Create a provider against a specific base URL and series ids.
    pub fn with_base_url(
        base_url: String,
        token: String,
        buy_series: String,
        sell_series: String,
    ) -> Self {
        Self {
            client: new_client(),
            base_url,
            token,
            buy_series,
            sell_series,
        }
    }
}

#[async_trait]
impl RateProvider for BanxicoMarketProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn source(&self) -> RateSource {
        RateSource::MidMarket
    }

    async fn fetch_rate(&self) -> Result<ProviderResult, RateError> {
        // Both series in one request; both must resolve or the call fails
        let ids = format!("{},{}", self.buy_series, self.sell_series);
        let response = fetch_series(&self.client, &self.base_url, &self.token, &ids).await?;
        let buy = quote_from_series(&response, &self.buy_series, QuoteKind::Buy, "buy")?;
        let sell = quote_from_series(&response, &self.sell_series, QuoteKind::Sell, "sell")?;

        debug!(
            "Banxico: fetched buy {} / sell {} quotes",
            buy.value, sell.value
        );

        Ok(ProviderResult {
            provider: PROVIDER_ID,
            quotes: vec![buy, sell],
        })
    }
}
