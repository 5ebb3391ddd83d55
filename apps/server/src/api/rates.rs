use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use cambio_rates::{clamp_fee, fetch_and_assemble, DerivationMode, RateEnvelope};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(serde::Deserialize)]
struct FeeQuery {
    fee: Option<String>,
}

/// Wise rates API, mid-market, forwarded unchanged.
async fn wise_rate(State(state): State<Arc<AppState>>) -> ApiResult<Json<RateEnvelope>> {
    let envelope = fetch_and_assemble(&state.wise, DerivationMode::Passthrough).await?;
    Ok(Json(envelope))
}

/// Wise converter page scrape, mid-market, forwarded unchanged.
async fn wise_converter_rate(State(state): State<Arc<AppState>>) -> ApiResult<Json<RateEnvelope>> {
    let envelope = fetch_and_assemble(&state.wise_converter, DerivationMode::Passthrough).await?;
    Ok(Json(envelope))
}

/// ExchangeRate.host public mid-market rate, forwarded unchanged.
async fn exchange_rate_host_rate(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RateEnvelope>> {
    let envelope =
        fetch_and_assemble(&state.exchange_rate_host, DerivationMode::Passthrough).await?;
    Ok(Json(envelope))
}

/// Banxico FIX reference rate, adjusted by the optional `fee` query value.
/// Invalid or out-of-range fees are ignored rather than rejected.
async fn banxico_fix_rate(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FeeQuery>,
) -> ApiResult<Json<RateEnvelope>> {
    let fee = clamp_fee(q.fee.as_deref());
    let envelope =
        fetch_and_assemble(&state.banxico_fix, DerivationMode::FeeAdjusted(fee)).await?;
    Ok(Json(envelope))
}

/// Banxico interbank buy/sell pair averaged into a mid-market rate.
async fn banxico_market_rate(State(state): State<Arc<AppState>>) -> ApiResult<Json<RateEnvelope>> {
    let envelope = fetch_and_assemble(&state.banxico_market, DerivationMode::BuySellMid).await?;
    Ok(Json(envelope))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rates/wise", get(wise_rate))
        .route("/rates/wise-converter", get(wise_converter_rate))
        .route("/rates/exchangerate-host", get(exchange_rate_host_rate))
        .route("/rates/banxico/fix", get(banxico_fix_rate))
        .route("/rates/banxico/market", get(banxico_market_rate))
}
