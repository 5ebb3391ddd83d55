use std::sync::Arc;

use cambio_rates::{
    BanxicoFixProvider, BanxicoMarketProvider, ExchangeRateHostProvider, WiseConverterProvider,
    WiseProvider,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Shared application state: one constructed adapter per provider variant.
///
/// Providers are immutable after construction, so requests share them with
/// no locking.
pub struct AppState {
    pub wise: WiseProvider,
    pub wise_converter: WiseConverterProvider,
    pub exchange_rate_host: ExchangeRateHostProvider,
    pub banxico_fix: BanxicoFixProvider,
    pub banxico_market: BanxicoMarketProvider,
}

pub fn init_tracing() {
    let log_format = std::env::var("CAMBIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    Arc::new(AppState {
        wise: WiseProvider::with_base_url(
            config.wise_base_url.clone(),
            config.wise_api_token.clone(),
        ),
        wise_converter: WiseConverterProvider::with_page_url(config.wise_converter_url.clone()),
        exchange_rate_host: ExchangeRateHostProvider::with_base_url(
            config.exchange_rate_host_base_url.clone(),
        ),
        banxico_fix: BanxicoFixProvider::with_base_url(
            config.banxico_base_url.clone(),
            config.bmx_token.clone(),
            config.banxico_fix_series.clone(),
        ),
        banxico_market: BanxicoMarketProvider::with_base_url(
            config.banxico_base_url.clone(),
            config.bmx_token.clone(),
            config.banxico_buy_series.clone(),
            config.banxico_sell_series.clone(),
        ),
    })
}
