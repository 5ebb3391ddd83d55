use std::{net::SocketAddr, time::Duration};

use cambio_rates::provider::{banxico, exchange_rate_host, wise};

/// Server configuration, resolved once at startup from the environment.
///
/// Provider secrets and endpoints live here and are injected into the
/// adapters at construction time; nothing reads the environment at call
/// time.
pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub wise_api_token: String,
    pub wise_base_url: String,
    pub wise_converter_url: String,
    pub exchange_rate_host_base_url: String,
    pub bmx_token: String,
    pub banxico_base_url: String,
    pub banxico_fix_series: String,
    pub banxico_buy_series: String,
    pub banxico_sell_series: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("CAMBIO_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid CAMBIO_LISTEN_ADDR");
        let cors_allow = std::env::var("CAMBIO_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("CAMBIO_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            wise_api_token: std::env::var("WISE_API_TOKEN").unwrap_or_default(),
            wise_base_url: env_or("WISE_BASE_URL", wise::DEFAULT_BASE_URL),
            wise_converter_url: env_or("WISE_CONVERTER_URL", wise::DEFAULT_CONVERTER_URL),
            exchange_rate_host_base_url: env_or(
                "EXCHANGE_RATE_HOST_BASE_URL",
                exchange_rate_host::DEFAULT_BASE_URL,
            ),
            bmx_token: std::env::var("BMX_TOKEN").unwrap_or_default(),
            banxico_base_url: env_or("BANXICO_BASE_URL", banxico::DEFAULT_BASE_URL),
            banxico_fix_series: env_or("BANXICO_FIX_SERIES", banxico::FIX_SERIES),
            banxico_buy_series: env_or("BANXICO_BUY_SERIES", banxico::BUY_SERIES),
            banxico_sell_series: env_or("BANXICO_SELL_SERIES", banxico::SELL_SERIES),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
