//! The request pipeline: fetch, derive, normalize, assemble.
//!
//! Every provider variant goes through the same sequence; the variant only
//! decides which adapter runs and which [`DerivationMode`] applies. This
//! replaces per-provider request/response skeletons with one configurable
//! path.

use crate::derive::{derive, DerivationMode};
use crate::envelope::RateEnvelope;
use crate::errors::RateError;
use crate::normalize::normalize_date;
use crate::provider::RateProvider;

/// Run one provider call end to end and assemble the success envelope.
///
/// The pipeline suspends exactly once, at the outbound call. Any failure
/// (transport, upstream status, parse) propagates as [`RateError`] and no
/// partial envelope is ever produced.
pub async fn fetch_and_assemble(
    provider: &dyn RateProvider,
    mode: DerivationMode,
) -> Result<RateEnvelope, RateError> {
    let result = provider.fetch_rate().await?;
    let derived = derive(&result, mode)?;
    let date = result
        .quotes
        .iter()
        .find_map(|q| q.raw_date.as_deref())
        .map(normalize_date);
    Ok(RateEnvelope::from_derived(
        result.provider,
        provider.source(),
        derived,
        date,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::banxico::{BanxicoFixProvider, BanxicoMarketProvider};
    use crate::provider::exchange_rate_host::ExchangeRateHostProvider;
    use crate::provider::wise::WiseProvider;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_wise_passthrough_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/rates?source=MXN&target=USD")
            .with_status(200)
            .with_body(r#"[{"rate": 17.23}]"#)
            .create_async()
            .await;

        let provider = WiseProvider::with_base_url(server.url(), "token".to_string());
        let envelope = fetch_and_assemble(&provider, DerivationMode::Passthrough)
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "mxn_usd": 17.23, "source": "mid-market", "provider": "Wise" })
        );
    }

    #[tokio::test]
    async fn test_exchange_rate_host_inverse_direction_preserved() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/latest?base=MXN&symbols=USD")
            .with_status(200)
            .with_body(r#"{"rates": {"USD": 0.0542}}"#)
            .create_async()
            .await;

        let provider = ExchangeRateHostProvider::with_base_url(server.url());
        let envelope = fetch_and_assemble(&provider, DerivationMode::Passthrough)
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "mxn_usd": 0.0542,
                "source": "mid-market",
                "provider": "ExchangeRate.host"
            })
        );
    }

    #[tokio::test]
    async fn test_banxico_fix_fee_adjusted_envelope() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{
            "bmx": {
                "series": [
                    { "idSerie": "SF43718", "datos": [{ "dato": "17,456700", "fecha": "15/03/2024" }] }
                ]
            }
        }"#;
        let _mock = server
            .mock("GET", "/series/SF43718/datos/oportuno")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let provider = BanxicoFixProvider::with_base_url(
            server.url(),
            "token".to_string(),
            "SF43718".to_string(),
        );
        let envelope = fetch_and_assemble(&provider, DerivationMode::FeeAdjusted(dec!(0.02)))
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "reference": { "rate": 17.4567, "date": "2024-03-15" },
                "customer_rate": 17.805834,
                "fee": 0.02,
                "source": "FIX",
                "provider": "Banxico"
            })
        );
    }

    #[tokio::test]
    async fn test_banxico_market_mid_envelope() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{
            "bmx": {
                "series": [
                    { "idSerie": "SF60653", "datos": [{ "dato": "17.10", "fecha": "15/03/2024" }] },
                    { "idSerie": "SF60654", "datos": [{ "dato": "17.30", "fecha": "15/03/2024" }] }
                ]
            }
        }"#;
        let _mock = server
            .mock("GET", "/series/SF60653,SF60654/datos/oportuno")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let provider = BanxicoMarketProvider::with_base_url(
            server.url(),
            "token".to_string(),
            "SF60653".to_string(),
            "SF60654".to_string(),
        );
        let envelope = fetch_and_assemble(&provider, DerivationMode::BuySellMid)
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "mxn_usd": { "buy": 17.1, "sell": 17.3, "mid": 17.2 },
                "date": "2024-03-15",
                "source": "mid-market",
                "provider": "Banxico"
            })
        );
    }

    #[tokio::test]
    async fn test_failures_propagate_without_partial_envelope() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/rates?source=MXN&target=USD")
            .with_status(200)
            .with_body(r#"[{"unexpected": true}]"#)
            .create_async()
            .await;

        let provider = WiseProvider::with_base_url(server.url(), "token".to_string());
        let err = fetch_and_assemble(&provider, DerivationMode::Passthrough)
            .await
            .unwrap_err();
        assert!(matches!(err, RateError::Parse { .. }));
    }
}
