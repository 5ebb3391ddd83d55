//! Canonical response envelope assembly.
//!
//! A success envelope is only built once every required field has resolved;
//! partial successes do not exist. Failures stay as [`RateError`] and are
//! mapped to the error body at the request boundary.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{DerivedRate, NormalizedRate};

/// Where the reported rate economically comes from.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum RateSource {
    /// A mid-market quote, raw or averaged from buy/sell
    #[serde(rename = "mid-market")]
    MidMarket,
    /// The central bank's official daily reference rate
    #[serde(rename = "FIX")]
    Fix,
}

/// Canonical success body: provider id, source, and the mode-specific fields.
#[derive(Clone, Debug, Serialize)]
pub struct RateEnvelope {
    #[serde(flatten)]
    body: RateBody,
    source: RateSource,
    provider: &'static str,
}

/// Mode-specific fields of the success body.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
enum RateBody {
    Single {
        mxn_usd: Decimal,
        #[serde(skip_serializing_if = "Option::is_none")]
        date: Option<String>,
    },
    FeeAdjusted {
        reference: NormalizedRate,
        customer_rate: Decimal,
        fee: Decimal,
    },
    BuySellMid {
        mxn_usd: BuySellBody,
        #[serde(skip_serializing_if = "Option::is_none")]
        date: Option<String>,
    },
}

/// Nested buy/sell/mid block for the dual-series mode.
#[derive(Clone, Debug, Serialize)]
struct BuySellBody {
    buy: Decimal,
    sell: Decimal,
    mid: Decimal,
}

impl RateEnvelope {
    /// Assemble the success envelope from a derived rate and its
    /// already-normalized date.
    pub fn from_derived(
        provider: &'static str,
        source: RateSource,
        derived: DerivedRate,
        date: Option<String>,
    ) -> Self {
        let body = match derived {
            DerivedRate::Single { mid } => RateBody::Single { mxn_usd: mid, date },
            DerivedRate::FeeAdjusted {
                reference,
                customer_rate,
                fee,
            } => RateBody::FeeAdjusted {
                reference: NormalizedRate {
                    rate: reference,
                    date,
                },
                customer_rate,
                fee,
            },
            DerivedRate::BuySellMid { buy, sell, mid } => RateBody::BuySellMid {
                mxn_usd: BuySellBody { buy, sell, mid },
                date,
            },
        };
        Self {
            body,
            source,
            provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_single_envelope_shape() {
        let envelope = RateEnvelope::from_derived(
            "Wise",
            RateSource::MidMarket,
            DerivedRate::Single { mid: dec!(17.23) },
            None,
        );
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "mxn_usd": 17.23,
                "source": "mid-market",
                "provider": "Wise"
            })
        );
    }

    #[test]
    fn test_fee_adjusted_envelope_shape() {
        let envelope = RateEnvelope::from_derived(
            "Banxico",
            RateSource::Fix,
            DerivedRate::FeeAdjusted {
                reference: dec!(17.4567),
                customer_rate: dec!(17.805834),
                fee: dec!(0.02),
            },
            Some("2024-03-15".to_string()),
        );
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

    #[test]
    fn test_buy_sell_envelope_shape() {
        let envelope = RateEnvelope::from_derived(
            "Banxico",
            RateSource::MidMarket,
            DerivedRate::BuySellMid {
                buy: dec!(17.10),
                sell: dec!(17.30),
                mid: dec!(17.2),
            },
            Some("2024-03-15".to_string()),
        );
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
}
