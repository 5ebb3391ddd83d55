//! Rate derivation: pass-through, fee adjustment, and buy/sell averaging.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::RateError;
use crate::models::{DerivedRate, ProviderResult, QuoteKind};

/// Which derivation the request configuration selected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DerivationMode {
    /// Forward the single quote unchanged
    Passthrough,
    /// Adjust the reference quote by a fee margin in `[0, 1)`
    FeeAdjusted(Decimal),
    /// Average wholesale buy/sell quotes into a mid-market rate
    BuySellMid,
}

/// Round to 6 decimal places, half-away-from-zero.
pub fn round6(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero)
}

/// Fold a raw `fee` query value into a valid fee.
///
/// Absent, non-numeric, or out-of-range input is silently clamped to 0,
/// never rejected.
pub fn clamp_fee(raw: Option<&str>) -> Decimal {
    raw.and_then(|s| Decimal::from_str(s.trim()).ok())
        .filter(|f| *f >= Decimal::ZERO && *f < Decimal::ONE)
        .unwrap_or(Decimal::ZERO)
}

/// Combine the quotes of one provider call into a derived value.
///
/// Derivation is pure: identical inputs produce identical outputs. Any
/// outcome that would not be a positive rate is a parse failure, never a
/// forwarded zero.
pub fn derive(result: &ProviderResult, mode: DerivationMode) -> Result<DerivedRate, RateError> {
    match mode {
        DerivationMode::Passthrough => {
            let quote = result
                .primary()
                .ok_or_else(|| RateError::parse(result.provider, "missing rate quote"))?;
            ensure_positive(result.provider, quote.value)?;
            Ok(DerivedRate::Single { mid: quote.value })
        }
        DerivationMode::FeeAdjusted(fee) => {
            let quote = result
                .primary()
                .ok_or_else(|| RateError::parse(result.provider, "missing reference quote"))?;
            ensure_positive(result.provider, quote.value)?;
            let customer_rate = round6(quote.value * (Decimal::ONE + fee));
            Ok(DerivedRate::FeeAdjusted {
                reference: quote.value,
                customer_rate,
                fee,
            })
        }
        DerivationMode::BuySellMid => {
            let buy = result
                .quote_of_kind(QuoteKind::Buy)
                .ok_or_else(|| RateError::parse(result.provider, "missing buy series"))?
                .value;
            let sell = result
                .quote_of_kind(QuoteKind::Sell)
                .ok_or_else(|| RateError::parse(result.provider, "missing sell series"))?
                .value;
            ensure_positive(result.provider, buy)?;
            ensure_positive(result.provider, sell)?;
            let mid = round6((buy + sell) / Decimal::TWO);
            Ok(DerivedRate::BuySellMid { buy, sell, mid })
        }
    }
}

fn ensure_positive(provider: &str, value: Decimal) -> Result<(), RateError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(RateError::parse(provider, "non-positive rate value"))
    }
}
