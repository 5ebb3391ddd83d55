//! Core data model for provider quotes and derived rates.

use rust_decimal::Decimal;
use serde::Serialize;

/// Role a quote plays inside a provider payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteKind {
    /// A mid-market quote with no markup
    MidMarket,
    /// An official daily reference rate published by a central bank
    FixReference,
    /// Wholesale rate at which a market maker buys the currency
    Buy,
    /// Wholesale rate at which a market maker sells the currency
    Sell,
}

/// A single quote as extracted from a provider payload.
///
/// The value has already been sanitized and parsed; the date is still in the
/// provider's native format and is normalized at assembly time.
#[derive(Clone, Debug, PartialEq)]
pub struct RawQuote {
    /// Positive rate value
    pub value: Decimal,
    /// Provider-native date string, if the payload carried one
    pub raw_date: Option<String>,
    /// Role of this quote in the payload
    pub kind: QuoteKind,
}

impl RawQuote {
    /// Create a quote without a date (most aggregator payloads).
    pub fn new(value: Decimal, kind: QuoteKind) -> Self {
        Self {
            value,
            raw_date: None,
            kind,
        }
    }

    /// Create a quote with a provider-native date string.
    pub fn dated(value: Decimal, raw_date: String, kind: QuoteKind) -> Self {
        Self {
            value,
            raw_date: Some(raw_date),
            kind,
        }
    }
}

/// The outcome of one successful provider call.
///
/// Invariant: `quotes` is non-empty. Adapters that fail to locate the
/// expected field return a parse error instead of an empty or zero result.
#[derive(Clone, Debug)]
pub struct ProviderResult {
    /// Display name of the provider (e.g. "Wise", "Banxico")
    pub provider: &'static str,
    /// The quotes extracted from the payload
    pub quotes: Vec<RawQuote>,
}

impl ProviderResult {
    /// The quote carrying the reference value for single-quote modes.
    pub fn primary(&self) -> Option<&RawQuote> {
        self.quotes.first()
    }

    /// Find a quote by its role in the payload.
    pub fn quote_of_kind(&self, kind: QuoteKind) -> Option<&RawQuote> {
        self.quotes.iter().find(|q| q.kind == kind)
    }
}

/// Derived economic value, one variant per derivation mode.
///
/// All contained values are positive; derivation fails with a parse error
/// rather than emit a non-positive rate.
#[derive(Clone, Debug, PartialEq)]
pub enum DerivedRate {
    /// Single-quote pass-through; the value is forwarded unchanged
    Single {
        /// The provider's quote, unrounded
        mid: Decimal,
    },
    /// Reference rate adjusted by an added fee margin
    FeeAdjusted {
        /// The official reference rate the adjustment started from
        reference: Decimal,
        /// `round6(reference * (1 + fee))`
        customer_rate: Decimal,
        /// Fee actually applied, within `[0, 1)`
        fee: Decimal,
    },
    /// Mid-market average of wholesale buy/sell quotes
    BuySellMid {
        /// Wholesale buy quote
        buy: Decimal,
        /// Wholesale sell quote
        sell: Decimal,
        /// `round6((buy + sell) / 2)`
        mid: Decimal,
    },
}

/// A quote after sanitization and date normalization.
///
/// Invariant: `rate` is positive. This is also the reference block emitted
/// inside the fee-adjusted envelope.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NormalizedRate {
    /// The provider's rate value
    pub rate: Decimal,
    /// ISO-8601 publication date, when the provider supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
