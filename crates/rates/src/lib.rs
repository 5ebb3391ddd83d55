//! Cambio Rates Crate
//!
//! This crate normalizes heterogeneous exchange-rate provider payloads into
//! one canonical MXN↔USD rate record and computes derived economic values
//! (mid-market average from buy/sell quotes, fee-adjusted customer rate)
//! with deterministic rounding and date formatting.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  RateProvider    |  (Wise, ExchangeRate.host, Banxico, ...)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  ProviderResult  |  (provider-agnostic raw quotes)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |    Derivation    |     |  Date Normalizer |
//! +------------------+     +------------------+
//!          \                       /
//!           v                     v
//!          +-----------------------+
//!          |     RateEnvelope      |  (canonical response body)
//!          +-----------------------+
//! ```
//!
//! # Core Types
//!
//! - [`RawQuote`] / [`QuoteKind`] - Provider-agnostic quote as extracted
//! - [`ProviderResult`] - Non-empty set of quotes from one provider call
//! - [`DerivedRate`] - Output of one of the three derivation modes
//! - [`RateEnvelope`] - Canonical success body (provider, source, fields)
//! - [`RateError`] - Transport / Upstream / Parse taxonomy

pub mod derive;
pub mod envelope;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod provider;

pub use derive::{clamp_fee, derive, round6, DerivationMode};
pub use envelope::{RateEnvelope, RateSource};
pub use errors::RateError;
pub use models::{DerivedRate, NormalizedRate, ProviderResult, QuoteKind, RawQuote};
pub use normalize::{normalize_date, parse_locale_decimal};
pub use pipeline::fetch_and_assemble;
pub use provider::banxico::{BanxicoFixProvider, BanxicoMarketProvider};
pub use provider::exchange_rate_host::ExchangeRateHostProvider;
pub use provider::wise::{WiseConverterProvider, WiseProvider};
pub use provider::RateProvider;
