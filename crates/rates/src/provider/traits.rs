//! Rate provider trait definition.

use async_trait::async_trait;

use crate::envelope::RateSource;
use crate::errors::RateError;
use crate::models::ProviderResult;

/// Trait for exchange-rate providers.
///
/// Implement this trait to add support for a new provider variant. Each
/// invocation performs exactly one outbound call (a dual-series request is
/// still one call, since both series are requested together) and returns
/// either a non-empty [`ProviderResult`] or a [`RateError`]. A payload whose
/// expected fields cannot be located is a `Parse` failure, never a synthetic
/// zero rate.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Display name of this provider, as reported in the envelope.
    ///
    /// Should be a constant string like "Wise", "Banxico", etc.
    fn id(&self) -> &'static str;

    /// What the provider's quote economically represents.
    fn source(&self) -> RateSource;

    /// Perform the outbound call and extract the raw quotes.
    async fn fetch_rate(&self) -> Result<ProviderResult, RateError>;
}
