//! Rate provider abstractions and implementations.
//!
//! Each provider variant implements [`RateProvider`]: one outbound call that
//! either yields a [`ProviderResult`] or one of the named failure classes.
//! Adapters own their HTTP client and hold their credentials by injection;
//! no provider reads secrets from globals at call time.

mod traits;

pub mod banxico;
pub mod exchange_rate_host;
pub mod wise;

pub use traits::RateProvider;
