//! homequote-core: deterministic quoting for a catalog of home services.
//!
//! The crate is organized as a pipeline: typed selections
//! ([`domain::selection`]) are priced against the immutable
//! [`catalog::CatalogStore`] by a [`pricing::PricingStrategy`] (current
//! engine with legacy fallback), and the [`api::PricingService`] wraps it
//! all in transport-friendly structured responses.

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;

pub use api::{
    BundleOptionsResponse, PricingService, PricingSummaryResponse, QuoteResponse, ServiceSummary,
};
pub use catalog::{CatalogStore, ServiceId};
pub use config::{AppConfig, EnginePreference, LoadOptions};
pub use domain::quote::{BillingMode, Quote, QuoteSource};
pub use errors::{CatalogError, PricingError};
pub use pricing::{
    B2bContext, CentralizedEngine, DefaultStrategy, FallbackPricingStrategy, LegacyCalculator,
    PricingStrategy,
};
