//! Pricing strategies and their composition.
//!
//! Two calculation paths produce quotes from the same catalog: the current
//! [`CentralizedEngine`] and the [`LegacyCalculator`]. In production they are
//! composed by [`FallbackPricingStrategy`], which prefers the current path
//! and falls back with a logged warning when it fails. Every quote is tagged
//! with the path that produced it.

pub mod bundles;
pub mod discounts;
pub mod engine;
pub mod legacy;
pub mod ops;
pub mod tiers;

use tracing::warn;

use crate::catalog::{CatalogStore, ServiceDefinition};
use crate::domain::quote::{Quote, QuoteSource};
use crate::domain::selection::ServiceSelections;
use crate::errors::PricingError;

pub use bundles::{B2bContext, BundleMatch, VolumeSavings};
pub use engine::CentralizedEngine;
pub use legacy::LegacyCalculator;

pub trait PricingStrategy {
    fn source(&self) -> QuoteSource;

    fn price(
        &self,
        catalog: &CatalogStore,
        service: &ServiceDefinition,
        selections: &ServiceSelections,
    ) -> Result<Quote, PricingError>;
}

/// Try the primary path; on failure, log and consult the secondary.
///
/// The fallback is an explicit decision node rather than scattered recovery:
/// a quote only fails overall when both paths fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPricingStrategy<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackPricingStrategy<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

/// The production composition: current engine first, legacy second.
pub type DefaultStrategy = FallbackPricingStrategy<CentralizedEngine, LegacyCalculator>;

impl<P, S> PricingStrategy for FallbackPricingStrategy<P, S>
where
    P: PricingStrategy,
    S: PricingStrategy,
{
    fn source(&self) -> QuoteSource {
        self.primary.source()
    }

    fn price(
        &self,
        catalog: &CatalogStore,
        service: &ServiceDefinition,
        selections: &ServiceSelections,
    ) -> Result<Quote, PricingError> {
        match self.primary.price(catalog, service, selections) {
            Ok(quote) => Ok(quote),
            Err(primary_err) => {
                warn!(
                    service = %service.id,
                    error = %primary_err,
                    "primary pricing path failed, consulting fallback"
                );
                self.secondary.price(catalog, service, selections)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceId;
    use serde_json::json;

    /// A strategy that always fails, for exercising the fallback path.
    struct Failing;

    impl PricingStrategy for Failing {
        fn source(&self) -> QuoteSource {
            QuoteSource::Current
        }

        fn price(
            &self,
            _catalog: &CatalogStore,
            service: &ServiceDefinition,
            _selections: &ServiceSelections,
        ) -> Result<Quote, PricingError> {
            Err(PricingError::MissingRow {
                service: service.id.to_string(),
                key: "forced".to_string(),
            })
        }
    }

    fn setup() -> (CatalogStore, ServiceDefinition, ServiceSelections) {
        let catalog = CatalogStore::load().expect("load catalog");
        let id = ServiceId::new("gutter_cleaning");
        let def = catalog.service(&id).expect("known service").clone();
        let selections = ServiceSelections::parse(&id, &json!({})).expect("parse selections");
        (catalog, def, selections)
    }

    #[test]
    fn default_strategy_uses_the_current_path_when_it_succeeds() {
        let (catalog, def, selections) = setup();
        let quote = DefaultStrategy::default()
            .price(&catalog, &def, &selections)
            .expect("default strategy prices");
        assert_eq!(quote.source, QuoteSource::Current);
    }

    #[test]
    fn fallback_consults_the_secondary_when_the_primary_fails() {
        let (catalog, def, selections) = setup();
        let strategy = FallbackPricingStrategy::new(Failing, LegacyCalculator);
        let quote = strategy.price(&catalog, &def, &selections).expect("fallback prices");
        assert_eq!(quote.source, QuoteSource::Legacy);
        assert_eq!(quote.total, rust_decimal::Decimal::from(129));
    }

    #[test]
    fn both_paths_failing_surfaces_the_secondary_error() {
        let (catalog, def, selections) = setup();
        let strategy = FallbackPricingStrategy::new(Failing, Failing);
        let err = strategy
            .price(&catalog, &def, &selections)
            .expect_err("both paths fail");
        assert!(matches!(err, PricingError::MissingRow { .. }));
    }
}
