//! The public quoting surface consumed by transports (CLI, bots, HTTP).
//!
//! Entry points are infallible at the type level: lookups that miss and
//! calculations that fail come back as structured error values, never as
//! `Err` or a panic. This keeps every transport's handling identical.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{CatalogStore, PricingUnit, ServiceDefinition, ServiceId};
use crate::domain::quote::{BillingMode, DiscountLine, Quote};
use crate::domain::selection::{CleanType, ServiceSelections};
use crate::errors::PricingError;
use crate::pricing::bundles::{match_bundles, B2bContext, BundleMatch};
use crate::pricing::ops::round_currency;
use crate::pricing::{discounts, DefaultStrategy, PricingStrategy};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    pub service_id: ServiceId,
    pub display_name: String,
    pub unit: PricingUnit,
    pub recurring_capable: bool,
    pub starting_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_charge: Option<Decimal>,
}

impl ServiceSummary {
    fn from_definition(def: &ServiceDefinition) -> Self {
        Self {
            service_id: def.id.clone(),
            display_name: def.display_name.clone(),
            unit: def.unit,
            recurring_capable: def.recurring_capable,
            starting_price: def.starting_price,
            minimum_charge: def.minimum_charge,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSummary {
    pub id: String,
    pub label: String,
    pub price: Decimal,
    pub billing: BillingMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOnSummary {
    pub id: String,
    pub label: String,
    pub price: Decimal,
}

/// Per-service pricing detail for browse/preview surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingSummary {
    #[serde(flatten)]
    pub service: ServiceSummary,
    pub tiers: Vec<TierSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_ons: Vec<AddOnSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PricingSummaryResponse {
    Summary(Box<PricingSummary>),
    Error(ApiError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteUnavailable {
    pub service_id: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuoteResponse {
    Priced(Box<Quote>),
    Unavailable(QuoteUnavailable),
}

impl QuoteResponse {
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Self::Priced(quote) => Some(quote),
            Self::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleOptionsResponse {
    pub requested_services: Vec<ServiceId>,
    pub matching_bundles: Vec<BundleMatch>,
    pub bundle_count: usize,
    /// Cart-level multi-service percent already earned by this request.
    pub multi_service_percent: Decimal,
    /// Upsell nudge when one more service unlocks a better cart tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_tier_hint: Option<String>,
}

pub struct PricingService<'a, S = DefaultStrategy> {
    catalog: &'a CatalogStore,
    strategy: S,
}

impl<'a> PricingService<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        Self::with_strategy(catalog, DefaultStrategy::default())
    }
}

impl<'a, S: PricingStrategy> PricingService<'a, S> {
    pub fn with_strategy(catalog: &'a CatalogStore, strategy: S) -> Self {
        Self { catalog, strategy }
    }

    pub fn all_services(&self) -> Vec<ServiceSummary> {
        self.catalog.services().iter().map(ServiceSummary::from_definition).collect()
    }

    pub fn service_pricing(&self, service_id: &str) -> PricingSummaryResponse {
        let id = ServiceId::new(service_id);
        match self.catalog.service(&id) {
            Some(def) => PricingSummaryResponse::Summary(Box::new(PricingSummary {
                service: ServiceSummary::from_definition(def),
                tiers: self.tier_summaries(def),
                add_ons: self.add_on_summaries(def),
            })),
            None => PricingSummaryResponse::Error(ApiError {
                error: PricingError::UnknownService(service_id.to_string()).to_string(),
            }),
        }
    }

    pub fn calculate_quote(
        &self,
        service_id: &str,
        selections: &serde_json::Value,
    ) -> QuoteResponse {
        let id = ServiceId::new(service_id);
        let Some(def) = self.catalog.service(&id) else {
            return unavailable(service_id, PricingError::UnknownService(service_id.to_string()));
        };
        let parsed = match ServiceSelections::parse(&id, selections) {
            Ok(parsed) => parsed,
            Err(err) => return unavailable(service_id, err),
        };
        match self.strategy.price(self.catalog, def, &parsed) {
            Ok(quote) => {
                QuoteResponse::Priced(Box::new(self.apply_cart_context(quote, def, selections)))
            }
            Err(err) => unavailable(service_id, err),
        }
    }

    /// Layer the multi-service cart discount onto a quote booked as part of
    /// a bundle (`bundledWith` in the selection bag). Cart-level, so it sits
    /// outside the per-service strategies and both paths price identically.
    fn apply_cart_context(
        &self,
        mut quote: Quote,
        def: &ServiceDefinition,
        selections: &serde_json::Value,
    ) -> Quote {
        let Some(bundled) = selections.get("bundledWith").and_then(|v| v.as_array()) else {
            return quote;
        };
        let mut cart: BTreeSet<&str> = bundled.iter().filter_map(|v| v.as_str()).collect();
        cart.insert(def.id.as_str());
        let cart_size = cart.len() as u32;
        let percent = discounts::multi_service_percent(self.catalog.discounts(), cart_size);
        if percent == Decimal::ZERO || quote.subtotal <= Decimal::ZERO {
            return quote;
        }
        quote.discounts.push(DiscountLine {
            label: format!("Multi-service discount ({cart_size} services)"),
            percent,
            amount: round_currency(quote.subtotal * percent),
        });
        let (total, minimum_applied) = discounts::apply_minimum(
            quote.subtotal - quote.total_discount(),
            def.minimum_charge,
        );
        quote.total = total;
        quote.minimum_applied = minimum_applied;
        quote
    }

    pub fn bundle_options(
        &self,
        service_ids: &[String],
        b2b: Option<B2bContext>,
    ) -> BundleOptionsResponse {
        let requested: Vec<ServiceId> =
            service_ids.iter().map(|s| ServiceId::new(s.clone())).collect();
        let matching_bundles = match_bundles(self.catalog, &requested, b2b);
        let count = requested.len() as u32;
        let tables = self.catalog.discounts();
        let current_percent = discounts::multi_service_percent(tables, count);
        let next_tier_hint = tables
            .multi_service
            .iter()
            .find(|t| t.min_count > count)
            .map(|t| {
                let needed = t.min_count - count;
                let services = if needed == 1 { "service" } else { "services" };
                format!(
                    "Add {needed} more {services} to unlock {}% off your visit",
                    display_percent(t.percent)
                )
            });
        BundleOptionsResponse {
            requested_services: requested,
            bundle_count: matching_bundles.len(),
            matching_bundles,
            multi_service_percent: current_percent,
            next_tier_hint,
        }
    }

    fn tier_summaries(&self, def: &ServiceDefinition) -> Vec<TierSummary> {
        let ext = self.catalog.exterior();
        match def.id.as_str() {
            "home_cleaning" => {
                let smallest = tier_base_row(self.catalog);
                vec![
                    one_time("standard", "Standard clean (from)", smallest.price(CleanType::Standard)),
                    one_time("deep", "Deep clean (from)", smallest.price(CleanType::Deep)),
                    one_time("move_out", "Move-out clean (from)", smallest.price(CleanType::MoveOut)),
                ]
            }
            "carpet_cleaning" => {
                let rates = self.catalog.carpet();
                vec![
                    one_time("standard", "Standard (per room)", rates.room_standard),
                    one_time("deep", "Deep clean (per room)", rates.room_deep),
                    one_time("pet", "Pet treatment (per room)", rates.room_pet),
                    one_time("3br", "Whole-house package, 3BR", rates.package_three_bedroom),
                    one_time("4_5br", "Whole-house package, 4-5BR", rates.package_four_five_bedroom),
                ]
            }
            "junk_removal" => {
                use crate::catalog::ItemCatalog;
                ItemCatalog::LOAD_SIZES
                    .iter()
                    .map(|size| {
                        let label = ItemCatalog::load_label(*size);
                        TierSummary {
                            id: label.to_lowercase().replace(' ', "_").replace('/', "_"),
                            label: label.to_string(),
                            price: self.catalog.items().load_price(*size),
                            billing: BillingMode::OneTime,
                        }
                    })
                    .collect()
            }
            "handyman" => {
                let tasks = self.catalog.tasks();
                let mut tiers =
                    vec![one_time("hourly", "Hourly labor (per hour)", tasks.hourly_rate)];
                tiers.extend(tasks.tasks().iter().take(5).map(|t| TierSummary {
                    id: t.id.clone(),
                    label: t.name.clone(),
                    price: t.base_price,
                    billing: BillingMode::OneTime,
                }));
                tiers
            }
            "gutter_cleaning" => vec![
                one_time("1_story", "1-story home", ext.gutter.one_story),
                one_time("1_story_large", "1-story, large home", ext.gutter.one_story_large),
                one_time("2_story", "2-story home", ext.gutter.two_story),
                one_time("2_story_large", "2-story, large home", ext.gutter.two_story_large),
                one_time("3_story", "3-story home", ext.gutter.three_story),
            ],
            "landscaping" => vec![
                one_time("one_time_mow", "One-time mow (1/4 acre)", ext.landscape.one_time_mow_quarter),
                one_time("cleanup", "Yard cleanup", ext.landscape.cleanup),
                monthly("mow_go", "Mow & Go (1/4 acre)", ext.landscape.mow_go_quarter),
                monthly("full_service", "Full Service (1/4 acre)", ext.landscape.full_service_quarter),
                monthly("premium", "Premium (1/4 acre)", ext.landscape.premium_quarter),
            ],
            "pool_cleaning" => vec![
                monthly("basic", "Basic", ext.pool.basic_monthly),
                monthly("standard", "Standard", ext.pool.standard_monthly),
                monthly("full_service", "Full Service", ext.pool.full_service_monthly),
                one_time("deep_clean", "One-time deep clean", ext.pool.deep_clean),
            ],
            "pressure_washing" => {
                vec![one_time("per_sqft", "Per square foot", ext.pressure_per_sqft)]
            }
            "moving_labor" => {
                vec![one_time("hourly", "Per pro, per hour", ext.mover_hourly)]
            }
            "garage_cleanout" => vec![
                one_time("small", "Small (1-car)", ext.garage.small),
                one_time("medium", "Medium (2-car)", ext.garage.medium),
                one_time("large", "Large (3-car)", ext.garage.large),
                one_time("xl", "Oversized", ext.garage.xl),
            ],
            "light_demolition" => {
                vec![one_time("flat", "Single structure", ext.demolition_flat)]
            }
            "home_consultation" => vec![
                one_time("standard", "Walkthrough", ext.consultation_standard),
                one_time("aerial", "Aerial scan", ext.consultation_aerial),
            ],
            _ => Vec::new(),
        }
    }

    fn add_on_summaries(&self, def: &ServiceDefinition) -> Vec<AddOnSummary> {
        match def.id.as_str() {
            "home_cleaning" => {
                let rates = self.catalog.cleaning();
                vec![
                    AddOnSummary {
                        id: "pets".to_string(),
                        label: "Pet hair treatment".to_string(),
                        price: rates.pet_addon,
                    },
                    AddOnSummary {
                        id: "same_day".to_string(),
                        label: "Same-day booking".to_string(),
                        price: rates.same_day_addon,
                    },
                ]
            }
            "carpet_cleaning" => {
                let rates = self.catalog.carpet();
                vec![
                    AddOnSummary {
                        id: "hallway".to_string(),
                        label: "Hallway".to_string(),
                        price: rates.hallway,
                    },
                    AddOnSummary {
                        id: "stairs".to_string(),
                        label: "Stair flight".to_string(),
                        price: rates.stair_flight,
                    },
                    AddOnSummary {
                        id: "scotchgard".to_string(),
                        label: "Scotchgard (per room)".to_string(),
                        price: rates.scotchgard_room,
                    },
                ]
            }
            _ => Vec::new(),
        }
    }
}

fn tier_base_row(catalog: &CatalogStore) -> &crate::catalog::CleanTypePrices {
    catalog.cleaning().row("1-1").unwrap_or_else(|| catalog.cleaning().default_row())
}

fn one_time(id: &str, label: &str, price: Decimal) -> TierSummary {
    TierSummary {
        id: id.to_string(),
        label: label.to_string(),
        price,
        billing: BillingMode::OneTime,
    }
}

fn monthly(id: &str, label: &str, price: Decimal) -> TierSummary {
    TierSummary {
        id: id.to_string(),
        label: label.to_string(),
        price,
        billing: BillingMode::Monthly,
    }
}

fn unavailable(service_id: &str, err: PricingError) -> QuoteResponse {
    QuoteResponse::Unavailable(QuoteUnavailable {
        service_id: service_id.to_string(),
        error: err.to_string(),
    })
}

fn display_percent(percent: Decimal) -> Decimal {
    (percent * Decimal::from(100)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> CatalogStore {
        CatalogStore::load().expect("load catalog")
    }

    #[test]
    fn all_services_lists_the_full_catalog() {
        let catalog = catalog();
        let service = PricingService::new(&catalog);
        let services = service.all_services();
        assert_eq!(services.len(), 12);
        assert!(services.iter().any(|s| s.service_id.as_str() == "junk_removal"));
    }

    #[test]
    fn unknown_service_pricing_is_a_structured_error() {
        let catalog = catalog();
        let service = PricingService::new(&catalog);
        let response = service.service_pricing("teleport_cleaning");
        let PricingSummaryResponse::Error(err) = response else {
            panic!("expected structured error");
        };
        assert_eq!(err.error, "Pricing calculation not available for teleport_cleaning");
    }

    #[test]
    fn unknown_service_quote_is_unavailable_not_a_panic() {
        let catalog = catalog();
        let service = PricingService::new(&catalog);
        let response = service.calculate_quote("teleport_cleaning", &json!({}));
        let QuoteResponse::Unavailable(unavailable) = response else {
            panic!("expected unavailable response");
        };
        assert_eq!(unavailable.service_id, "teleport_cleaning");
        assert_eq!(
            unavailable.error,
            "Pricing calculation not available for teleport_cleaning"
        );
    }

    #[test]
    fn quote_surface_returns_the_priced_quote() {
        let catalog = catalog();
        let service = PricingService::new(&catalog);
        let response = service.calculate_quote("gutter_cleaning", &json!({}));
        let quote = response.quote().expect("priced quote");
        assert_eq!(quote.total, Decimal::from(129));
    }

    #[test]
    fn bundle_options_carry_the_upsell_hint() {
        let catalog = catalog();
        let service = PricingService::new(&catalog);
        let response = service
            .bundle_options(&["home_cleaning".to_string(), "junk_removal".to_string()], None);
        assert_eq!(response.multi_service_percent, Decimal::ZERO);
        let hint = response.next_tier_hint.expect("one service short of the first tier");
        assert_eq!(hint, "Add 1 more service to unlock 10% off your visit");
    }

    #[test]
    fn bundle_options_at_three_services_earn_the_cart_percent() {
        let catalog = catalog();
        let service = PricingService::new(&catalog);
        let response = service.bundle_options(
            &[
                "home_cleaning".to_string(),
                "junk_removal".to_string(),
                "gutter_cleaning".to_string(),
            ],
            None,
        );
        assert_eq!(response.multi_service_percent, Decimal::new(10, 2));
        let hint = response.next_tier_hint.expect("next tier exists at five services");
        assert!(hint.contains("15%"));
    }

    #[test]
    fn bundled_quote_earns_the_cart_discount() {
        let catalog = catalog();
        let service = PricingService::new(&catalog);
        let response = service.calculate_quote(
            "gutter_cleaning",
            &json!({ "bundledWith": ["pressure_washing", "landscaping"] }),
        );
        let quote = response.quote().expect("priced quote");
        assert_eq!(quote.subtotal, Decimal::from(129));
        assert_eq!(quote.discounts[0].percent, Decimal::new(10, 2));
        assert_eq!(quote.discounts[0].amount, Decimal::from(13));
        assert_eq!(quote.total, Decimal::from(116));
    }

    #[test]
    fn recurring_and_cart_discounts_are_computed_against_the_same_base() {
        let catalog = catalog();
        let service = PricingService::new(&catalog);
        let response = service.calculate_quote(
            "home_cleaning",
            &json!({
                "bedrooms": 3, "bathrooms": 2, "stories": 2, "cleanType": "deep",
                "isRecurring": true, "frequency": "monthly",
                "bundledWith": ["junk_removal", "gutter_cleaning"]
            }),
        );
        let quote = response.quote().expect("priced quote");
        // Both lines read the $309 subtotal, never each other's result.
        assert_eq!(quote.subtotal, Decimal::from(309));
        assert_eq!(quote.discounts[0].amount, Decimal::from(15));
        assert_eq!(quote.discounts[1].amount, Decimal::from(31));
        assert_eq!(quote.total, Decimal::from(263));
    }

    #[test]
    fn service_pricing_detail_includes_tiers_and_add_ons() {
        let catalog = catalog();
        let service = PricingService::new(&catalog);
        let PricingSummaryResponse::Summary(summary) = service.service_pricing("home_cleaning")
        else {
            panic!("expected summary");
        };
        assert_eq!(summary.tiers.len(), 3);
        assert_eq!(summary.add_ons.len(), 2);
        assert_eq!(summary.tiers[0].price, Decimal::from(99));
    }
}
