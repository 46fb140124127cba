use homequote_core::catalog::{CatalogStore, ServiceDefinition};
use homequote_core::domain::quote::{BillingMode, Quote, QuoteSource};
use homequote_core::domain::selection::ServiceSelections;
use homequote_core::errors::PricingError;
use homequote_core::pricing::{FallbackPricingStrategy, LegacyCalculator, PricingStrategy};
use homequote_core::{PricingService, QuoteResponse};
use rust_decimal::Decimal;
use serde_json::json;

fn catalog() -> CatalogStore {
    CatalogStore::load().expect("seeded catalog loads")
}

fn priced(service: &str, bag: serde_json::Value) -> Quote {
    let catalog = catalog();
    let api = PricingService::new(&catalog);
    match api.calculate_quote(service, &bag) {
        QuoteResponse::Priced(quote) => *quote,
        QuoteResponse::Unavailable(unavailable) => {
            panic!("expected priced quote, got: {}", unavailable.error)
        }
    }
}

#[test]
fn two_junk_items_price_without_any_discount() {
    let quote = priced(
        "junk_removal",
        json!({ "items": [{ "id": "sofa" }, { "id": "mattress_queen" }] }),
    );
    assert_eq!(quote.subtotal, Decimal::from(135));
    assert!(quote.discounts.is_empty());
    assert_eq!(quote.total, Decimal::from(135));
    assert!(!quote.minimum_applied);
}

#[test]
fn six_junk_items_earn_the_fifteen_percent_tier() {
    let quote = priced(
        "junk_removal",
        json!({ "items": [
            { "id": "sectional" }, { "id": "hot_tub" }, { "id": "refrigerator" },
            { "id": "china_cabinet" }, { "id": "washer" }, { "id": "microwave" }
        ]}),
    );
    assert_eq!(quote.subtotal, Decimal::from(620));
    assert_eq!(quote.discounts.len(), 1);
    assert_eq!(quote.discounts[0].percent, Decimal::new(15, 2));
    assert_eq!(quote.discounts[0].amount, Decimal::from(93));
    assert_eq!(quote.total, Decimal::from(527));
}

#[test]
fn empty_gutter_selection_defaults_to_single_story() {
    let quote = priced("gutter_cleaning", json!({}));
    assert_eq!(quote.total, Decimal::from(129));
    assert_eq!(quote.billing, BillingMode::OneTime);
}

#[test]
fn recurring_deep_clean_two_story_monthly() {
    let quote = priced(
        "home_cleaning",
        json!({
            "bedrooms": 3, "bathrooms": 2, "stories": 2, "cleanType": "deep",
            "isRecurring": true, "frequency": "monthly"
        }),
    );
    assert_eq!(quote.subtotal, Decimal::from(309));
    assert_eq!(quote.discounts[0].percent, Decimal::new(5, 2));
    assert_eq!(quote.total, Decimal::from(294));
    assert_eq!(quote.billing, BillingMode::Monthly);
    assert_eq!(quote.formatted_total(), "$294/mo");
}

#[test]
fn partial_service_overlap_surfaces_the_move_out_bundle() {
    let catalog = catalog();
    let api = PricingService::new(&catalog);
    let response = api.bundle_options(
        &["home_consultation".to_string(), "junk_removal".to_string()],
        None,
    );
    let move_out = response
        .matching_bundles
        .iter()
        .find(|m| m.id == "move_out")
        .expect("move_out bundle matches on overlap");
    assert_eq!(move_out.matched_services.len(), 2);
    assert_eq!(move_out.bundle_savings, Decimal::from(68));
    assert!(move_out.requires_multiple_pros);
}

#[test]
fn unknown_service_returns_a_structured_error_value() {
    let catalog = catalog();
    let api = PricingService::new(&catalog);
    let response = api.calculate_quote("teleport_cleaning", &json!({}));
    let QuoteResponse::Unavailable(unavailable) = response else {
        panic!("expected unavailable response");
    };
    assert_eq!(
        unavailable.error,
        "Pricing calculation not available for teleport_cleaning"
    );
}

#[test]
fn identical_inputs_produce_byte_identical_quotes() {
    let bag = json!({
        "bedrooms": 4, "bathrooms": 3, "stories": 2, "cleanType": "move_out",
        "hasPets": true, "squareFootage": 3100
    });
    let first = priced("home_cleaning", bag.clone());
    let second = priced("home_cleaning", bag);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).expect("serialize first"),
        serde_json::to_vec(&second).expect("serialize second")
    );
}

#[test]
fn every_service_prices_nonnegative_on_an_empty_bag() {
    let catalog = catalog();
    let api = PricingService::new(&catalog);
    for def in catalog.services() {
        let response = api.calculate_quote(def.id.as_str(), &json!({}));
        let quote = response.quote().unwrap_or_else(|| panic!("{} should price", def.id));
        assert!(quote.total >= Decimal::ZERO, "{}", def.id);
        assert!(quote.subtotal >= Decimal::ZERO, "{}", def.id);
        for line in &quote.line_items {
            assert!(line.amount >= Decimal::ZERO, "{}", def.id);
        }
        let line_sum: Decimal = quote.line_items.iter().map(|l| l.amount).sum();
        assert_eq!(line_sum, quote.subtotal, "{} lines must reconcile", def.id);
    }
}

#[test]
fn minimum_floor_respects_the_zero_stays_zero_rule() {
    // Zero rooms of carpet is an empty job, not a $100 one.
    let quote = priced("carpet_cleaning", json!({ "rooms": 0 }));
    assert_eq!(quote.total, Decimal::ZERO);
    assert!(!quote.minimum_applied);

    // One standard room is lifted to the floor.
    let quote = priced("carpet_cleaning", json!({ "rooms": 1 }));
    assert_eq!(quote.subtotal, Decimal::from(50));
    assert_eq!(quote.total, Decimal::from(100));
    assert!(quote.minimum_applied);
}

#[test]
fn volume_tiers_replace_rather_than_stack() {
    // Eleven bagged-trash items: exactly one discount line at the top tier.
    let quote = priced(
        "junk_removal",
        json!({ "items": [{ "id": "bagged_trash", "quantity": 11 }] }),
    );
    assert_eq!(quote.discounts.len(), 1);
    assert_eq!(quote.discounts[0].percent, Decimal::new(20, 2));
}

#[test]
fn extreme_quantities_quote_instead_of_wrapping() {
    // Hours and crew are clamped to 999 and 99 at parse.
    let quote = priced("moving_labor", json!({ "hours": 100_000, "crewSize": 100_000 }));
    assert_eq!(quote.total, Decimal::from(65 * 999 * 99));

    // Item quantities are clamped to 999 each; the count still crosses the
    // top volume tier.
    let quote = priced(
        "junk_removal",
        json!({ "items": [
            { "id": "bagged_trash", "quantity": u32::MAX },
            { "id": "sofa" }
        ]}),
    );
    assert_eq!(quote.subtotal, Decimal::from(999 * 10 + 75));
    assert_eq!(quote.discounts[0].percent, Decimal::new(20, 2));
    assert_eq!(quote.total, Decimal::from(10_065 - 2_013));
}

#[test]
fn catalog_bundle_savings_identity_holds_for_every_bundle() {
    let catalog = catalog();
    for bundle in catalog.bundles() {
        assert_eq!(
            bundle.savings,
            bundle.alacarte_price - bundle.bundle_price,
            "bundle {}",
            bundle.id
        );
    }
}

struct AlwaysFailing;

impl PricingStrategy for AlwaysFailing {
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
            key: "injected failure".to_string(),
        })
    }
}

#[test]
fn fallback_serves_legacy_totals_when_the_current_engine_fails() {
    let catalog = catalog();
    let degraded = PricingService::with_strategy(
        &catalog,
        FallbackPricingStrategy::new(AlwaysFailing, LegacyCalculator),
    );
    let healthy = PricingService::new(&catalog);

    let bag = json!({ "stories": 2, "linearFeet": 190 });
    let degraded_quote = degraded
        .calculate_quote("gutter_cleaning", &bag)
        .quote()
        .expect("fallback still prices")
        .clone();
    let healthy_quote = healthy
        .calculate_quote("gutter_cleaning", &bag)
        .quote()
        .expect("healthy path prices")
        .clone();

    assert_eq!(degraded_quote.source, QuoteSource::Legacy);
    assert_eq!(healthy_quote.source, QuoteSource::Current);
    assert_eq!(degraded_quote.total, healthy_quote.total);
}
