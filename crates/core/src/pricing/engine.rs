//! The current pricing path: per-service assembly composed from tier
//! resolution, ordered pricing ops, and the discount engine. Produces the
//! fine-grained line-item breakdown.

use rust_decimal::Decimal;

use crate::catalog::{CatalogStore, ItemCatalog, ServiceDefinition};
use crate::domain::quote::{BillingMode, CrewEstimate, DiscountLine, Quote, QuoteSource};
use crate::domain::selection::{
    CarpetSelections, CleanType, CleaningSelections, ConsultationSelections, GarageSize,
    GarageSelections, GutterSelections, HandymanSelections, JunkSelections, LandscapingSelections,
    LoadSize, LotSize, MovingSelections, PoolSelections, PoolTier, PressureSelections,
    ServiceSelections,
};
use crate::errors::PricingError;
use crate::pricing::ops::{apply_modifiers, run, PricingOp, PricingState};
use crate::pricing::{discounts, tiers, PricingStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct CentralizedEngine;

impl PricingStrategy for CentralizedEngine {
    fn source(&self) -> QuoteSource {
        QuoteSource::Current
    }

    fn price(
        &self,
        catalog: &CatalogStore,
        service: &ServiceDefinition,
        selections: &ServiceSelections,
    ) -> Result<Quote, PricingError> {
        let priced = match selections {
            ServiceSelections::Cleaning(sel) => cleaning(catalog, sel),
            ServiceSelections::Carpet(sel) => carpet(catalog, sel),
            ServiceSelections::Junk(sel) => junk(catalog, sel)?,
            ServiceSelections::Handyman(sel) => handyman(catalog, sel)?,
            ServiceSelections::Gutter(sel) => gutter(catalog, sel),
            ServiceSelections::Landscaping(sel) => landscaping(catalog, sel),
            ServiceSelections::Pool(sel) => pool(catalog, sel),
            ServiceSelections::Pressure(sel) => pressure(catalog, sel),
            ServiceSelections::Moving(sel) => moving(catalog, sel),
            ServiceSelections::Garage(sel) => garage(catalog, sel),
            ServiceSelections::Demolition(_) => demolition(catalog),
            ServiceSelections::Consultation(sel) => consultation(catalog, sel),
        };
        Ok(priced.into_quote(service, QuoteSource::Current))
    }
}

/// Intermediate result of one per-service assembly, before the quote shell
/// (service identity, minimum floor, source tag) is attached.
struct Priced {
    state: PricingState,
    discounts: Vec<DiscountLine>,
    billing: BillingMode,
    crew: Option<CrewEstimate>,
}

impl Priced {
    fn one_time(state: PricingState) -> Self {
        Self { state, discounts: Vec::new(), billing: BillingMode::OneTime, crew: None }
    }

    fn into_quote(self, service: &ServiceDefinition, source: QuoteSource) -> Quote {
        let discount_total: Decimal = self.discounts.iter().map(|d| d.amount).sum();
        let pre_floor = self.state.subtotal - discount_total;
        let (total, minimum_applied) =
            discounts::apply_minimum(pre_floor, service.minimum_charge);
        Quote {
            service_id: service.id.clone(),
            service_name: service.display_name.clone(),
            line_items: self.state.lines,
            discounts: self.discounts,
            subtotal: self.state.subtotal,
            total,
            minimum_applied,
            billing: self.billing,
            crew: self.crew,
            source,
        }
    }
}

fn clean_type_label(clean_type: CleanType) -> &'static str {
    match clean_type {
        CleanType::Standard => "Standard Clean",
        CleanType::Deep => "Deep Clean",
        CleanType::MoveOut => "Move-Out Clean",
    }
}

fn cleaning(catalog: &CatalogStore, sel: &CleaningSelections) -> Priced {
    let rates = catalog.cleaning();
    let bedrooms = tiers::clamp_bedrooms(sel.bedrooms);
    let bathrooms = tiers::clamp_bathrooms(sel.bathrooms);
    let stories = tiers::clamp_stories(sel.stories);
    let row = tiers::cleaning_row(rates, bedrooms, bathrooms);

    let mut ops = vec![PricingOp::base(
        format!("{} — {bedrooms}BR/{bathrooms}BA", clean_type_label(sel.clean_type)),
        row.price(sel.clean_type),
    )];
    if stories == 2 {
        ops.push(PricingOp::percent_of_running("Two-story surcharge (15%)", rates.two_story_pct));
    } else if stories == 3 {
        ops.push(PricingOp::percent_of_running(
            "Three-story surcharge (25%)",
            rates.three_story_pct,
        ));
    }
    if sel.square_footage.is_some_and(|sqft| sqft >= rates.large_home_sqft) {
        ops.push(PricingOp::percent_of_running("Large home, 3,000+ sqft (10%)", rates.large_home_pct));
    }
    if sel.last_cleaned.is_some_and(|l| l.is_neglected()) {
        ops.push(PricingOp::percent_of_running(
            "First-visit catch-up (20%)",
            rates.neglected_pct,
        ));
    }
    if sel.has_pets {
        ops.push(PricingOp::flat("Pet hair treatment", rates.pet_addon));
    }
    if sel.same_day {
        ops.push(PricingOp::flat("Same-day booking", rates.same_day_addon));
    }
    if sel.is_rush {
        ops.push(PricingOp::percent_of_running("Rush service (50%)", catalog.discounts().rush_pct));
    }

    let state = run(&ops);
    let mut priced = Priced::one_time(state);
    if sel.is_recurring {
        priced.billing = BillingMode::Monthly;
        if let Some(line) =
            discounts::recurring_discount(catalog.discounts(), sel.frequency, priced.state.subtotal)
        {
            priced.discounts.push(line);
        }
    }
    priced.crew = Some(cleaning_crew(sel.clean_type, bedrooms, stories));
    priced
}

fn cleaning_crew(clean_type: CleanType, bedrooms: u8, stories: u8) -> CrewEstimate {
    let base = match clean_type {
        CleanType::Standard => Decimal::from(2),
        CleanType::Deep => Decimal::from(3),
        CleanType::MoveOut => Decimal::from(4),
    };
    let mut hours = base + Decimal::new(5, 1) * Decimal::from(bedrooms.saturating_sub(2));
    if stories >= 2 {
        hours += Decimal::new(5, 1);
    }
    let pros = if hours > Decimal::from(5) { 2 } else { 1 };
    CrewEstimate { estimated_hours: hours, pros }
}

fn carpet(catalog: &CatalogStore, sel: &CarpetSelections) -> Priced {
    let rates = catalog.carpet();
    let mut ops = Vec::new();
    match sel.package {
        Some(package) => {
            let label = match package {
                crate::domain::selection::CarpetPackage::ThreeBedroom => {
                    "Whole-house package — 3 bedrooms"
                }
                crate::domain::selection::CarpetPackage::FourFiveBedroom => {
                    "Whole-house package — 4-5 bedrooms"
                }
            };
            ops.push(PricingOp::base(label, rates.package_price(package)));
        }
        None => {
            if sel.rooms > 0 {
                let tier_label = match sel.tier {
                    crate::domain::selection::CarpetTier::Standard => "Standard carpet cleaning",
                    crate::domain::selection::CarpetTier::Deep => "Deep carpet cleaning",
                    crate::domain::selection::CarpetTier::Pet => "Pet treatment cleaning",
                };
                ops.push(PricingOp::per_unit(
                    format!("{tier_label} ({} rooms)", sel.rooms),
                    rates.room_price(sel.tier),
                    sel.rooms,
                ));
            }
        }
    }
    if sel.hallways > 0 {
        ops.push(PricingOp::per_unit("Hallway", rates.hallway, sel.hallways));
    }
    if sel.stair_flights > 0 {
        ops.push(PricingOp::per_unit("Stair flight", rates.stair_flight, sel.stair_flights));
    }
    if sel.scotchgard_rooms > 0 {
        ops.push(PricingOp::per_unit(
            "Scotchgard protection",
            rates.scotchgard_room,
            sel.scotchgard_rooms,
        ));
    }
    if sel.is_rush && !ops.is_empty() {
        ops.push(PricingOp::percent_of_running("Rush service (50%)", catalog.discounts().rush_pct));
    }

    let state = run(&ops);
    let mut priced = Priced::one_time(state);
    if sel.is_recurring {
        priced.billing = BillingMode::Monthly;
        if let Some(line) =
            discounts::recurring_discount(catalog.discounts(), sel.frequency, priced.state.subtotal)
        {
            priced.discounts.push(line);
        }
    }
    priced
}

fn junk(catalog: &CatalogStore, sel: &JunkSelections) -> Result<Priced, PricingError> {
    let items = catalog.items();
    if sel.items.is_empty() {
        // No itemization: price the selected (or minimum) load package.
        let size = sel.load_size.unwrap_or(LoadSize::Minimum);
        let mut ops =
            vec![PricingOp::base(ItemCatalog::load_label(size), items.load_price(size))];
        if sel.is_rush {
            ops.push(PricingOp::percent_of_running(
                "Rush service (50%)",
                catalog.discounts().rush_pct,
            ));
        }
        return Ok(Priced::one_time(run(&ops)));
    }

    let mut ops = Vec::new();
    let mut count = 0u32;
    for pick in &sel.items {
        let item = items.item(&pick.id).ok_or_else(|| PricingError::MissingRow {
            service: "junk_removal".to_string(),
            key: pick.id.clone(),
        })?;
        count = count.saturating_add(pick.quantity);
        ops.push(PricingOp::per_unit(item.label.clone(), item.price, pick.quantity));
    }
    if sel.is_rush {
        ops.push(PricingOp::percent_of_running("Rush service (50%)", catalog.discounts().rush_pct));
    }

    let state = run(&ops);
    let discount_lines = discounts::volume_discount(
        format!("Volume discount ({count} items)"),
        count,
        &catalog.discounts().item_volume,
        state.subtotal,
    )
    .into_iter()
    .collect();
    Ok(Priced {
        state,
        discounts: discount_lines,
        billing: BillingMode::OneTime,
        crew: None,
    })
}

fn handyman(catalog: &CatalogStore, sel: &HandymanSelections) -> Result<Priced, PricingError> {
    let tasks = catalog.tasks();
    if sel.tasks.is_empty() {
        let hours = sel.hours.unwrap_or(tasks.minimum_hours).max(tasks.minimum_hours);
        let state = run(&[PricingOp::per_unit(
            format!("Handyman labor ({hours} hr)"),
            tasks.hourly_rate,
            hours,
        )]);
        return Ok(Priced::one_time(state));
    }

    let mut ops = Vec::new();
    for pick in &sel.tasks {
        let task = tasks.task(&pick.task_id).ok_or_else(|| PricingError::MissingRow {
            service: "handyman".to_string(),
            key: pick.task_id.clone(),
        })?;
        let unit_price = apply_modifiers(task.base_price, &task.variables, &pick.variables);
        ops.push(PricingOp::per_unit(task.name.clone(), unit_price, pick.quantity));
    }
    if sel.is_rush {
        ops.push(PricingOp::percent_of_running("Rush service (50%)", catalog.discounts().rush_pct));
    }

    let state = run(&ops);
    let task_count = sel.tasks.len() as u32;
    let discount_lines = discounts::volume_discount(
        format!("Multi-task discount ({task_count} tasks)"),
        task_count,
        &catalog.discounts().task_volume,
        state.subtotal,
    )
    .into_iter()
    .collect();
    Ok(Priced {
        state,
        discounts: discount_lines,
        billing: BillingMode::OneTime,
        crew: None,
    })
}

fn gutter(catalog: &CatalogStore, sel: &GutterSelections) -> Priced {
    let (label, price) =
        tiers::gutter_price(&catalog.exterior().gutter, sel.stories, sel.linear_feet);
    Priced::one_time(run(&[PricingOp::base(format!("Gutter cleaning — {label}"), price)]))
}

fn landscaping(catalog: &CatalogStore, sel: &LandscapingSelections) -> Priced {
    use crate::domain::selection::LandscapePlan;
    let price = catalog.exterior().landscape.plan_price(sel.plan_type, sel.lot_size);
    let plan_label = match sel.plan_type {
        LandscapePlan::OneTimeMow => "One-time mow",
        LandscapePlan::Cleanup => "Yard cleanup",
        LandscapePlan::MowGo => "Mow & Go plan",
        LandscapePlan::FullService => "Full Service plan",
        LandscapePlan::Premium => "Premium plan",
    };
    let lot_label = match sel.lot_size {
        LotSize::Quarter => "quarter-acre lot",
        LotSize::Half => "half-acre lot",
    };
    let mut priced =
        Priced::one_time(run(&[PricingOp::base(format!("{plan_label} — {lot_label}"), price)]));
    if sel.plan_type.is_monthly() {
        priced.billing = BillingMode::Monthly;
    }
    priced
}

fn pool(catalog: &CatalogStore, sel: &PoolSelections) -> Priced {
    let price = catalog.exterior().pool.tier_price(sel.tier);
    let label = match sel.tier {
        PoolTier::Basic => "Basic pool service",
        PoolTier::Standard => "Standard pool service",
        PoolTier::FullService => "Full-service pool care",
        PoolTier::DeepClean => "One-time deep clean",
    };
    let mut priced = Priced::one_time(run(&[PricingOp::base(label, price)]));
    if sel.tier.is_monthly() {
        priced.billing = BillingMode::Monthly;
    }
    priced
}

fn pressure(catalog: &CatalogStore, sel: &PressureSelections) -> Priced {
    let rates = catalog.exterior();
    Priced::one_time(run(&[PricingOp::per_unit(
        format!("Pressure washing ({} sqft)", sel.square_footage),
        rates.pressure_per_sqft,
        sel.square_footage,
    )]))
}

fn moving(catalog: &CatalogStore, sel: &MovingSelections) -> Priced {
    let rates = catalog.exterior();
    let hours = sel.hours.max(rates.mover_minimum_hours);
    let crew = sel.crew_size.max(1);
    let mut ops = vec![PricingOp::per_unit(
        format!("Moving labor — {crew} pros × {hours} hr"),
        rates.mover_hourly,
        hours.saturating_mul(crew),
    )];
    if sel.is_rush {
        ops.push(PricingOp::percent_of_running("Rush service (50%)", catalog.discounts().rush_pct));
    }
    Priced::one_time(run(&ops))
}

fn garage(catalog: &CatalogStore, sel: &GarageSelections) -> Priced {
    let price = catalog.exterior().garage.package_price(sel.size);
    let label = match sel.size {
        GarageSize::Small => "Garage cleanout — small (1-car)",
        GarageSize::Medium => "Garage cleanout — medium (2-car)",
        GarageSize::Large => "Garage cleanout — large (3-car)",
        GarageSize::Xl => "Garage cleanout — oversized",
    };
    Priced::one_time(run(&[PricingOp::base(label, price)]))
}

fn demolition(catalog: &CatalogStore) -> Priced {
    Priced::one_time(run(&[PricingOp::base(
        "Light demolition (single structure)",
        catalog.exterior().demolition_flat,
    )]))
}

fn consultation(catalog: &CatalogStore, sel: &ConsultationSelections) -> Priced {
    use crate::domain::selection::ConsultationTier;
    let price = catalog.exterior().consultation_price(sel.tier);
    let label = match sel.tier {
        ConsultationTier::Standard => "Home consultation — walkthrough",
        ConsultationTier::Aerial => "Home consultation — aerial scan",
    };
    Priced::one_time(run(&[PricingOp::base(label, price)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quote_for(service: &str, bag: serde_json::Value) -> Quote {
        let catalog = CatalogStore::load().expect("load catalog");
        let id = crate::catalog::ServiceId::new(service);
        let def = catalog.service(&id).expect("known service").clone();
        let selections = ServiceSelections::parse(&id, &bag).expect("parse selections");
        CentralizedEngine.price(&catalog, &def, &selections).expect("price quote")
    }

    #[test]
    fn two_story_deep_clean_surcharge_rounds_per_line() {
        let quote = quote_for(
            "home_cleaning",
            json!({ "bedrooms": 3, "bathrooms": 2, "stories": 2, "cleanType": "deep" }),
        );
        assert_eq!(quote.line_items[0].amount, Decimal::from(269));
        assert_eq!(quote.line_items[1].amount, Decimal::from(40));
        assert_eq!(quote.total, Decimal::from(309));
    }

    #[test]
    fn recurring_monthly_clean_discounts_the_full_subtotal() {
        let quote = quote_for(
            "home_cleaning",
            json!({
                "bedrooms": 3, "bathrooms": 2, "stories": 2, "cleanType": "deep",
                "isRecurring": true, "frequency": "monthly"
            }),
        );
        assert_eq!(quote.subtotal, Decimal::from(309));
        assert_eq!(quote.discounts[0].amount, Decimal::from(15));
        assert_eq!(quote.total, Decimal::from(294));
        assert_eq!(quote.billing, BillingMode::Monthly);
    }

    #[test]
    fn two_junk_items_stay_below_the_volume_threshold() {
        let quote = quote_for(
            "junk_removal",
            json!({ "items": [{ "id": "sofa" }, { "id": "mattress_queen" }] }),
        );
        assert_eq!(quote.subtotal, Decimal::from(135));
        assert!(quote.discounts.is_empty());
        assert_eq!(quote.total, Decimal::from(135));
        assert!(!quote.minimum_applied);
    }

    #[test]
    fn empty_junk_selection_prices_the_minimum_load() {
        let quote = quote_for("junk_removal", json!({}));
        assert_eq!(quote.total, Decimal::from(99));
        assert!(!quote.minimum_applied);
    }

    #[test]
    fn single_small_junk_item_is_lifted_to_the_floor() {
        let quote = quote_for("junk_removal", json!({ "items": [{ "id": "microwave" }] }));
        assert_eq!(quote.subtotal, Decimal::from(20));
        assert_eq!(quote.total, Decimal::from(99));
        assert!(quote.minimum_applied);
    }

    #[test]
    fn brick_wall_tv_mount_adds_the_axis_delta() {
        let quote = quote_for(
            "handyman",
            json!({ "tasks": [{ "taskId": "tv_mount_small", "variables": { "wallType": "brick" } }] }),
        );
        assert_eq!(quote.total, Decimal::from(129));
    }

    #[test]
    fn three_tasks_earn_the_multi_task_discount() {
        let quote = quote_for(
            "handyman",
            json!({ "tasks": [
                { "taskId": "tv_mount_small" },
                { "taskId": "ceiling_fan_install" },
                { "taskId": "faucet_replace" }
            ]}),
        );
        // 89 + 119 + 109 = 317, minus 10%.
        assert_eq!(quote.subtotal, Decimal::from(317));
        assert_eq!(quote.discounts[0].amount, Decimal::from(32));
        assert_eq!(quote.total, Decimal::from(285));
    }

    #[test]
    fn small_pressure_wash_hits_the_minimum() {
        let quote = quote_for("pressure_washing", json!({ "squareFootage": 300 }));
        assert_eq!(quote.subtotal, Decimal::from(75));
        assert_eq!(quote.total, Decimal::from(120));
        assert!(quote.minimum_applied);
    }

    #[test]
    fn moving_labor_enforces_the_hour_floor() {
        let quote = quote_for("moving_labor", json!({ "hours": 0, "crewSize": 2 }));
        // One billable hour for a crew of two.
        assert_eq!(quote.total, Decimal::from(130));
    }

    #[test]
    fn pool_deep_clean_bills_one_time() {
        let quote = quote_for("pool_cleaning", json!({ "tier": "deep_clean" }));
        assert_eq!(quote.billing, BillingMode::OneTime);
        assert_eq!(quote.total, Decimal::from(249));
    }

    #[test]
    fn rush_surcharge_applies_after_flat_addons() {
        let quote = quote_for(
            "home_cleaning",
            json!({ "cleanType": "standard", "hasPets": true, "isRush": true }),
        );
        // 179 + 25 pets = 204, then 50% rush on the running subtotal.
        assert_eq!(quote.line_items.last().expect("rush line").amount, Decimal::from(102));
        assert_eq!(quote.total, Decimal::from(306));
    }
}
