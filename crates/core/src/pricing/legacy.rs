//! The legacy pricing path: straight-line per-service arithmetic kept as a
//! parallel, independently correct calculator. It reads the same catalog as
//! the current engine and must agree with it on canonical inputs, but it
//! accumulates a running total directly and reports a coarse breakdown
//! (one consolidated line per job) instead of the current engine's
//! fine-grained ops.

use rust_decimal::Decimal;

use crate::catalog::{CatalogStore, ItemCatalog, ServiceDefinition};
use crate::domain::quote::{BillingMode, DiscountLine, LineItem, Quote, QuoteSource};
use crate::domain::selection::{
    CarpetPackage, CarpetTier, CleanType, Frequency, LandscapePlan, LoadSize, LotSize,
    ServiceSelections,
};
use crate::errors::PricingError;
use crate::pricing::ops::{apply_modifiers, round_currency};
use crate::pricing::{discounts, tiers, PricingStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCalculator;

impl PricingStrategy for LegacyCalculator {
    fn source(&self) -> QuoteSource {
        QuoteSource::Legacy
    }

    fn price(
        &self,
        catalog: &CatalogStore,
        service: &ServiceDefinition,
        selections: &ServiceSelections,
    ) -> Result<Quote, PricingError> {
        let (label, subtotal, discount, billing) = calculate(catalog, selections)?;
        let discounts_vec: Vec<DiscountLine> = discount.into_iter().collect();
        let discount_total: Decimal = discounts_vec.iter().map(|d| d.amount).sum();
        let (total, minimum_applied) =
            discounts::apply_minimum(subtotal - discount_total, service.minimum_charge);
        Ok(Quote {
            service_id: service.id.clone(),
            service_name: service.display_name.clone(),
            line_items: vec![LineItem::flat(label, subtotal)],
            discounts: discounts_vec,
            subtotal,
            total,
            minimum_applied,
            billing,
            crew: None,
            source: QuoteSource::Legacy,
        })
    }
}

type Calculated = (String, Decimal, Option<DiscountLine>, BillingMode);

fn calculate(
    catalog: &CatalogStore,
    selections: &ServiceSelections,
) -> Result<Calculated, PricingError> {
    let rush_pct = catalog.discounts().rush_pct;
    match selections {
        ServiceSelections::Cleaning(sel) => {
            let rates = catalog.cleaning();
            let bedrooms = tiers::clamp_bedrooms(sel.bedrooms);
            let bathrooms = tiers::clamp_bathrooms(sel.bathrooms);
            let stories = tiers::clamp_stories(sel.stories);
            let mut total = tiers::cleaning_row(rates, bedrooms, bathrooms).price(sel.clean_type);
            if stories == 2 {
                total += round_currency(total * rates.two_story_pct);
            } else if stories == 3 {
                total += round_currency(total * rates.three_story_pct);
            }
            if sel.square_footage.is_some_and(|sqft| sqft >= rates.large_home_sqft) {
                total += round_currency(total * rates.large_home_pct);
            }
            if sel.last_cleaned.is_some_and(|l| l.is_neglected()) {
                total += round_currency(total * rates.neglected_pct);
            }
            if sel.has_pets {
                total += rates.pet_addon;
            }
            if sel.same_day {
                total += rates.same_day_addon;
            }
            if sel.is_rush {
                total += round_currency(total * rush_pct);
            }
            let type_label = match sel.clean_type {
                CleanType::Standard => "standard",
                CleanType::Deep => "deep",
                CleanType::MoveOut => "move-out",
            };
            let label =
                format!("Home cleaning ({type_label}, {bedrooms}BR/{bathrooms}BA, {stories}-story)");
            let (discount, billing) = if sel.is_recurring {
                (recurring_line(catalog, sel.frequency, total), BillingMode::Monthly)
            } else {
                (None, BillingMode::OneTime)
            };
            Ok((label, total, discount, billing))
        }
        ServiceSelections::Carpet(sel) => {
            let rates = catalog.carpet();
            let mut total = match sel.package {
                Some(CarpetPackage::ThreeBedroom) => rates.package_three_bedroom,
                Some(CarpetPackage::FourFiveBedroom) => rates.package_four_five_bedroom,
                None => {
                    round_currency(rates.room_price(sel.tier) * Decimal::from(sel.rooms))
                }
            };
            total += round_currency(rates.hallway * Decimal::from(sel.hallways));
            total += round_currency(rates.stair_flight * Decimal::from(sel.stair_flights));
            total += round_currency(rates.scotchgard_room * Decimal::from(sel.scotchgard_rooms));
            if sel.is_rush && total > Decimal::ZERO {
                total += round_currency(total * rush_pct);
            }
            let tier_label = match sel.tier {
                CarpetTier::Standard => "standard",
                CarpetTier::Deep => "deep",
                CarpetTier::Pet => "pet treatment",
            };
            let (discount, billing) = if sel.is_recurring {
                (recurring_line(catalog, sel.frequency, total), BillingMode::Monthly)
            } else {
                (None, BillingMode::OneTime)
            };
            Ok((format!("Carpet cleaning ({tier_label})"), total, discount, billing))
        }
        ServiceSelections::Junk(sel) => {
            let items = catalog.items();
            if sel.items.is_empty() {
                let size = sel.load_size.unwrap_or(LoadSize::Minimum);
                let mut total = items.load_price(size);
                if sel.is_rush {
                    total += round_currency(total * rush_pct);
                }
                return Ok((
                    format!("Junk removal ({})", ItemCatalog::load_label(size)),
                    total,
                    None,
                    BillingMode::OneTime,
                ));
            }
            let mut total = Decimal::ZERO;
            let mut count = 0u32;
            for pick in &sel.items {
                let item = items.item(&pick.id).ok_or_else(|| PricingError::MissingRow {
                    service: "junk_removal".to_string(),
                    key: pick.id.clone(),
                })?;
                total += round_currency(item.price * Decimal::from(pick.quantity));
                count = count.saturating_add(pick.quantity);
            }
            if sel.is_rush {
                total += round_currency(total * rush_pct);
            }
            let discount = discounts::volume_discount(
                format!("Volume discount ({count} items)"),
                count,
                &catalog.discounts().item_volume,
                total,
            );
            Ok((format!("Junk removal ({count} items)"), total, discount, BillingMode::OneTime))
        }
        ServiceSelections::Handyman(sel) => {
            let tasks = catalog.tasks();
            if sel.tasks.is_empty() {
                let hours = sel.hours.unwrap_or(tasks.minimum_hours).max(tasks.minimum_hours);
                let total = round_currency(tasks.hourly_rate * Decimal::from(hours));
                return Ok((
                    format!("Handyman labor ({hours} hr)"),
                    total,
                    None,
                    BillingMode::OneTime,
                ));
            }
            let mut total = Decimal::ZERO;
            for pick in &sel.tasks {
                let task = tasks.task(&pick.task_id).ok_or_else(|| PricingError::MissingRow {
                    service: "handyman".to_string(),
                    key: pick.task_id.clone(),
                })?;
                let unit = apply_modifiers(task.base_price, &task.variables, &pick.variables);
                total += round_currency(unit * Decimal::from(pick.quantity));
            }
            if sel.is_rush {
                total += round_currency(total * rush_pct);
            }
            let task_count = sel.tasks.len() as u32;
            let discount = discounts::volume_discount(
                format!("Multi-task discount ({task_count} tasks)"),
                task_count,
                &catalog.discounts().task_volume,
                total,
            );
            Ok((
                format!("Handyman ({task_count} tasks)"),
                total,
                discount,
                BillingMode::OneTime,
            ))
        }
        ServiceSelections::Gutter(sel) => {
            let (tier, price) =
                tiers::gutter_price(&catalog.exterior().gutter, sel.stories, sel.linear_feet);
            Ok((format!("Gutter cleaning ({tier})"), price, None, BillingMode::OneTime))
        }
        ServiceSelections::Landscaping(sel) => {
            let price = catalog.exterior().landscape.plan_price(sel.plan_type, sel.lot_size);
            let plan = match sel.plan_type {
                LandscapePlan::OneTimeMow => "one-time mow",
                LandscapePlan::Cleanup => "cleanup",
                LandscapePlan::MowGo => "mow & go",
                LandscapePlan::FullService => "full service",
                LandscapePlan::Premium => "premium",
            };
            let lot = match sel.lot_size {
                LotSize::Quarter => "1/4 acre",
                LotSize::Half => "1/2 acre",
            };
            let billing = if sel.plan_type.is_monthly() {
                BillingMode::Monthly
            } else {
                BillingMode::OneTime
            };
            Ok((format!("Landscaping ({plan}, {lot})"), price, None, billing))
        }
        ServiceSelections::Pool(sel) => {
            let price = catalog.exterior().pool.tier_price(sel.tier);
            let billing =
                if sel.tier.is_monthly() { BillingMode::Monthly } else { BillingMode::OneTime };
            Ok(("Pool cleaning".to_string(), price, None, billing))
        }
        ServiceSelections::Pressure(sel) => {
            let rates = catalog.exterior();
            let total =
                round_currency(rates.pressure_per_sqft * Decimal::from(sel.square_footage));
            Ok((
                format!("Pressure washing ({} sqft)", sel.square_footage),
                total,
                None,
                BillingMode::OneTime,
            ))
        }
        ServiceSelections::Moving(sel) => {
            let rates = catalog.exterior();
            let hours = sel.hours.max(rates.mover_minimum_hours);
            let crew = sel.crew_size.max(1);
            let mut total =
                round_currency(rates.mover_hourly * Decimal::from(hours.saturating_mul(crew)));
            if sel.is_rush {
                total += round_currency(total * rush_pct);
            }
            Ok((
                format!("Moving labor ({crew} pros, {hours} hr)"),
                total,
                None,
                BillingMode::OneTime,
            ))
        }
        ServiceSelections::Garage(sel) => {
            let price = catalog.exterior().garage.package_price(sel.size);
            Ok(("Garage cleanout".to_string(), price, None, BillingMode::OneTime))
        }
        ServiceSelections::Demolition(_) => Ok((
            "Light demolition".to_string(),
            catalog.exterior().demolition_flat,
            None,
            BillingMode::OneTime,
        )),
        ServiceSelections::Consultation(sel) => Ok((
            "Home consultation".to_string(),
            catalog.exterior().consultation_price(sel.tier),
            None,
            BillingMode::OneTime,
        )),
    }
}

fn recurring_line(
    catalog: &CatalogStore,
    frequency: Option<Frequency>,
    subtotal: Decimal,
) -> Option<DiscountLine> {
    discounts::recurring_discount(catalog.discounts(), frequency, subtotal)
}
