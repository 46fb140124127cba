//! Discount evaluation: volume thresholds, recurring frequency percents,
//! multi-service carts, and the minimum-charge floor.

use rust_decimal::Decimal;

use crate::catalog::{DiscountTables, VolumeBand, VolumeThreshold};
use crate::domain::quote::DiscountLine;
use crate::domain::selection::Frequency;
use crate::pricing::ops::round_currency;

/// Pick the highest threshold the count meets. Thresholds never stack.
pub fn volume_percent(count: u32, thresholds: &[VolumeThreshold]) -> Decimal {
    thresholds
        .iter()
        .rev()
        .find(|t| count >= t.min_count)
        .map(|t| t.percent)
        .unwrap_or(Decimal::ZERO)
}

/// Volume discount line against a base subtotal, if any threshold is met.
pub fn volume_discount(
    label: impl Into<String>,
    count: u32,
    thresholds: &[VolumeThreshold],
    subtotal: Decimal,
) -> Option<DiscountLine> {
    let percent = volume_percent(count, thresholds);
    if percent == Decimal::ZERO || subtotal <= Decimal::ZERO {
        return None;
    }
    Some(DiscountLine {
        label: label.into(),
        percent,
        amount: round_currency(subtotal * percent),
    })
}

/// Recurring-service discount line against a base subtotal. Callers that pass
/// `is_recurring` without a frequency get the monthly rate.
pub fn recurring_discount(
    tables: &DiscountTables,
    frequency: Option<Frequency>,
    subtotal: Decimal,
) -> Option<DiscountLine> {
    if subtotal <= Decimal::ZERO {
        return None;
    }
    let frequency = frequency.unwrap_or(Frequency::Monthly);
    let percent = tables.recurring_percent(frequency);
    let label = match frequency {
        Frequency::Weekly => "Weekly recurring discount",
        Frequency::Biweekly => "Biweekly recurring discount",
        Frequency::Monthly => "Monthly recurring discount",
        Frequency::Quarterly => "Quarterly recurring discount",
    };
    Some(DiscountLine {
        label: label.to_string(),
        percent,
        amount: round_currency(subtotal * percent),
    })
}

/// Cart-level multi-service percent (distinct services booked together).
pub fn multi_service_percent(tables: &DiscountTables, service_count: u32) -> Decimal {
    volume_percent(service_count, &tables.multi_service)
}

/// B2B property-manager volume percent by monthly unit count.
pub fn pm_volume_percent(bands: &[VolumeBand], monthly_units: u32) -> Decimal {
    bands
        .iter()
        .find(|band| {
            monthly_units >= band.min_units
                && band.max_units.map_or(true, |max| monthly_units <= max)
        })
        .map(|band| band.percent)
        .unwrap_or(Decimal::ZERO)
}

/// Raise a positive total to the floor; a zero total stays zero.
pub fn apply_minimum(total: Decimal, minimum: Option<Decimal>) -> (Decimal, bool) {
    match minimum {
        Some(floor) if total > Decimal::ZERO && total < floor => (floor, true),
        _ => (total, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;

    #[test]
    fn highest_met_threshold_wins_and_never_stacks() {
        let catalog = CatalogStore::load().expect("load catalog");
        let table = &catalog.discounts().item_volume;
        assert_eq!(volume_percent(2, table), Decimal::ZERO);
        assert_eq!(volume_percent(3, table), Decimal::new(10, 2));
        assert_eq!(volume_percent(6, table), Decimal::new(15, 2));
        assert_eq!(volume_percent(11, table), Decimal::new(20, 2));
        assert_eq!(volume_percent(40, table), Decimal::new(20, 2));
    }

    #[test]
    fn six_items_discount_is_fifteen_percent_of_subtotal() {
        let catalog = CatalogStore::load().expect("load catalog");
        let line = volume_discount(
            "Volume discount",
            6,
            &catalog.discounts().item_volume,
            Decimal::from(620),
        )
        .expect("threshold met");
        assert_eq!(line.amount, Decimal::from(93));
    }

    #[test]
    fn recurring_without_frequency_defaults_to_monthly() {
        let catalog = CatalogStore::load().expect("load catalog");
        let line = recurring_discount(catalog.discounts(), None, Decimal::from(309))
            .expect("recurring discount applies");
        assert_eq!(line.percent, Decimal::new(5, 2));
        assert_eq!(line.amount, Decimal::from(15));
    }

    #[test]
    fn pm_volume_bands_cover_their_ranges() {
        let catalog = CatalogStore::load().expect("load catalog");
        let bands = &catalog.discounts().pm_volume;
        assert_eq!(pm_volume_percent(bands, 9), Decimal::ZERO);
        assert_eq!(pm_volume_percent(bands, 10), Decimal::new(5, 2));
        assert_eq!(pm_volume_percent(bands, 19), Decimal::new(5, 2));
        assert_eq!(pm_volume_percent(bands, 20), Decimal::new(10, 2));
        assert_eq!(pm_volume_percent(bands, 49), Decimal::new(10, 2));
        assert_eq!(pm_volume_percent(bands, 50), Decimal::new(15, 2));
        assert_eq!(pm_volume_percent(bands, 500), Decimal::new(15, 2));
    }

    #[test]
    fn minimum_floor_lifts_small_totals_only() {
        let floor = Some(Decimal::from(99));
        assert_eq!(apply_minimum(Decimal::from(45), floor), (Decimal::from(99), true));
        assert_eq!(apply_minimum(Decimal::from(99), floor), (Decimal::from(99), false));
        assert_eq!(apply_minimum(Decimal::from(135), floor), (Decimal::from(135), false));
        assert_eq!(apply_minimum(Decimal::ZERO, floor), (Decimal::ZERO, false));
        assert_eq!(apply_minimum(Decimal::from(45), None), (Decimal::from(45), false));
    }
}
