//! Tier resolution: pure lookups from normalized selections to base prices.
//!
//! Resolution never fails for a known service. Out-of-range counts are
//! clamped into the catalog's range and unknown matrix keys fall back to the
//! default row, so partial or odd input still yields a sane base price.

use rust_decimal::Decimal;

use crate::catalog::{CleanTypePrices, CleaningRates, GutterRates};

pub fn clamp_bedrooms(bedrooms: u8) -> u8 {
    bedrooms.clamp(1, 5)
}

pub fn clamp_bathrooms(bathrooms: u8) -> u8 {
    bathrooms.clamp(1, 4)
}

pub fn clamp_stories(stories: u8) -> u8 {
    stories.clamp(1, 3)
}

/// Resolve the cleaning matrix row for a home. Exact key first, then the
/// nearest seeded bathroom count for the same bedrooms, then the default row.
pub fn cleaning_row<'a>(rates: &'a CleaningRates, bedrooms: u8, bathrooms: u8) -> &'a CleanTypePrices {
    let bedrooms = clamp_bedrooms(bedrooms);
    let bathrooms = clamp_bathrooms(bathrooms);
    if let Some(row) = rates.row(&matrix_key(bedrooms, bathrooms)) {
        return row;
    }
    let nearest = rates
        .rows()
        .filter(|(key, _)| key.starts_with(&format!("{bedrooms}-")))
        .min_by_key(|(key, _)| {
            let baths: u8 = key[2..].parse().unwrap_or(u8::MAX);
            baths.abs_diff(bathrooms)
        });
    match nearest {
        Some((_, row)) => row,
        None => rates.default_row(),
    }
}

pub fn matrix_key(bedrooms: u8, bathrooms: u8) -> String {
    format!("{bedrooms}-{bathrooms}")
}

/// Resolve the gutter tier from stories and linear footage.
pub fn gutter_price(rates: &GutterRates, stories: u8, linear_feet: u32) -> (&'static str, Decimal) {
    let large = linear_feet > rates.large_cutoff_feet;
    match (clamp_stories(stories), large) {
        (1, false) => ("1-story", rates.one_story),
        (1, true) => ("1-story, large home", rates.one_story_large),
        (2, false) => ("2-story", rates.two_story),
        (2, true) => ("2-story, large home", rates.two_story_large),
        _ => ("3-story", rates.three_story),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;

    #[test]
    fn exact_matrix_key_resolves() {
        let catalog = CatalogStore::load().expect("load catalog");
        let row = cleaning_row(catalog.cleaning(), 3, 2);
        assert_eq!(row.deep, Decimal::from(269));
    }

    #[test]
    fn out_of_range_counts_are_clamped() {
        let catalog = CatalogStore::load().expect("load catalog");
        let row = cleaning_row(catalog.cleaning(), 9, 9);
        // Clamps to 5 bedrooms / 4 bathrooms.
        assert_eq!(row.standard, Decimal::from(299));
    }

    #[test]
    fn missing_bathroom_count_resolves_to_nearest_seeded_row() {
        let catalog = CatalogStore::load().expect("load catalog");
        // 5-1 is not seeded; 5-3 is the nearest five-bedroom row.
        let row = cleaning_row(catalog.cleaning(), 5, 1);
        assert_eq!(row.standard, Decimal::from(259));
    }

    #[test]
    fn default_gutter_selection_is_single_story_base() {
        let catalog = CatalogStore::load().expect("load catalog");
        let (label, price) = gutter_price(&catalog.exterior().gutter, 1, 150);
        assert_eq!(label, "1-story");
        assert_eq!(price, Decimal::from(129));
    }

    #[test]
    fn long_gutter_runs_take_the_large_tier() {
        let catalog = CatalogStore::load().expect("load catalog");
        let (label, price) = gutter_price(&catalog.exterior().gutter, 2, 180);
        assert_eq!(label, "2-story, large home");
        assert_eq!(price, Decimal::from(259));
    }
}
