use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::selection::{CarpetPackage, CarpetTier, CleanType};

/// One row of the cleaning matrix: prices for a bedroom/bathroom count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CleanTypePrices {
    pub standard: Decimal,
    pub deep: Decimal,
    pub move_out: Decimal,
}

impl CleanTypePrices {
    pub fn price(&self, clean_type: CleanType) -> Decimal {
        match clean_type {
            CleanType::Standard => self.standard,
            CleanType::Deep => self.deep,
            CleanType::MoveOut => self.move_out,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CleaningRates {
    matrix: Vec<(String, CleanTypePrices)>,
    pub default_key: &'static str,
    pub two_story_pct: Decimal,
    pub three_story_pct: Decimal,
    pub large_home_pct: Decimal,
    pub large_home_sqft: u32,
    pub neglected_pct: Decimal,
    pub pet_addon: Decimal,
    pub same_day_addon: Decimal,
}

impl CleaningRates {
    pub fn row(&self, key: &str) -> Option<&CleanTypePrices> {
        self.matrix.iter().find(|(k, _)| k == key).map(|(_, row)| row)
    }

    pub fn default_row(&self) -> &CleanTypePrices {
        self.row(self.default_key).expect("default cleaning row is seeded")
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &CleanTypePrices)> {
        self.matrix.iter().map(|(k, row)| (k.as_str(), row))
    }
}

fn row(key: &str, standard: i64, deep: i64, move_out: i64) -> (String, CleanTypePrices) {
    (
        key.to_string(),
        CleanTypePrices {
            standard: Decimal::from(standard),
            deep: Decimal::from(deep),
            move_out: Decimal::from(move_out),
        },
    )
}

pub(crate) fn cleaning_rates() -> CleaningRates {
    CleaningRates {
        matrix: vec![
            row("1-1", 99, 149, 179),
            row("2-1", 119, 179, 209),
            row("2-2", 139, 209, 249),
            row("3-1", 149, 224, 264),
            row("3-2", 179, 269, 319),
            row("3-3", 199, 299, 354),
            row("4-2", 209, 314, 369),
            row("4-3", 229, 344, 404),
            row("4-4", 249, 374, 439),
            row("5-3", 259, 389, 459),
            row("5-4", 299, 449, 529),
        ],
        default_key: "3-2",
        two_story_pct: Decimal::new(15, 2),
        three_story_pct: Decimal::new(25, 2),
        large_home_pct: Decimal::new(10, 2),
        large_home_sqft: 3000,
        neglected_pct: Decimal::new(20, 2),
        pet_addon: Decimal::from(25),
        same_day_addon: Decimal::from(30),
    }
}

#[derive(Debug, Clone)]
pub struct CarpetRates {
    pub room_standard: Decimal,
    pub room_deep: Decimal,
    pub room_pet: Decimal,
    pub hallway: Decimal,
    pub stair_flight: Decimal,
    pub scotchgard_room: Decimal,
    pub package_three_bedroom: Decimal,
    pub package_four_five_bedroom: Decimal,
}

impl CarpetRates {
    pub fn room_price(&self, tier: CarpetTier) -> Decimal {
        match tier {
            CarpetTier::Standard => self.room_standard,
            CarpetTier::Deep => self.room_deep,
            CarpetTier::Pet => self.room_pet,
        }
    }

    pub fn package_price(&self, package: CarpetPackage) -> Decimal {
        match package {
            CarpetPackage::ThreeBedroom => self.package_three_bedroom,
            CarpetPackage::FourFiveBedroom => self.package_four_five_bedroom,
        }
    }
}

pub(crate) fn carpet_rates() -> CarpetRates {
    CarpetRates {
        room_standard: Decimal::from(50),
        room_deep: Decimal::from(75),
        room_pet: Decimal::from(89),
        hallway: Decimal::from(25),
        stair_flight: Decimal::from(25),
        scotchgard_room: Decimal::from(20),
        package_three_bedroom: Decimal::from(129),
        package_four_five_bedroom: Decimal::from(215),
    }
}
