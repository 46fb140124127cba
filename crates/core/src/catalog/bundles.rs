use rust_decimal::Decimal;
use serde::Serialize;

use super::services::ServiceId;
use crate::domain::selection::Frequency;

/// A named multi-service package sold at a fixed price below the à-la-carte
/// reference total. `savings` is stored redundantly and verified at load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundlePackage {
    pub id: String,
    pub name: String,
    pub description: String,
    pub services: Vec<ServiceId>,
    pub bundle_price: Decimal,
    pub alacarte_price: Decimal,
    pub savings: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub requires_multiple_pros: bool,
}

/// A volume threshold: carts/jobs with at least `min_count` units get
/// `percent` off. The highest qualifying threshold wins outright.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeThreshold {
    pub min_count: u32,
    pub percent: Decimal,
}

/// A B2B property-manager band over monthly unit count. The top band is
/// open-ended (`max_units: None`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeBand {
    pub min_units: u32,
    pub max_units: Option<u32>,
    pub percent: Decimal,
}

#[derive(Debug, Clone)]
pub struct DiscountTables {
    pub item_volume: Vec<VolumeThreshold>,
    pub task_volume: Vec<VolumeThreshold>,
    pub multi_service: Vec<VolumeThreshold>,
    pub pm_volume: Vec<VolumeBand>,
    pub rush_pct: Decimal,
}

impl DiscountTables {
    pub fn recurring_percent(&self, frequency: Frequency) -> Decimal {
        match frequency {
            Frequency::Weekly => Decimal::new(15, 2),
            Frequency::Biweekly => Decimal::new(10, 2),
            Frequency::Monthly => Decimal::new(5, 2),
            Frequency::Quarterly => Decimal::new(3, 2),
        }
    }
}

fn threshold(min_count: u32, percent_hundredths: i64) -> VolumeThreshold {
    VolumeThreshold { min_count, percent: Decimal::new(percent_hundredths, 2) }
}

pub(crate) fn discount_tables() -> DiscountTables {
    DiscountTables {
        item_volume: vec![threshold(3, 10), threshold(6, 15), threshold(11, 20)],
        task_volume: vec![threshold(3, 10)],
        multi_service: vec![threshold(3, 10), threshold(5, 15)],
        pm_volume: vec![
            VolumeBand { min_units: 10, max_units: Some(19), percent: Decimal::new(5, 2) },
            VolumeBand { min_units: 20, max_units: Some(49), percent: Decimal::new(10, 2) },
            VolumeBand { min_units: 50, max_units: None, percent: Decimal::new(15, 2) },
        ],
        rush_pct: Decimal::new(50, 2),
    }
}

#[allow(clippy::too_many_arguments)]
fn bundle(
    id: &str,
    name: &str,
    description: &str,
    services: &[&str],
    bundle_price: i64,
    alacarte_price: i64,
    badge: Option<&str>,
    requires_multiple_pros: bool,
) -> BundlePackage {
    let bundle_price = Decimal::from(bundle_price);
    let alacarte_price = Decimal::from(alacarte_price);
    BundlePackage {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        services: services.iter().map(|s| ServiceId::new(*s)).collect(),
        bundle_price,
        alacarte_price,
        savings: alacarte_price - bundle_price,
        badge: badge.map(str::to_string),
        requires_multiple_pros,
    }
}

pub(crate) fn bundle_packages() -> Vec<BundlePackage> {
    vec![
        bundle(
            "refresh",
            "The Refresh",
            "Quick cleanup + deep clean combo",
            &["junk_removal", "home_cleaning"],
            179,
            198,
            None,
            false,
        ),
        bundle(
            "curb_appeal",
            "Curb Appeal",
            "Exterior refresh package",
            &["pressure_washing", "gutter_cleaning"],
            239,
            269,
            None,
            false,
        ),
        bundle(
            "curb_appeal_plus",
            "Curb Appeal+",
            "Full exterior with lawn maintenance",
            &["pressure_washing", "gutter_cleaning", "landscaping"],
            298,
            348,
            None,
            false,
        ),
        bundle(
            "move_out",
            "The Move-Out",
            "Complete home inspection, cleanout, deep clean, and exterior wash",
            &["home_consultation", "junk_removal", "home_cleaning", "pressure_washing"],
            449,
            517,
            Some("PM Anchor Offer"),
            true,
        ),
        bundle(
            "move_out_plus",
            "Move-Out+",
            "Tenant turnover with carpet cleaning",
            &["home_cleaning", "junk_removal", "carpet_cleaning"],
            499,
            597,
            Some("PM Favorite"),
            false,
        ),
        bundle(
            "full_reset",
            "The Full Reset",
            "Complete home transformation - inspection, cleanout, deep clean, pressure wash, and gutters",
            &[
                "home_consultation",
                "junk_removal",
                "home_cleaning",
                "pressure_washing",
                "gutter_cleaning",
            ],
            569,
            666,
            Some("Best Value"),
            true,
        ),
        bundle(
            "full_reset_plus",
            "Full Reset+",
            "Complete PM turnover with all services",
            &[
                "home_cleaning",
                "junk_removal",
                "pressure_washing",
                "landscaping",
                "carpet_cleaning",
            ],
            829,
            1016,
            Some("Complete Package"),
            true,
        ),
        bundle(
            "splash_ready",
            "Splash Ready",
            "Pool cleaning and patio pressure wash",
            &["pool_cleaning", "pressure_washing"],
            224,
            249,
            None,
            false,
        ),
        bundle(
            "fresh_start",
            "Fresh Start",
            "New move-in cleaning package",
            &["home_cleaning", "carpet_cleaning"],
            223,
            248,
            None,
            false,
        ),
        bundle(
            "hoa_blitz",
            "HOA Blitz",
            "HOA compliance package",
            &["landscaping", "pressure_washing", "gutter_cleaning", "home_consultation"],
            319,
            397,
            Some("HOA Approved"),
            false,
        ),
        bundle(
            "seasonal_reset",
            "Seasonal Reset",
            "Seasonal prep for pool and exterior",
            &["landscaping", "pool_cleaning", "pressure_washing"],
            549,
            638,
            None,
            false,
        ),
        bundle(
            "home_ready",
            "HomeReady",
            "Move-in package with setup and cleaning",
            &["handyman", "home_cleaning"],
            138,
            148,
            None,
            false,
        ),
        bundle(
            "quick_fix",
            "QuickFix",
            "Handyman + junk removal combo",
            &["handyman", "junk_removal"],
            138,
            148,
            None,
            false,
        ),
        bundle(
            "setup_crew",
            "SetUp Crew",
            "Moving labor + handyman for full setup",
            &["moving_labor", "handyman"],
            249,
            280,
            Some("Move-In Special"),
            true,
        ),
        bundle(
            "fix_and_shine",
            "Fix & Shine",
            "Repairs, cleaning, and exterior refresh",
            &["handyman", "home_cleaning", "pressure_washing"],
            248,
            268,
            Some("Property Manager Favorite"),
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bundle_savings_matches_the_identity() {
        for b in bundle_packages() {
            assert_eq!(b.savings, b.alacarte_price - b.bundle_price, "bundle {}", b.id);
            assert!(b.savings > Decimal::ZERO, "bundle {} saves nothing", b.id);
        }
    }

    #[test]
    fn bundle_table_carries_the_full_lineup() {
        let bundles = bundle_packages();
        assert_eq!(bundles.len(), 15);

        let by_id = |id: &str| {
            bundles.iter().find(|b| b.id == id).unwrap_or_else(|| panic!("bundle {id} seeded"))
        };

        let full_reset = by_id("full_reset");
        assert_eq!(
            full_reset.services,
            [
                "home_consultation",
                "junk_removal",
                "home_cleaning",
                "pressure_washing",
                "gutter_cleaning"
            ]
            .map(ServiceId::new)
        );
        assert_eq!(full_reset.bundle_price, Decimal::from(569));
        assert_eq!(full_reset.savings, Decimal::from(97));

        let move_out_plus = by_id("move_out_plus");
        assert_eq!(
            move_out_plus.services,
            ["home_cleaning", "junk_removal", "carpet_cleaning"].map(ServiceId::new)
        );
        assert!(!move_out_plus.requires_multiple_pros);

        let hoa_blitz = by_id("hoa_blitz");
        assert_eq!(hoa_blitz.services.len(), 4);
        assert!(hoa_blitz.services.contains(&ServiceId::new("home_consultation")));
        assert_eq!(hoa_blitz.badge.as_deref(), Some("HOA Approved"));

        let setup_crew = by_id("setup_crew");
        assert!(setup_crew.services.contains(&ServiceId::new("moving_labor")));
        assert_eq!(setup_crew.savings, Decimal::from(31));
        assert!(setup_crew.requires_multiple_pros);

        for id in ["full_reset_plus", "seasonal_reset", "home_ready", "quick_fix", "fix_and_shine"]
        {
            by_id(id);
        }
    }

    #[test]
    fn recurring_percents_strictly_descend_with_frequency() {
        let tables = discount_tables();
        let weekly = tables.recurring_percent(Frequency::Weekly);
        let biweekly = tables.recurring_percent(Frequency::Biweekly);
        let monthly = tables.recurring_percent(Frequency::Monthly);
        let quarterly = tables.recurring_percent(Frequency::Quarterly);
        assert!(weekly > biweekly && biweekly > monthly && monthly > quarterly);
    }

    #[test]
    fn pm_volume_top_band_is_open_ended() {
        let tables = discount_tables();
        assert!(tables.pm_volume.last().expect("pm bands seeded").max_units.is_none());
    }
}
