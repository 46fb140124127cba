use rust_decimal::Decimal;

use crate::domain::selection::{ConsultationTier, GarageSize, LandscapePlan, LotSize, PoolTier};

#[derive(Debug, Clone)]
pub struct GutterRates {
    pub one_story: Decimal,
    pub one_story_large: Decimal,
    pub two_story: Decimal,
    pub two_story_large: Decimal,
    pub three_story: Decimal,
    /// Homes above this many linear feet of gutter take the `large` price.
    pub large_cutoff_feet: u32,
}

#[derive(Debug, Clone)]
pub struct LandscapeRates {
    pub one_time_mow_quarter: Decimal,
    pub one_time_mow_half: Decimal,
    pub cleanup: Decimal,
    pub mow_go_quarter: Decimal,
    pub mow_go_half: Decimal,
    pub full_service_quarter: Decimal,
    pub full_service_half: Decimal,
    pub premium_quarter: Decimal,
    pub premium_half: Decimal,
}

impl LandscapeRates {
    pub fn plan_price(&self, plan: LandscapePlan, lot: LotSize) -> Decimal {
        match (plan, lot) {
            (LandscapePlan::OneTimeMow, LotSize::Quarter) => self.one_time_mow_quarter,
            (LandscapePlan::OneTimeMow, LotSize::Half) => self.one_time_mow_half,
            (LandscapePlan::Cleanup, _) => self.cleanup,
            (LandscapePlan::MowGo, LotSize::Quarter) => self.mow_go_quarter,
            (LandscapePlan::MowGo, LotSize::Half) => self.mow_go_half,
            (LandscapePlan::FullService, LotSize::Quarter) => self.full_service_quarter,
            (LandscapePlan::FullService, LotSize::Half) => self.full_service_half,
            (LandscapePlan::Premium, LotSize::Quarter) => self.premium_quarter,
            (LandscapePlan::Premium, LotSize::Half) => self.premium_half,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PoolRates {
    pub basic_monthly: Decimal,
    pub standard_monthly: Decimal,
    pub full_service_monthly: Decimal,
    pub deep_clean: Decimal,
}

impl PoolRates {
    pub fn tier_price(&self, tier: PoolTier) -> Decimal {
        match tier {
            PoolTier::Basic => self.basic_monthly,
            PoolTier::Standard => self.standard_monthly,
            PoolTier::FullService => self.full_service_monthly,
            PoolTier::DeepClean => self.deep_clean,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GarageRates {
    pub small: Decimal,
    pub medium: Decimal,
    pub large: Decimal,
    pub xl: Decimal,
}

impl GarageRates {
    pub fn package_price(&self, size: GarageSize) -> Decimal {
        match size {
            GarageSize::Small => self.small,
            GarageSize::Medium => self.medium,
            GarageSize::Large => self.large,
            GarageSize::Xl => self.xl,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExteriorRates {
    pub gutter: GutterRates,
    pub pressure_per_sqft: Decimal,
    pub mover_hourly: Decimal,
    pub mover_minimum_hours: u32,
    pub landscape: LandscapeRates,
    pub pool: PoolRates,
    pub garage: GarageRates,
    pub demolition_flat: Decimal,
    pub consultation_standard: Decimal,
    pub consultation_aerial: Decimal,
}

impl ExteriorRates {
    pub fn consultation_price(&self, tier: ConsultationTier) -> Decimal {
        match tier {
            ConsultationTier::Standard => self.consultation_standard,
            ConsultationTier::Aerial => self.consultation_aerial,
        }
    }
}

pub(crate) fn exterior_rates() -> ExteriorRates {
    ExteriorRates {
        gutter: GutterRates {
            one_story: Decimal::from(129),
            one_story_large: Decimal::from(179),
            two_story: Decimal::from(199),
            two_story_large: Decimal::from(259),
            three_story: Decimal::from(350),
            large_cutoff_feet: 150,
        },
        pressure_per_sqft: Decimal::new(25, 2),
        mover_hourly: Decimal::from(65),
        mover_minimum_hours: 1,
        landscape: LandscapeRates {
            one_time_mow_quarter: Decimal::from(59),
            one_time_mow_half: Decimal::from(89),
            cleanup: Decimal::from(149),
            mow_go_quarter: Decimal::from(99),
            mow_go_half: Decimal::from(149),
            full_service_quarter: Decimal::from(159),
            full_service_half: Decimal::from(219),
            premium_quarter: Decimal::from(249),
            premium_half: Decimal::from(329),
        },
        pool: PoolRates {
            basic_monthly: Decimal::from(99),
            standard_monthly: Decimal::from(165),
            full_service_monthly: Decimal::from(210),
            deep_clean: Decimal::from(249),
        },
        garage: GarageRates {
            small: Decimal::from(299),
            medium: Decimal::from(499),
            large: Decimal::from(749),
            xl: Decimal::from(999),
        },
        demolition_flat: Decimal::from(199),
        consultation_standard: Decimal::from(49),
        consultation_aerial: Decimal::from(149),
    }
}
