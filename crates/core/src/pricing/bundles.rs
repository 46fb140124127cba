//! Bundle matching: overlap search plus the B2B property-manager volume
//! layer applied to the bundle price only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogStore, ServiceId};
use crate::pricing::discounts::pm_volume_percent;
use crate::pricing::ops::round_currency;

/// Property-manager context for B2B bundle pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct B2bContext {
    pub monthly_units: u32,
}

/// The volume layer on one matched bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeSavings {
    pub percent: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleMatch {
    pub id: String,
    pub name: String,
    pub description: String,
    pub services: Vec<ServiceId>,
    /// Which of the requested services this bundle covers.
    pub matched_services: Vec<ServiceId>,
    pub bundle_price: Decimal,
    pub alacarte_price: Decimal,
    pub bundle_savings: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_savings: Option<VolumeSavings>,
    pub total_savings: Decimal,
    pub final_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub requires_multiple_pros: bool,
}

/// Match bundles by non-empty intersection with the requested services.
/// Matches with wider coverage and larger savings sort first.
pub fn match_bundles(
    catalog: &CatalogStore,
    requested: &[ServiceId],
    b2b: Option<B2bContext>,
) -> Vec<BundleMatch> {
    let volume_pct = b2b
        .map(|ctx| pm_volume_percent(&catalog.discounts().pm_volume, ctx.monthly_units))
        .unwrap_or(Decimal::ZERO);

    let mut matches: Vec<BundleMatch> = catalog
        .bundles()
        .iter()
        .filter_map(|bundle| {
            let matched: Vec<ServiceId> = bundle
                .services
                .iter()
                .filter(|s| requested.contains(s))
                .cloned()
                .collect();
            if matched.is_empty() {
                return None;
            }

            let volume_savings = (volume_pct > Decimal::ZERO).then(|| VolumeSavings {
                percent: volume_pct,
                amount: round_currency(bundle.bundle_price * volume_pct),
            });
            let volume_amount =
                volume_savings.as_ref().map(|v| v.amount).unwrap_or(Decimal::ZERO);

            Some(BundleMatch {
                id: bundle.id.clone(),
                name: bundle.name.clone(),
                description: bundle.description.clone(),
                services: bundle.services.clone(),
                matched_services: matched,
                bundle_price: bundle.bundle_price,
                alacarte_price: bundle.alacarte_price,
                bundle_savings: bundle.savings,
                volume_savings,
                total_savings: bundle.savings + volume_amount,
                final_price: bundle.bundle_price - volume_amount,
                badge: bundle.badge.clone(),
                requires_multiple_pros: bundle.requires_multiple_pros,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.matched_services
            .len()
            .cmp(&a.matched_services.len())
            .then(b.total_savings.cmp(&a.total_savings))
    });
    matches
}
