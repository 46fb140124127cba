//! The immutable service catalog: definitions, rate tables, item and task
//! catalogs, bundles, and discount tables.
//!
//! A `CatalogStore` is constructed once with [`CatalogStore::load`], validated
//! fail-fast, and injected by reference everywhere prices are computed. No
//! component reads catalog data from anywhere else.

mod bundles;
mod exterior;
mod interior;
mod items;
mod services;
mod tasks;

use std::collections::HashSet;

use tracing::info;

pub use bundles::{BundlePackage, DiscountTables, VolumeBand, VolumeThreshold};
pub use exterior::{ExteriorRates, GarageRates, GutterRates, LandscapeRates, PoolRates};
pub use interior::{CarpetRates, CleanTypePrices, CleaningRates};
pub use items::{ItemCatalog, ItemCategory, JunkItem};
pub use services::{PricingUnit, ServiceDefinition, ServiceId};
pub use tasks::{HandymanTask, TaskCatalog, TaskVariable, VariableOption};

use crate::errors::CatalogError;

#[derive(Debug, Clone)]
pub struct CatalogStore {
    services: Vec<ServiceDefinition>,
    cleaning: CleaningRates,
    carpet: CarpetRates,
    exterior: ExteriorRates,
    items: ItemCatalog,
    tasks: TaskCatalog,
    bundles: Vec<BundlePackage>,
    discounts: DiscountTables,
}

impl CatalogStore {
    /// Build and validate the catalog. Quoting must not start if this fails.
    pub fn load() -> Result<Self, CatalogError> {
        let store = Self {
            services: services::service_definitions(),
            cleaning: interior::cleaning_rates(),
            carpet: interior::carpet_rates(),
            exterior: exterior::exterior_rates(),
            items: items::item_catalog(),
            tasks: tasks::task_catalog(),
            bundles: bundles::bundle_packages(),
            discounts: bundles::discount_tables(),
        };
        store.validate()?;
        info!(
            services = store.services.len(),
            bundles = store.bundles.len(),
            "catalog loaded"
        );
        Ok(store)
    }

    pub fn service(&self, id: &ServiceId) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| &s.id == id)
    }

    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn cleaning(&self) -> &CleaningRates {
        &self.cleaning
    }

    pub fn carpet(&self) -> &CarpetRates {
        &self.carpet
    }

    pub fn exterior(&self) -> &ExteriorRates {
        &self.exterior
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    pub fn tasks(&self) -> &TaskCatalog {
        &self.tasks
    }

    pub fn bundles(&self) -> &[BundlePackage] {
        &self.bundles
    }

    pub fn discounts(&self) -> &DiscountTables {
        &self.discounts
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for service in &self.services {
            if !seen.insert(service.id.as_str()) {
                return Err(CatalogError::DuplicateService(service.id.to_string()));
            }
        }

        for bundle in &self.bundles {
            if bundle.savings != bundle.alacarte_price - bundle.bundle_price {
                return Err(CatalogError::BundleSavingsMismatch {
                    bundle: bundle.id.clone(),
                    bundle_price: bundle.bundle_price,
                    alacarte: bundle.alacarte_price,
                    savings: bundle.savings,
                });
            }
            for service in &bundle.services {
                if !seen.contains(service.as_str()) {
                    return Err(CatalogError::UnknownBundleService {
                        bundle: bundle.id.clone(),
                        service: service.to_string(),
                    });
                }
            }
        }

        for (name, table) in [
            ("item_volume", &self.discounts.item_volume),
            ("task_volume", &self.discounts.task_volume),
            ("multi_service", &self.discounts.multi_service),
        ] {
            validate_thresholds(name, table)?;
        }
        validate_pm_bands(&self.discounts.pm_volume)?;
        Ok(())
    }
}

fn validate_thresholds(name: &str, table: &[VolumeThreshold]) -> Result<(), CatalogError> {
    let ascending = table
        .windows(2)
        .all(|w| w[0].min_count < w[1].min_count && w[0].percent < w[1].percent);
    if table.is_empty() || !ascending {
        return Err(CatalogError::MalformedDiscountTable {
            table: name.to_string(),
            reason: "thresholds must be non-empty and strictly ascending".to_string(),
        });
    }
    Ok(())
}

fn validate_pm_bands(bands: &[VolumeBand]) -> Result<(), CatalogError> {
    for pair in bands.windows(2) {
        let upper = pair[0].max_units.ok_or_else(|| CatalogError::MalformedDiscountTable {
            table: "pm_volume".to_string(),
            reason: "only the last band may be open-ended".to_string(),
        })?;
        if upper + 1 != pair[1].min_units || pair[0].percent >= pair[1].percent {
            return Err(CatalogError::MalformedDiscountTable {
                table: "pm_volume".to_string(),
                reason: "bands must be contiguous with ascending percents".to_string(),
            });
        }
    }
    match bands.last() {
        Some(last) if last.max_units.is_none() => Ok(()),
        _ => Err(CatalogError::MalformedDiscountTable {
            table: "pm_volume".to_string(),
            reason: "top band must be open-ended".to_string(),
        }),
    }
}
