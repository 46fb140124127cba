use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable identifier for a bookable service, e.g. `home_cleaning`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceId(pub String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingUnit {
    Flat,
    PerRoom,
    PerItem,
    PerTask,
    PerSqft,
    Hourly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub id: ServiceId,
    pub display_name: String,
    pub unit: PricingUnit,
    pub recurring_capable: bool,
    pub starting_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_charge: Option<Decimal>,
}

fn def(
    id: &str,
    display_name: &str,
    unit: PricingUnit,
    recurring_capable: bool,
    starting_price: i64,
    minimum_charge: Option<i64>,
) -> ServiceDefinition {
    ServiceDefinition {
        id: ServiceId::new(id),
        display_name: display_name.to_string(),
        unit,
        recurring_capable,
        starting_price: Decimal::from(starting_price),
        minimum_charge: minimum_charge.map(Decimal::from),
    }
}

pub(crate) fn service_definitions() -> Vec<ServiceDefinition> {
    vec![
        def("home_cleaning", "Home Cleaning", PricingUnit::Flat, true, 99, None),
        def("carpet_cleaning", "Carpet Cleaning", PricingUnit::PerRoom, true, 50, Some(100)),
        def("junk_removal", "Junk Removal", PricingUnit::PerItem, false, 99, Some(99)),
        def("handyman", "Handyman", PricingUnit::PerTask, false, 75, None),
        def("gutter_cleaning", "Gutter Cleaning", PricingUnit::Flat, false, 129, None),
        def("landscaping", "Landscaping", PricingUnit::Flat, true, 59, None),
        def("pool_cleaning", "Pool Cleaning", PricingUnit::Monthly, true, 99, None),
        def("pressure_washing", "Pressure Washing", PricingUnit::PerSqft, false, 120, Some(120)),
        def("moving_labor", "Moving Labor", PricingUnit::Hourly, false, 65, None),
        def("garage_cleanout", "Garage Cleanout", PricingUnit::Flat, false, 299, None),
        def("light_demolition", "Light Demolition", PricingUnit::Flat, false, 199, None),
        def("home_consultation", "Home Consultation", PricingUnit::Flat, false, 49, None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_ids_are_unique() {
        let defs = service_definitions();
        let mut ids: Vec<&str> = defs.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), defs.len());
    }

    #[test]
    fn starting_prices_are_positive() {
        for d in service_definitions() {
            assert!(d.starting_price > Decimal::ZERO, "{} has no starting price", d.id);
        }
    }
}
