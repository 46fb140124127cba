use homequote_core::{B2bContext, PricingService};

use crate::commands::{load_catalog, CommandResult};

pub fn run(services: &[String], pm_units: Option<u32>) -> CommandResult {
    if services.is_empty() {
        return CommandResult::failure(
            "bundles",
            "invalid_request",
            "at least one service id is required",
            2,
        );
    }
    let catalog = match load_catalog("bundles") {
        Ok(catalog) => catalog,
        Err(result) => return *result,
    };
    let api = PricingService::new(&catalog);
    let b2b = pm_units.map(|monthly_units| B2bContext { monthly_units });
    let response = api.bundle_options(services, b2b);
    let message = if response.bundle_count == 0 {
        "no bundles cover the requested services".to_string()
    } else {
        format!("{} matching bundle(s)", response.bundle_count)
    };
    let data = match serde_json::to_value(&response) {
        Ok(data) => data,
        Err(error) => {
            return CommandResult::failure("bundles", "serialization", error.to_string(), 1)
        }
    };
    CommandResult::success_with_data("bundles", message, Some(data))
}
