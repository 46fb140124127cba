use homequote_core::PricingService;

use crate::commands::{load_catalog, CommandResult};

pub fn run() -> CommandResult {
    let catalog = match load_catalog("services") {
        Ok(catalog) => catalog,
        Err(result) => return *result,
    };
    let api = PricingService::new(&catalog);
    let services = api.all_services();
    let data = match serde_json::to_value(&services) {
        Ok(data) => data,
        Err(error) => {
            return CommandResult::failure("services", "serialization", error.to_string(), 1)
        }
    };
    CommandResult::success_with_data(
        "services",
        format!("{} bookable services", services.len()),
        Some(data),
    )
}
