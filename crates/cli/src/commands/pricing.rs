use homequote_core::{PricingService, PricingSummaryResponse};

use crate::commands::{load_catalog, CommandResult};

pub fn run(service_id: &str) -> CommandResult {
    let catalog = match load_catalog("pricing") {
        Ok(catalog) => catalog,
        Err(result) => return *result,
    };
    let api = PricingService::new(&catalog);
    match api.service_pricing(service_id) {
        PricingSummaryResponse::Summary(summary) => {
            let data = match serde_json::to_value(&summary) {
                Ok(data) => data,
                Err(error) => {
                    return CommandResult::failure("pricing", "serialization", error.to_string(), 1)
                }
            };
            CommandResult::success_with_data(
                "pricing",
                format!("pricing detail for {service_id}"),
                Some(data),
            )
        }
        PricingSummaryResponse::Error(err) => {
            CommandResult::failure("pricing", "unknown_service", err.error, 3)
        }
    }
}
