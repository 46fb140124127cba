use chrono::Utc;
use homequote_core::{
    AppConfig, EnginePreference, LegacyCalculator, LoadOptions, PricingService, QuoteResponse,
};
use serde_json::{json, Value};

use crate::commands::{load_catalog, CommandResult};

pub fn run(service_id: &str, selections: Option<&str>) -> CommandResult {
    let bag: Value = match selections {
        Some(raw) => match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(error) => {
                return CommandResult::failure(
                    "quote",
                    "invalid_selections",
                    format!("selections must be a JSON object: {error}"),
                    2,
                )
            }
        },
        None => Value::Null,
    };

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("quote", "config_validation", error.to_string(), 2)
        }
    };
    let catalog = match load_catalog("quote") {
        Ok(catalog) => catalog,
        Err(result) => return *result,
    };

    let response = match config.pricing.engine {
        EnginePreference::Current => {
            PricingService::new(&catalog).calculate_quote(service_id, &bag)
        }
        EnginePreference::Legacy => PricingService::with_strategy(&catalog, LegacyCalculator)
            .calculate_quote(service_id, &bag),
    };

    match response {
        QuoteResponse::Priced(quote) => {
            let serialized = match serde_json::to_value(&quote) {
                Ok(value) => value,
                Err(error) => {
                    return CommandResult::failure("quote", "serialization", error.to_string(), 1)
                }
            };
            let data = json!({
                "quote": serialized,
                "formatted_total": quote.formatted_total(),
                "currency": config.pricing.currency_code,
                "generated_at": Utc::now().to_rfc3339(),
            });
            CommandResult::success_with_data(
                "quote",
                format!("{}: {}", quote.service_name, quote.formatted_total()),
                Some(data),
            )
        }
        QuoteResponse::Unavailable(unavailable) => {
            CommandResult::failure("quote", "pricing_unavailable", unavailable.error, 4)
        }
    }
}
