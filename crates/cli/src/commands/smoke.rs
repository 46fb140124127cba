use std::time::Instant;

use homequote_core::config::{AppConfig, LoadOptions};
use homequote_core::{
    CatalogStore, CentralizedEngine, LegacyCalculator, PricingService, PricingStrategy,
    QuoteResponse, ServiceId,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use crate::commands::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum SmokeStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct SmokeCheck {
    name: &'static str,
    status: SmokeStatus,
    elapsed_ms: u64,
    message: String,
}

#[derive(Debug, Serialize)]
struct SmokeReport {
    command: &'static str,
    status: SmokeStatus,
    summary: String,
    total_elapsed_ms: u64,
    checks: Vec<SmokeCheck>,
}

pub fn run() -> CommandResult {
    let started = Instant::now();
    let mut checks = Vec::new();

    match timed_check(|| AppConfig::load(LoadOptions::default())) {
        Ok((elapsed_ms, _config)) => checks.push(SmokeCheck {
            name: "config_validation",
            status: SmokeStatus::Pass,
            elapsed_ms,
            message: "configuration loaded and validated".to_string(),
        }),
        Err((elapsed_ms, error)) => {
            checks.push(SmokeCheck {
                name: "config_validation",
                status: SmokeStatus::Fail,
                elapsed_ms,
                message: error.to_string(),
            });
            checks.push(skipped("catalog_load"));
            checks.push(skipped("scenario_totals"));
            checks.push(skipped("engine_agreement"));
            return finalize_report(checks, started.elapsed().as_millis() as u64);
        }
    }

    let catalog = match timed_check(CatalogStore::load) {
        Ok((elapsed_ms, catalog)) => {
            checks.push(SmokeCheck {
                name: "catalog_load",
                status: SmokeStatus::Pass,
                elapsed_ms,
                message: format!(
                    "{} services, {} bundles",
                    catalog.services().len(),
                    catalog.bundles().len()
                ),
            });
            catalog
        }
        Err((elapsed_ms, error)) => {
            checks.push(SmokeCheck {
                name: "catalog_load",
                status: SmokeStatus::Fail,
                elapsed_ms,
                message: error.to_string(),
            });
            checks.push(skipped("scenario_totals"));
            checks.push(skipped("engine_agreement"));
            return finalize_report(checks, started.elapsed().as_millis() as u64);
        }
    };

    checks.push(scenario_totals(&catalog));
    checks.push(engine_agreement(&catalog));

    finalize_report(checks, started.elapsed().as_millis() as u64)
}

/// Canonical scenarios with known-good totals.
fn scenario_totals(catalog: &CatalogStore) -> SmokeCheck {
    let started = Instant::now();
    let api = PricingService::new(catalog);
    let scenarios = [
        ("gutter_cleaning", json!({}), Decimal::from(129)),
        (
            "junk_removal",
            json!({ "items": [
                { "id": "sectional" }, { "id": "hot_tub" }, { "id": "refrigerator" },
                { "id": "china_cabinet" }, { "id": "washer" }, { "id": "microwave" }
            ]}),
            Decimal::from(527),
        ),
        (
            "home_cleaning",
            json!({
                "bedrooms": 3, "bathrooms": 2, "stories": 2, "cleanType": "deep",
                "isRecurring": true, "frequency": "monthly"
            }),
            Decimal::from(294),
        ),
    ];
    let scenario_count = scenarios.len();

    for (service, bag, expected) in scenarios {
        let total = match api.calculate_quote(service, &bag) {
            QuoteResponse::Priced(quote) => quote.total,
            QuoteResponse::Unavailable(unavailable) => {
                return SmokeCheck {
                    name: "scenario_totals",
                    status: SmokeStatus::Fail,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                    message: format!("{service}: {}", unavailable.error),
                }
            }
        };
        if total != expected {
            return SmokeCheck {
                name: "scenario_totals",
                status: SmokeStatus::Fail,
                elapsed_ms: started.elapsed().as_millis() as u64,
                message: format!("{service}: expected {expected}, got {total}"),
            };
        }
    }

    SmokeCheck {
        name: "scenario_totals",
        status: SmokeStatus::Pass,
        elapsed_ms: started.elapsed().as_millis() as u64,
        message: format!("{scenario_count} canonical scenarios verified"),
    }
}

/// The current engine and the legacy calculator must agree on totals.
fn engine_agreement(catalog: &CatalogStore) -> SmokeCheck {
    use homequote_core::domain::selection::ServiceSelections;

    let started = Instant::now();
    let cases = [
        ("home_cleaning", json!({ "cleanType": "deep", "stories": 2 })),
        ("junk_removal", json!({ "loadSize": "half" })),
        ("moving_labor", json!({ "hours": 3, "crewSize": 2 })),
        ("landscaping", json!({ "planType": "full_service", "lotSize": "half" })),
    ];

    for (service, bag) in cases {
        let id = ServiceId::new(service);
        let Some(def) = catalog.service(&id) else {
            return SmokeCheck {
                name: "engine_agreement",
                status: SmokeStatus::Fail,
                elapsed_ms: started.elapsed().as_millis() as u64,
                message: format!("{service} missing from catalog"),
            };
        };
        let parsed = match ServiceSelections::parse(&id, &bag) {
            Ok(parsed) => parsed,
            Err(error) => {
                return SmokeCheck {
                    name: "engine_agreement",
                    status: SmokeStatus::Fail,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                    message: format!("{service}: {error}"),
                }
            }
        };
        let current = CentralizedEngine.price(catalog, def, &parsed);
        let legacy = LegacyCalculator.price(catalog, def, &parsed);
        match (current, legacy) {
            (Ok(current), Ok(legacy)) if current.total == legacy.total => {}
            (Ok(current), Ok(legacy)) => {
                return SmokeCheck {
                    name: "engine_agreement",
                    status: SmokeStatus::Fail,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                    message: format!(
                        "{service}: current {} != legacy {}",
                        current.total, legacy.total
                    ),
                }
            }
            (Err(error), _) | (_, Err(error)) => {
                return SmokeCheck {
                    name: "engine_agreement",
                    status: SmokeStatus::Fail,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                    message: format!("{service}: {error}"),
                }
            }
        }
    }

    SmokeCheck {
        name: "engine_agreement",
        status: SmokeStatus::Pass,
        elapsed_ms: started.elapsed().as_millis() as u64,
        message: "current and legacy paths agree on canonical inputs".to_string(),
    }
}

fn timed_check<T, E>(check: impl FnOnce() -> Result<T, E>) -> Result<(u64, T), (u64, E)> {
    let started = Instant::now();
    match check() {
        Ok(value) => Ok((started.elapsed().as_millis() as u64, value)),
        Err(error) => Err((started.elapsed().as_millis() as u64, error)),
    }
}

fn skipped(name: &'static str) -> SmokeCheck {
    SmokeCheck {
        name,
        status: SmokeStatus::Skipped,
        elapsed_ms: 0,
        message: "skipped due to previous failure".to_string(),
    }
}

fn finalize_report(checks: Vec<SmokeCheck>, total_elapsed_ms: u64) -> CommandResult {
    let passed = checks.iter().filter(|check| check.status == SmokeStatus::Pass).count();
    let total = checks.len();
    let failed = checks.iter().any(|check| check.status == SmokeStatus::Fail);

    let report = SmokeReport {
        command: "smoke",
        status: if failed { SmokeStatus::Fail } else { SmokeStatus::Pass },
        summary: format!("smoke: {passed}/{total} checks passed in {total_elapsed_ms}ms"),
        total_elapsed_ms,
        checks,
    };

    let human = report.summary.clone();
    let machine = serde_json::to_string(&report).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"smoke\",\"status\":\"fail\",\"summary\":\"serialization failed\",\"error\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    });

    CommandResult { exit_code: if failed { 6 } else { 0 }, output: format!("{human}\n{machine}") }
}
