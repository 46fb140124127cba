pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "homequote",
    about = "Homequote pricing CLI",
    long_about = "Browse the service catalog, inspect per-service pricing, calculate quotes, match bundles, and run smoke validation.",
    after_help = "Examples:\n  homequote services\n  homequote quote junk_removal --selections '{\"items\":[{\"id\":\"sofa\"}]}'\n  homequote bundles home_cleaning junk_removal\n  homequote smoke"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List every bookable service with its starting price")]
    Services,
    #[command(about = "Show tier and add-on pricing detail for one service")]
    Pricing {
        #[arg(help = "Service id, e.g. home_cleaning")]
        service_id: String,
    },
    #[command(about = "Calculate a quote for a service from a JSON selection bag")]
    Quote {
        #[arg(help = "Service id, e.g. junk_removal")]
        service_id: String,
        #[arg(long, help = "Selections as a JSON object (defaults apply when omitted)")]
        selections: Option<String>,
    },
    #[command(about = "Match bundle packages against a set of requested services")]
    Bundles {
        #[arg(required = true, help = "Service ids, e.g. home_cleaning junk_removal")]
        services: Vec<String>,
        #[arg(long, help = "Property-manager monthly unit count for B2B volume pricing")]
        pm_units: Option<u32>,
    },
    #[command(about = "Run end-to-end pricing checks with per-check timing details")]
    Smoke,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Services => commands::services::run(),
        Command::Pricing { service_id } => commands::pricing::run(&service_id),
        Command::Quote { service_id, selections } => {
            commands::quote::run(&service_id, selections.as_deref())
        }
        Command::Bundles { services, pm_units } => commands::bundles::run(&services, pm_units),
        Command::Smoke => commands::smoke::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
