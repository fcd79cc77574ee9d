use spendguard_engine::commands::analyze::AnalyzeRunOptions;
use spendguard_engine::commands::fraud::FraudRunOptions;
use spendguard_engine::{EngineResult, SuccessEnvelope, commands};

use crate::cli::{Cli, Commands, IsoDate};

pub fn dispatch(cli: &Cli) -> EngineResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Analyze {
            path,
            from,
            to,
            high_amount_threshold,
            small_amount_threshold,
            many_small_count,
            json: _,
        } => commands::analyze::run(AnalyzeRunOptions {
            path: path.clone(),
            from: iso_date_value(from.as_ref()),
            to: iso_date_value(to.as_ref()),
            high_amount_threshold: *high_amount_threshold,
            small_amount_threshold: *small_amount_threshold,
            many_small_count_threshold: *many_small_count,
            stdin_override: None,
        }),
        Commands::Fraud {
            path,
            from,
            to,
            json: _,
        } => commands::fraud::run(FraudRunOptions {
            path: path.clone(),
            from: iso_date_value(from.as_ref()),
            to: iso_date_value(to.as_ref()),
            stdin_override: None,
        }),
    }
}

fn iso_date_value(value: Option<&IsoDate>) -> Option<String> {
    value.map(|date| date.as_str().to_string())
}
