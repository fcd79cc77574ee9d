pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod validate;

use crate::analysis::types::Transaction;
use crate::contracts::types::ValidationSummary;
use crate::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub(crate) struct LoadedTransactions {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) summary: ValidationSummary,
    pub(crate) source_used: String,
}

/// The parse/validate boundary: everything past this point operates on
/// well-formed `Transaction` values only.
pub(crate) fn load(
    path: Option<String>,
    stdin_override: Option<String>,
) -> EngineResult<LoadedTransactions> {
    let source = input::resolve_source(path, stdin_override)?;
    let records = parse::parse_source(&source.content)?;
    let validated = validate::validate_records(records)?;
    Ok(LoadedTransactions {
        transactions: validated.transactions,
        summary: validated.summary,
        source_used: source.kind.as_str().to_string(),
    })
}

pub(crate) fn invalid_input_error(message: &str) -> EngineError {
    EngineError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide a JSON array of transactions via path or stdin.".to_string(),
            "Run `spendguard analyze --help` to review transaction field requirements.".to_string(),
        ],
    )
}
