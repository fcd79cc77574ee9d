use crate::analysis::date::format_iso_date;
use crate::analysis::types::Transaction;

/// Canonical description form for duplicate grouping: surrounding whitespace
/// stripped, then lowercased. The verbatim description is still what alert
/// messages quote.
pub fn normalized_description(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Absolute amount rendered with exactly 2 decimals, so `-4.5` and `4.50`
/// land in the same duplicate group.
pub fn amount_key(amount: f64) -> String {
    format!("{:.2}", amount.abs())
}

/// Duplicate identity: `(calendar date, normalized description, absolute
/// amount at 2 decimals)`. Two transactions are duplicates of each other iff
/// their keys match exactly.
pub fn duplicate_group_key(transaction: &Transaction) -> String {
    format!(
        "{}::{}::{}",
        format_iso_date(&transaction.date),
        normalized_description(&transaction.description),
        amount_key(transaction.amount),
    )
}
