use crate::analysis::date::format_iso_date;
use crate::analysis::types::{AnalysisFilter, Transaction};
use crate::contracts::types::TransactionRow;

pub(crate) fn transaction_rows(transactions: &[Transaction]) -> Vec<TransactionRow> {
    transactions
        .iter()
        .map(|transaction| TransactionRow {
            id: transaction.id.clone(),
            date: format_iso_date(&transaction.date),
            description: transaction.description.clone(),
            category: transaction.category.clone(),
            kind: transaction.kind.as_str().to_string(),
            amount: transaction.amount,
        })
        .collect()
}

pub(crate) fn windowed(transactions: &[Transaction], filter: &AnalysisFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.contains(transaction.date))
        .cloned()
        .collect()
}
