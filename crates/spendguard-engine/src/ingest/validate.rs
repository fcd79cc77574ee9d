use std::collections::HashSet;

use chrono::NaiveDate;

use crate::analysis::date::parse_transaction_date;
use crate::analysis::types::{Transaction, TransactionKind};
use crate::contracts::types::{ValidationIssue, ValidationSummary};
use crate::ingest::parse::ParsedRecord;
use crate::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub(crate) struct ValidatedTransactions {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) summary: ValidationSummary,
}

/// All-or-nothing validation: any invalid row fails the whole batch with the
/// full issue list, so the analysis rules never see malformed records.
pub(crate) fn validate_records(records: Vec<ParsedRecord>) -> EngineResult<ValidatedTransactions> {
    let total_rows = records.len();
    let mut transactions = Vec::new();
    let mut issues = Vec::new();

    for record in records {
        let mut row_issues = Vec::new();

        let id = validate_required_string(
            record.row,
            "id",
            record.id,
            &mut row_issues,
            "id must be present and non-empty.",
        );
        let date = validate_date(record.row, record.date, &mut row_issues);
        let description = validate_required_string(
            record.row,
            "description",
            record.description,
            &mut row_issues,
            "description must be present and non-empty.",
        );
        let kind = validate_kind(record.row, record.kind, &mut row_issues);
        let amount = validate_amount(record.row, record.amount, &mut row_issues);
        let category = normalize_optional(record.category).unwrap_or_default();

        if row_issues.is_empty() {
            transactions.push(Transaction {
                id: id.unwrap_or_default(),
                date: date.unwrap_or_default(),
                description: description.unwrap_or_default(),
                category,
                kind: kind.unwrap_or(TransactionKind::Expense),
                amount: amount.unwrap_or_default(),
            });
        } else {
            issues.extend(row_issues);
        }
    }

    let summary = ValidationSummary {
        rows_read: total_rows as i64,
        rows_valid: transactions.len() as i64,
        rows_invalid: issues
            .iter()
            .map(|issue| issue.row)
            .collect::<HashSet<i64>>()
            .len() as i64,
    };

    if !issues.is_empty() {
        return Err(EngineError::transaction_validation_failed(summary, issues));
    }

    Ok(ValidatedTransactions {
        transactions,
        summary,
    })
}

fn validate_required_string(
    row: i64,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<ValidationIssue>,
    description: &str,
) -> Option<String> {
    let normalized = normalize_optional(value);
    if normalized.is_none() {
        issues.push(ValidationIssue {
            row,
            field: field.to_string(),
            code: "missing_required_field".to_string(),
            description: description.to_string(),
            expected: Some("non-empty string".to_string()),
            received: Some(String::new()),
        });
    }
    normalized
}

fn validate_date(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<NaiveDate> {
    let normalized = normalize_optional(value);
    let Some(candidate) = normalized else {
        issues.push(ValidationIssue {
            row,
            field: "date".to_string(),
            code: "missing_required_field".to_string(),
            description: "date must be present and non-empty.".to_string(),
            expected: Some("YYYY-MM-DD".to_string()),
            received: Some(String::new()),
        });
        return None;
    };

    let Some(parsed) = parse_transaction_date(&candidate) else {
        issues.push(ValidationIssue {
            row,
            field: "date".to_string(),
            code: "invalid_date".to_string(),
            description: format!("date must be YYYY-MM-DD; got \"{candidate}\""),
            expected: Some("YYYY-MM-DD".to_string()),
            received: Some(candidate),
        });
        return None;
    };

    Some(parsed)
}

fn validate_kind(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<TransactionKind> {
    let normalized = normalize_optional(value);
    let Some(candidate) = normalized else {
        issues.push(ValidationIssue {
            row,
            field: "type".to_string(),
            code: "missing_required_field".to_string(),
            description: "type must be present and non-empty.".to_string(),
            expected: Some("income|expense".to_string()),
            received: Some(String::new()),
        });
        return None;
    };

    match candidate.as_str() {
        "income" => Some(TransactionKind::Income),
        "expense" => Some(TransactionKind::Expense),
        _ => {
            issues.push(ValidationIssue {
                row,
                field: "type".to_string(),
                code: "invalid_type".to_string(),
                description: format!("type must be `income` or `expense`; got \"{candidate}\""),
                expected: Some("income|expense".to_string()),
                received: Some(candidate),
            });
            None
        }
    }
}

fn validate_amount(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<f64> {
    let normalized = normalize_optional(value);
    let Some(candidate) = normalized else {
        issues.push(ValidationIssue {
            row,
            field: "amount".to_string(),
            code: "missing_required_field".to_string(),
            description: "amount must be present and non-empty.".to_string(),
            expected: Some("number (e.g. -42.15)".to_string()),
            received: Some(String::new()),
        });
        return None;
    };

    match candidate.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Some(amount),
        _ => {
            issues.push(ValidationIssue {
                row,
                field: "amount".to_string(),
                code: "invalid_number".to_string(),
                description: format!("amount must be numeric; got \"{candidate}\""),
                expected: Some("number (e.g. -42.15)".to_string()),
                received: Some(candidate),
            });
            None
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use crate::analysis::types::TransactionKind;
    use crate::ingest::parse::ParsedRecord;

    use super::validate_records;

    fn record(
        row: i64,
        id: Option<&str>,
        date: Option<&str>,
        kind: Option<&str>,
        amount: Option<&str>,
    ) -> ParsedRecord {
        ParsedRecord {
            row,
            id: id.map(str::to_string),
            date: date.map(str::to_string),
            description: Some("Coffee".to_string()),
            category: Some("Dining".to_string()),
            kind: kind.map(str::to_string),
            amount: amount.map(str::to_string),
        }
    }

    #[test]
    fn well_formed_records_validate_into_transactions() {
        let records = vec![
            record(1, Some("txn_1"), Some("2025-01-05"), Some("expense"), Some("-4.50")),
            record(2, Some("txn_2"), Some("2025-01-06"), Some("income"), Some("2000")),
        ];

        let validated = validate_records(records);
        assert!(validated.is_ok());
        if let Ok(result) = validated {
            assert_eq!(result.transactions.len(), 2);
            assert_eq!(result.summary.rows_read, 2);
            assert_eq!(result.summary.rows_valid, 2);
            assert_eq!(result.summary.rows_invalid, 0);
            assert_eq!(result.transactions[0].kind, TransactionKind::Expense);
            assert_eq!(result.transactions[1].kind, TransactionKind::Income);
        }
    }

    #[test]
    fn empty_batch_is_valid() {
        let validated = validate_records(Vec::new());
        assert!(validated.is_ok());
        if let Ok(result) = validated {
            assert!(result.transactions.is_empty());
            assert_eq!(result.summary.rows_read, 0);
        }
    }

    #[test]
    fn missing_id_fails_the_batch_with_an_issue() {
        let records = vec![record(1, None, Some("2025-01-05"), Some("expense"), Some("-4.50"))];

        let validated = validate_records(records);
        assert!(validated.is_err());
        if let Err(error) = validated {
            assert_eq!(error.code, "transaction_validation_failed");
            let issues = error
                .data
                .as_ref()
                .and_then(|data| data.get("issues"))
                .and_then(|value| value.as_array())
                .cloned()
                .unwrap_or_default();
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0]["field"], "id");
            assert_eq!(issues[0]["code"], "missing_required_field");
        }
    }

    #[test]
    fn invalid_date_and_amount_report_per_field_issues() {
        let records = vec![record(
            1,
            Some("txn_1"),
            Some("01/05/2025"),
            Some("expense"),
            Some("four dollars"),
        )];

        let validated = validate_records(records);
        assert!(validated.is_err());
        if let Err(error) = validated {
            let issues = error
                .data
                .as_ref()
                .and_then(|data| data.get("issues"))
                .and_then(|value| value.as_array())
                .cloned()
                .unwrap_or_default();
            assert_eq!(issues.len(), 2);
            assert_eq!(issues[0]["code"], "invalid_date");
            assert_eq!(issues[1]["code"], "invalid_number");
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let records = vec![record(1, Some("txn_1"), Some("2025-01-05"), Some("transfer"), Some("-4.50"))];

        let validated = validate_records(records);
        assert!(validated.is_err());
        if let Err(error) = validated {
            let issues = error
                .data
                .as_ref()
                .and_then(|data| data.get("issues"))
                .and_then(|value| value.as_array())
                .cloned()
                .unwrap_or_default();
            assert_eq!(issues[0]["code"], "invalid_type");
        }
    }

    #[test]
    fn date_with_time_component_is_truncated_not_rejected() {
        let records = vec![record(
            1,
            Some("txn_1"),
            Some("2025-01-05T09:30:00Z"),
            Some("expense"),
            Some("-4.50"),
        )];

        let validated = validate_records(records);
        assert!(validated.is_ok());
        if let Ok(result) = validated {
            assert_eq!(
                result.transactions[0].date.format("%Y-%m-%d").to_string(),
                "2025-01-05"
            );
        }
    }

    #[test]
    fn missing_category_defaults_to_empty() {
        let mut parsed = record(1, Some("txn_1"), Some("2025-01-05"), Some("expense"), Some("-4.50"));
        parsed.category = None;

        let validated = validate_records(vec![parsed]);
        assert!(validated.is_ok());
        if let Ok(result) = validated {
            assert_eq!(result.transactions[0].category, "");
        }
    }

    #[test]
    fn rows_invalid_counts_distinct_rows_not_issues() {
        let records = vec![
            record(1, None, Some("01/05/2025"), Some("expense"), Some("-4.50")),
            record(2, Some("txn_2"), Some("2025-01-06"), Some("income"), Some("5")),
        ];

        let validated = validate_records(records);
        assert!(validated.is_err());
        if let Err(error) = validated {
            let summary = error.data.as_ref().and_then(|data| data.get("summary")).cloned();
            assert!(summary.is_some());
            if let Some(summary) = summary {
                assert_eq!(summary["rows_read"], 2);
                assert_eq!(summary["rows_valid"], 1);
                assert_eq!(summary["rows_invalid"], 1);
            }
        }
    }
}
