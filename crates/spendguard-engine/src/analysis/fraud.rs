use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analysis::date::format_iso_date;
use crate::analysis::policy::{FRAUD_POLICY_V1, FraudPolicy};
use crate::analysis::types::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FraudSeverity {
    Critical,
    Warning,
    Info,
}

impl FraudSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Warning => 1,
            Self::Info => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FraudRule {
    UnusualAmount,
    DuplicateCharge,
    HighFrequency,
    CategorySpike,
}

impl FraudRule {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnusualAmount => "unusual_amount",
            Self::DuplicateCharge => "duplicate_transaction",
            Self::HighFrequency => "high_frequency",
            Self::CategorySpike => "category_spike",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FraudAlert {
    pub id: String,
    pub rule: FraudRule,
    pub severity: FraudSeverity,
    pub title: String,
    pub message: String,
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
}

pub fn detect_fraud(transactions: &[Transaction]) -> Vec<FraudAlert> {
    detect_fraud_with_policy(transactions, FRAUD_POLICY_V1)
}

/// The legacy fraud ruleset: four independent heuristics over the same
/// transaction slice, sorted critical-first. Unlike the suspicious rules,
/// every gate here is strict and descriptions are matched byte-for-byte.
pub fn detect_fraud_with_policy(
    transactions: &[Transaction],
    policy: FraudPolicy,
) -> Vec<FraudAlert> {
    let mut alerts = unusual_amount_alerts(transactions, policy);
    alerts.extend(duplicate_charge_alerts(transactions));
    alerts.extend(high_frequency_alerts(transactions, policy));
    alerts.extend(category_spike_alerts(transactions, policy));
    alerts.sort_by(|left, right| left.severity.rank().cmp(&right.severity.rank()));
    alerts
}

pub fn risk_score(alerts: &[FraudAlert]) -> u8 {
    risk_score_with_policy(alerts, FRAUD_POLICY_V1)
}

/// Weighted roll-up of alert severities, clamped to the policy ceiling.
pub fn risk_score_with_policy(alerts: &[FraudAlert], policy: FraudPolicy) -> u8 {
    let weighted = alerts
        .iter()
        .map(|alert| match alert.severity {
            FraudSeverity::Critical => policy.critical_weight,
            FraudSeverity::Warning => policy.warning_weight,
            FraudSeverity::Info => policy.info_weight,
        })
        .sum::<u32>();
    weighted.min(policy.risk_score_ceiling) as u8
}

fn unusual_amount_alerts(transactions: &[Transaction], policy: FraudPolicy) -> Vec<FraudAlert> {
    transactions
        .iter()
        .filter(|transaction| policy.is_large(transaction.abs_amount()))
        .map(|transaction| FraudAlert {
            id: format!("large-{}", transaction.id),
            rule: FraudRule::UnusualAmount,
            severity: FraudSeverity::Warning,
            title: "Unusually Large Transaction Detected".to_string(),
            message: format!(
                "A transaction of ${:.2} was detected, which is significantly higher than your average spending.",
                transaction.abs_amount(),
            ),
            date: transaction.date,
            transactions: vec![transaction.clone()],
        })
        .collect()
}

fn duplicate_charge_alerts(transactions: &[Transaction]) -> Vec<FraudAlert> {
    let mut alerts = Vec::new();
    for (index, left) in transactions.iter().enumerate() {
        for right in &transactions[index + 1..] {
            let same_amount =
                left.abs_amount().total_cmp(&right.abs_amount()) == Ordering::Equal;
            if same_amount && left.description == right.description && left.date == right.date {
                alerts.push(FraudAlert {
                    id: format!("duplicate-{}-{}", left.id, right.id),
                    rule: FraudRule::DuplicateCharge,
                    severity: FraudSeverity::Critical,
                    title: "Potential Duplicate Transaction".to_string(),
                    message: format!(
                        "Two identical transactions of ${:.2} at {} were detected on {}. This could indicate fraudulent activity.",
                        left.abs_amount(),
                        left.description,
                        format_iso_date(&left.date),
                    ),
                    date: right.date,
                    transactions: vec![left.clone(), right.clone()],
                });
                break;
            }
        }
    }
    alerts
}

fn high_frequency_alerts(transactions: &[Transaction], policy: FraudPolicy) -> Vec<FraudAlert> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for transaction in transactions {
        by_date
            .entry(transaction.date)
            .or_default()
            .push(transaction.clone());
    }

    let mut alerts = Vec::new();
    for (date, day_transactions) in &by_date {
        if !policy.exceeds_daily_frequency(day_transactions.len()) {
            continue;
        }
        let date_text = format_iso_date(date);
        alerts.push(FraudAlert {
            id: format!("high-freq-{date_text}"),
            rule: FraudRule::HighFrequency,
            severity: FraudSeverity::Warning,
            title: "High Transaction Frequency".to_string(),
            message: format!(
                "{} transactions were detected on {date_text}, which is unusually high. Please verify these transactions.",
                day_transactions.len(),
            ),
            date: *date,
            transactions: day_transactions.clone(),
        });
    }
    alerts
}

fn category_spike_alerts(transactions: &[Transaction], policy: FraudPolicy) -> Vec<FraudAlert> {
    let mut spending: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for transaction in transactions {
        if transaction.is_expense() {
            spending
                .entry(transaction.category.as_str())
                .or_default()
                .push(transaction.abs_amount());
        }
    }

    let mut alerts = Vec::new();
    for (category, amounts) in &spending {
        if !policy.has_spike_baseline(amounts.len()) {
            continue;
        }
        let average = amounts.iter().sum::<f64>() / amounts.len() as f64;

        for transaction in transactions {
            if !transaction.is_expense() || transaction.category.as_str() != *category {
                continue;
            }
            if !policy.is_category_spike(transaction.abs_amount(), average) {
                continue;
            }
            alerts.push(FraudAlert {
                id: format!("unusual-{}", transaction.id),
                rule: FraudRule::CategorySpike,
                severity: FraudSeverity::Info,
                title: "Unusual Spending Pattern".to_string(),
                message: format!(
                    "A transaction of ${:.2} in {category} is more than {:.1}x your average spending in this category.",
                    transaction.abs_amount(),
                    policy.category_spike_ratio,
                ),
                date: transaction.date,
                transactions: vec![transaction.clone()],
            });
        }
    }
    alerts
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::analysis::policy::FRAUD_POLICY_V1;
    use crate::analysis::types::{Transaction, TransactionKind};

    use super::{FraudRule, FraudSeverity, detect_fraud, risk_score, risk_score_with_policy};

    fn row(id: &str, date: &str, description: &str, category: &str, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or(NaiveDate::MIN),
            description: description.to_string(),
            category: category.to_string(),
            kind: if amount < 0.0 {
                TransactionKind::Expense
            } else {
                TransactionKind::Income
            },
            amount,
        }
    }

    #[test]
    fn unusual_amount_is_strictly_above_the_threshold() {
        let at_threshold = vec![row("txn_1", "2025-01-05", "Rent", "Housing", -1000.0)];
        assert!(detect_fraud(&at_threshold).is_empty());

        let above = vec![row("txn_2", "2025-01-05", "Rent", "Housing", -1000.01)];
        let alerts = detect_fraud(&above);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].rule, FraudRule::UnusualAmount);
        assert_eq!(alerts[0].severity, FraudSeverity::Warning);
        assert_eq!(alerts[0].id, "large-txn_2");
    }

    #[test]
    fn unusual_amount_also_flags_large_deposits() {
        let rows = vec![row("txn_1", "2025-01-05", "Wire in", "Transfers", 2500.0)];
        let alerts = detect_fraud(&rows);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].rule, FraudRule::UnusualAmount);
    }

    #[test]
    fn duplicate_charge_needs_same_day_and_exact_description() {
        let pair = vec![
            row("txn_1", "2025-01-05", "Coffee", "Dining", -25.0),
            row("txn_2", "2025-01-05", "Coffee", "Dining", -25.0),
        ];
        let alerts = detect_fraud(&pair);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].rule, FraudRule::DuplicateCharge);
        assert_eq!(alerts[0].severity, FraudSeverity::Critical);
        assert_eq!(alerts[0].id, "duplicate-txn_1-txn_2");
        assert_eq!(alerts[0].transactions.len(), 2);

        let different_day = vec![
            row("txn_1", "2025-01-05", "Coffee", "Dining", -25.0),
            row("txn_2", "2025-01-06", "Coffee", "Dining", -25.0),
        ];
        assert!(detect_fraud(&different_day).is_empty());

        let different_case = vec![
            row("txn_1", "2025-01-05", "Coffee", "Dining", -25.0),
            row("txn_2", "2025-01-05", "COFFEE", "Dining", -25.0),
        ];
        assert!(detect_fraud(&different_case).is_empty());
    }

    #[test]
    fn duplicate_charge_pairs_each_left_transaction_once() {
        let rows = vec![
            row("txn_1", "2025-01-05", "Coffee", "Dining", -25.0),
            row("txn_2", "2025-01-05", "Coffee", "Dining", -25.0),
            row("txn_3", "2025-01-05", "Coffee", "Dining", -25.0),
        ];
        let alerts = detect_fraud(&rows);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].id, "duplicate-txn_1-txn_2");
        assert_eq!(alerts[1].id, "duplicate-txn_2-txn_3");
    }

    #[test]
    fn high_frequency_fires_strictly_above_the_daily_count() {
        let mut eleven = Vec::new();
        for index in 0..11 {
            eleven.push(row(
                &format!("txn_{index}"),
                "2025-01-08",
                &format!("Purchase {index}"),
                "Shopping",
                -20.0 - index as f64,
            ));
        }
        let alerts = detect_fraud(&eleven);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].rule, FraudRule::HighFrequency);
        assert_eq!(alerts[0].id, "high-freq-2025-01-08");
        assert_eq!(alerts[0].transactions.len(), 11);

        let ten = eleven[..10].to_vec();
        assert!(detect_fraud(&ten).is_empty());
    }

    #[test]
    fn category_spike_needs_a_baseline_and_double_the_average() {
        let rows = vec![
            row("txn_1", "2025-01-01", "Groceries", "Food", -50.0),
            row("txn_2", "2025-01-08", "Groceries", "Food", -50.0),
            row("txn_3", "2025-01-15", "Groceries", "Food", -50.0),
            row("txn_4", "2025-01-22", "Party catering", "Food", -400.0),
        ];
        let alerts = detect_fraud(&rows);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].rule, FraudRule::CategorySpike);
        assert_eq!(alerts[0].severity, FraudSeverity::Info);
        assert_eq!(alerts[0].id, "unusual-txn_4");
    }

    #[test]
    fn category_spike_skips_categories_with_too_few_samples() {
        let rows = vec![
            row("txn_1", "2025-01-01", "Groceries", "Food", -50.0),
            row("txn_2", "2025-01-22", "Party catering", "Food", -400.0),
        ];
        assert!(detect_fraud(&rows).is_empty());
    }

    #[test]
    fn category_spike_ignores_income_rows() {
        let rows = vec![
            row("txn_1", "2025-01-01", "Groceries", "Food", -50.0),
            row("txn_2", "2025-01-08", "Groceries", "Food", -50.0),
            row("txn_3", "2025-01-15", "Groceries", "Food", -50.0),
            row("txn_4", "2025-01-22", "Refund", "Food", 400.0),
        ];
        assert!(detect_fraud(&rows).is_empty());
    }

    #[test]
    fn alerts_are_sorted_critical_first() {
        let mut rows = vec![
            row("txn_a", "2025-01-05", "Laptop", "Electronics", -1500.0),
            row("txn_b", "2025-01-06", "Coffee", "Dining", -25.0),
            row("txn_c", "2025-01-06", "Coffee", "Dining", -25.0),
        ];
        rows.push(row("txn_d", "2025-01-07", "Groceries", "Food", -50.0));
        rows.push(row("txn_e", "2025-01-14", "Groceries", "Food", -50.0));
        rows.push(row("txn_f", "2025-01-21", "Groceries", "Food", -50.0));
        rows.push(row("txn_g", "2025-01-28", "Party catering", "Food", -400.0));

        let alerts = detect_fraud(&rows);
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].severity, FraudSeverity::Critical);
        assert_eq!(alerts[1].severity, FraudSeverity::Warning);
        assert_eq!(alerts[2].severity, FraudSeverity::Info);
    }

    #[test]
    fn risk_score_weights_severities_and_caps_at_one_hundred() {
        let rows = vec![
            row("txn_1", "2025-01-05", "Laptop", "Electronics", -1500.0),
            row("txn_2", "2025-01-06", "Coffee", "Dining", -25.0),
            row("txn_3", "2025-01-06", "Coffee", "Dining", -25.0),
        ];
        let alerts = detect_fraud(&rows);
        assert_eq!(risk_score(&alerts), 45);

        let mut many_pairs = Vec::new();
        for index in 0..8 {
            many_pairs.push(row(
                &format!("txn_a{index}"),
                "2025-01-06",
                &format!("Charge {index}"),
                "Dining",
                -25.0,
            ));
            many_pairs.push(row(
                &format!("txn_b{index}"),
                "2025-01-06",
                &format!("Charge {index}"),
                "Dining",
                -25.0,
            ));
        }
        let saturated = detect_fraud(&many_pairs);
        assert_eq!(risk_score_with_policy(&saturated, FRAUD_POLICY_V1), 100);
    }

    #[test]
    fn empty_input_scores_zero() {
        let alerts = detect_fraud(&[]);
        assert!(alerts.is_empty());
        assert_eq!(risk_score(&alerts), 0);
    }
}
