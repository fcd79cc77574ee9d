use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analysis::date::format_iso_date;
use crate::analysis::normalize::duplicate_group_key;
use crate::analysis::policy::{SUSPICIOUS_POLICY_V1, SuspiciousPolicy};
use crate::analysis::types::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertRule {
    Duplicate,
    HighAmount,
    ManySmall,
}

impl AlertRule {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::HighAmount => "high-amount",
            Self::ManySmall => "many-small",
        }
    }

    pub const fn risk_score(self) -> u8 {
        match self {
            Self::Duplicate => 75,
            Self::HighAmount => 80,
            Self::ManySmall => 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SuspiciousAlert {
    pub id: String,
    pub rule: AlertRule,
    pub message: String,
    pub risk_score: u8,
    pub transactions: Vec<Transaction>,
}

pub fn analyze(transactions: &[Transaction]) -> Vec<SuspiciousAlert> {
    analyze_with_policy(transactions, SUSPICIOUS_POLICY_V1)
}

/// Runs the three suspicious-activity rules independently over the same
/// input and returns the concatenated alerts sorted by risk score
/// descending. The sort is stable, so ties keep the duplicate, high-amount,
/// many-small production order, and a transaction may appear in more than
/// one alert. Identical input always yields identical output.
pub fn analyze_with_policy(
    transactions: &[Transaction],
    policy: SuspiciousPolicy,
) -> Vec<SuspiciousAlert> {
    let mut alerts = duplicate_alerts(transactions);
    alerts.extend(high_amount_alerts(transactions, policy));
    alerts.extend(many_small_alerts(transactions, policy));
    alerts.sort_by(|left, right| right.risk_score.cmp(&left.risk_score));
    alerts
}

fn duplicate_alerts(transactions: &[Transaction]) -> Vec<SuspiciousAlert> {
    let mut groups: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for transaction in transactions {
        groups
            .entry(duplicate_group_key(transaction))
            .or_default()
            .push(transaction.clone());
    }

    let mut alerts = Vec::new();
    for (key, group) in &groups {
        if group.len() < 2 {
            continue;
        }
        let Some(first) = group.first() else {
            continue;
        };
        alerts.push(SuspiciousAlert {
            id: format!("dup-{key}"),
            rule: AlertRule::Duplicate,
            message: format!(
                "Found {} duplicate transactions on {} for \"{}\" (${:.2}).",
                group.len(),
                format_iso_date(&first.date),
                first.description,
                first.abs_amount(),
            ),
            risk_score: AlertRule::Duplicate.risk_score(),
            transactions: group.clone(),
        });
    }
    alerts
}

fn high_amount_alerts(
    transactions: &[Transaction],
    policy: SuspiciousPolicy,
) -> Vec<SuspiciousAlert> {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.is_expense() && policy.is_high_amount(transaction.abs_amount())
        })
        .map(|transaction| SuspiciousAlert {
            id: format!("high-{}", transaction.id),
            rule: AlertRule::HighAmount,
            message: format!(
                "High-value expense of ${:.2} on {}: \"{}\".",
                transaction.abs_amount(),
                format_iso_date(&transaction.date),
                transaction.description,
            ),
            risk_score: AlertRule::HighAmount.risk_score(),
            transactions: vec![transaction.clone()],
        })
        .collect()
}

fn many_small_alerts(
    transactions: &[Transaction],
    policy: SuspiciousPolicy,
) -> Vec<SuspiciousAlert> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for transaction in transactions {
        by_date
            .entry(transaction.date)
            .or_default()
            .push(transaction.clone());
    }

    let mut alerts = Vec::new();
    for (date, day_transactions) in &by_date {
        let small = day_transactions
            .iter()
            .filter(|transaction| policy.counts_as_small(transaction.abs_amount()))
            .cloned()
            .collect::<Vec<Transaction>>();
        if !policy.meets_burst_count(small.len()) {
            continue;
        }

        let date_text = format_iso_date(date);
        alerts.push(SuspiciousAlert {
            id: format!("many-small-{date_text}"),
            rule: AlertRule::ManySmall,
            message: format!(
                "{} small transactions under ${:.2} on {date_text}.",
                small.len(),
                policy.small_amount_threshold,
            ),
            risk_score: AlertRule::ManySmall.risk_score(),
            transactions: small,
        });
    }
    alerts
}
