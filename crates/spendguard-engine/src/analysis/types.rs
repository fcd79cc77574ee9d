use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct AnalysisFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl AnalysisFilter {
    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.from.is_some_and(|from| date < from) {
            return false;
        }
        !self.to.is_some_and(|to| date > to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// One ledger entry as delivered by the ingestion boundary.
///
/// `kind` is the authoritative spending signal; `amount` may carry either
/// sign, so every rule thresholds on `abs_amount`.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub kind: TransactionKind,
    pub amount: f64,
}

impl Transaction {
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::AnalysisFilter;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let filter = AnalysisFilter {
            from: Some(date("2025-01-10")),
            to: Some(date("2025-01-20")),
        };

        assert!(filter.contains(date("2025-01-10")));
        assert!(filter.contains(date("2025-01-20")));
        assert!(!filter.contains(date("2025-01-09")));
        assert!(!filter.contains(date("2025-01-21")));
    }

    #[test]
    fn open_filter_contains_everything() {
        let filter = AnalysisFilter {
            from: None,
            to: None,
        };
        assert!(filter.contains(date("1994-07-01")));
        assert!(filter.contains(date("2099-12-31")));
    }
}
