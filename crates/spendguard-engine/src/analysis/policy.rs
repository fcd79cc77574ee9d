/// Deterministic suspicious-scoring policy identifier.
///
/// Emitted with analysis results so future threshold changes remain auditable
/// and easy to reason about in diffs and support/debug sessions.
pub const SUSPICIOUS_POLICY_VERSION: &str = "suspicious/v1";

/// Legacy fraud-ruleset policy identifier.
pub const FRAUD_POLICY_VERSION: &str = "fraud/v1";

/// v1 suspicious-transaction policy.
///
/// Notes:
/// - The high-amount gate is inclusive; the small-amount gate is strict on
///   both ends (an exactly-zero amount never counts as small).
/// - Risk scores are fixed per rule and do not scale with how far a value
///   exceeds its threshold.
#[derive(Debug, Clone, Copy)]
pub struct SuspiciousPolicy {
    pub high_amount_threshold: f64,
    pub small_amount_threshold: f64,
    pub many_small_count_threshold: usize,
}

impl SuspiciousPolicy {
    pub fn is_high_amount(self, abs_amount: f64) -> bool {
        abs_amount >= self.high_amount_threshold
    }

    pub fn counts_as_small(self, abs_amount: f64) -> bool {
        abs_amount > 0.0 && abs_amount < self.small_amount_threshold
    }

    pub fn meets_burst_count(self, count: usize) -> bool {
        count >= self.many_small_count_threshold
    }
}

pub const SUSPICIOUS_POLICY_V1: SuspiciousPolicy = SuspiciousPolicy {
    high_amount_threshold: 1000.0,
    small_amount_threshold: 10.0,
    many_small_count_threshold: 5,
};

impl Default for SuspiciousPolicy {
    fn default() -> Self {
        SUSPICIOUS_POLICY_V1
    }
}

/// v1 legacy fraud policy. All count and ratio gates are strict, matching the
/// detector this ruleset was lifted from.
#[derive(Debug, Clone, Copy)]
pub struct FraudPolicy {
    pub large_amount_threshold: f64,
    pub high_frequency_count_threshold: usize,
    pub category_spike_ratio: f64,
    pub category_min_samples: usize,
    pub critical_weight: u32,
    pub warning_weight: u32,
    pub info_weight: u32,
    pub risk_score_ceiling: u32,
}

impl FraudPolicy {
    pub fn is_large(self, abs_amount: f64) -> bool {
        abs_amount > self.large_amount_threshold
    }

    pub fn exceeds_daily_frequency(self, count: usize) -> bool {
        count > self.high_frequency_count_threshold
    }

    pub fn has_spike_baseline(self, samples: usize) -> bool {
        samples > self.category_min_samples
    }

    pub fn is_category_spike(self, abs_amount: f64, category_average: f64) -> bool {
        abs_amount > category_average * self.category_spike_ratio
    }
}

pub const FRAUD_POLICY_V1: FraudPolicy = FraudPolicy {
    large_amount_threshold: 1000.0,
    high_frequency_count_threshold: 10,
    category_spike_ratio: 2.0,
    category_min_samples: 2,
    critical_weight: 30,
    warning_weight: 15,
    info_weight: 5,
    risk_score_ceiling: 100,
};

impl Default for FraudPolicy {
    fn default() -> Self {
        FRAUD_POLICY_V1
    }
}
