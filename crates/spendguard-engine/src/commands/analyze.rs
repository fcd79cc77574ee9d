use crate::EngineResult;
use crate::analysis::date::{build_filter, format_iso_date};
use crate::analysis::policy::{SUSPICIOUS_POLICY_VERSION, SuspiciousPolicy};
use crate::analysis::suspicious::analyze_with_policy;
use crate::commands::common::{transaction_rows, windowed};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{AlertRow, AnalyzeData};
use crate::ingest;

#[derive(Debug, Default)]
pub struct AnalyzeRunOptions {
    pub path: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub high_amount_threshold: Option<f64>,
    pub small_amount_threshold: Option<f64>,
    pub many_small_count_threshold: Option<usize>,
    pub stdin_override: Option<String>,
}

pub fn run(options: AnalyzeRunOptions) -> EngineResult<SuccessEnvelope> {
    let filter = build_filter(options.from.as_deref(), options.to.as_deref(), "analyze")?;
    let policy = resolve_policy(&options);
    let loaded = ingest::load(options.path, options.stdin_override)?;
    let window = windowed(&loaded.transactions, &filter);
    let alerts = analyze_with_policy(&window, policy);

    let rows = alerts
        .iter()
        .map(|alert| AlertRow {
            id: alert.id.clone(),
            rule: alert.rule.as_str().to_string(),
            risk_score: alert.risk_score,
            message: alert.message.clone(),
            transactions: transaction_rows(&alert.transactions),
        })
        .collect::<Vec<AlertRow>>();

    let data = AnalyzeData {
        policy_version: SUSPICIOUS_POLICY_VERSION.to_string(),
        from: filter.from.as_ref().map(format_iso_date),
        to: filter.to.as_ref().map(format_iso_date),
        source_used: loaded.source_used,
        summary: loaded.summary,
        rows_analyzed: window.len() as i64,
        alerts: rows,
    };

    success("analyze", data)
}

fn resolve_policy(options: &AnalyzeRunOptions) -> SuspiciousPolicy {
    let mut policy = SuspiciousPolicy::default();
    if let Some(value) = options.high_amount_threshold {
        policy.high_amount_threshold = value;
    }
    if let Some(value) = options.small_amount_threshold {
        policy.small_amount_threshold = value;
    }
    if let Some(value) = options.many_small_count_threshold {
        policy.many_small_count_threshold = value;
    }
    policy
}
