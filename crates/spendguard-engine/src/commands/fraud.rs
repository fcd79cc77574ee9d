use crate::EngineResult;
use crate::analysis::date::{build_filter, format_iso_date};
use crate::analysis::fraud::{detect_fraud, risk_score};
use crate::analysis::policy::FRAUD_POLICY_VERSION;
use crate::commands::common::{transaction_rows, windowed};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{FraudAlertRow, FraudData};
use crate::ingest;

#[derive(Debug, Default)]
pub struct FraudRunOptions {
    pub path: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub stdin_override: Option<String>,
}

pub fn run(options: FraudRunOptions) -> EngineResult<SuccessEnvelope> {
    let filter = build_filter(options.from.as_deref(), options.to.as_deref(), "fraud")?;
    let loaded = ingest::load(options.path, options.stdin_override)?;
    let window = windowed(&loaded.transactions, &filter);
    let alerts = detect_fraud(&window);
    let score = risk_score(&alerts);

    let rows = alerts
        .iter()
        .map(|alert| FraudAlertRow {
            id: alert.id.clone(),
            rule: alert.rule.as_str().to_string(),
            severity: alert.severity.as_str().to_string(),
            title: alert.title.clone(),
            message: alert.message.clone(),
            date: format_iso_date(&alert.date),
            transactions: transaction_rows(&alert.transactions),
        })
        .collect::<Vec<FraudAlertRow>>();

    let data = FraudData {
        policy_version: FRAUD_POLICY_VERSION.to_string(),
        from: filter.from.as_ref().map(format_iso_date),
        to: filter.to.as_ref().map(format_iso_date),
        source_used: loaded.source_used,
        summary: loaded.summary,
        rows_analyzed: window.len() as i64,
        risk_score: score,
        alerts: rows,
    };

    success("fraud", data)
}
