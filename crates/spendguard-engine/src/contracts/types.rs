use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertRow {
    pub id: String,
    pub rule: String,
    pub risk_score: u8,
    pub message: String,
    pub transactions: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FraudAlertRow {
    pub id: String,
    pub rule: String,
    pub severity: String,
    pub title: String,
    pub message: String,
    pub date: String,
    pub transactions: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeData {
    pub policy_version: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub source_used: String,
    pub summary: ValidationSummary,
    pub rows_analyzed: i64,
    pub alerts: Vec<AlertRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FraudData {
    pub policy_version: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub source_used: String,
    pub summary: ValidationSummary,
    pub rows_analyzed: i64,
    pub risk_score: u8,
    pub alerts: Vec<FraudAlertRow>,
}
