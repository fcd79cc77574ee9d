use std::io;

use serde_json::Value;

use super::format::{key_value_rows, numbered_block};

pub fn render_analyze(data: &Value) -> io::Result<String> {
    let alerts = data
        .get("alerts")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("analyze output requires alerts"))?;

    if alerts.is_empty() {
        let mut lines = vec![
            "No suspicious activity found.".to_string(),
            String::new(),
            "Every transaction in the analyzed window passed the duplicate,".to_string(),
            "high-amount, and small-charge burst checks.".to_string(),
            String::new(),
        ];
        lines.extend(summary_section(data));
        return Ok(lines.join("\n"));
    }

    let from = data.get("from").and_then(Value::as_str);
    let to = data.get("to").and_then(Value::as_str);

    let mut lines = vec![
        alerts_heading("suspicious alerts", alerts.len(), from, to),
        String::new(),
        "Alerts:".to_string(),
    ];

    for (index, alert) in alerts.iter().enumerate() {
        let risk = alert.get("risk_score").and_then(Value::as_i64).unwrap_or(0);
        let rule = alert.get("rule").and_then(Value::as_str).unwrap_or("unknown");
        let tag = format!("[risk {risk}] {rule}");
        lines.extend(numbered_block(index + 1, &tag, &alert_details(alert)));
        if index + 1 < alerts.len() {
            lines.push(String::new());
        }
    }

    lines.push(String::new());
    lines.extend(summary_section(data));
    Ok(lines.join("\n"))
}

pub fn render_fraud(data: &Value) -> io::Result<String> {
    let alerts = data
        .get("alerts")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("fraud output requires alerts"))?;
    let score = data.get("risk_score").and_then(Value::as_i64).unwrap_or(0);

    if alerts.is_empty() {
        let mut lines = vec![
            "No fraud alerts raised.".to_string(),
            String::new(),
            format!("Risk score: {score}/100"),
            String::new(),
        ];
        lines.extend(summary_section(data));
        return Ok(lines.join("\n"));
    }

    let from = data.get("from").and_then(Value::as_str);
    let to = data.get("to").and_then(Value::as_str);

    let mut lines = vec![
        alerts_heading("fraud alerts", alerts.len(), from, to),
        String::new(),
        format!("Risk score: {score}/100"),
        String::new(),
        "Alerts:".to_string(),
    ];

    for (index, alert) in alerts.iter().enumerate() {
        let severity = alert
            .get("severity")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let title = alert.get("title").and_then(Value::as_str).unwrap_or("unknown");
        let tag = format!("[{severity}] {title}");
        lines.extend(numbered_block(index + 1, &tag, &alert_details(alert)));
        if index + 1 < alerts.len() {
            lines.push(String::new());
        }
    }

    lines.push(String::new());
    lines.extend(summary_section(data));
    Ok(lines.join("\n"))
}

fn alert_details(alert: &Value) -> Vec<String> {
    let mut details = Vec::new();
    if let Some(message) = alert.get("message").and_then(Value::as_str) {
        details.push(message.to_string());
    }

    let ids = alert
        .get("transactions")
        .and_then(Value::as_array)
        .map(|transactions| {
            transactions
                .iter()
                .filter_map(|transaction| transaction.get("id").and_then(Value::as_str))
                .collect::<Vec<&str>>()
                .join(", ")
        })
        .unwrap_or_default();
    if !ids.is_empty() {
        details.push(format!("Transactions: {ids}"));
    }
    details
}

fn summary_section(data: &Value) -> Vec<String> {
    let rows_read = data
        .get("summary")
        .and_then(|summary| summary.get("rows_read"))
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let rows_analyzed = data.get("rows_analyzed").and_then(Value::as_i64).unwrap_or(0);
    let source = data
        .get("source_used")
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    let mut lines = vec!["Summary:".to_string()];
    lines.extend(key_value_rows(
        &[
            ("Rows read:", rows_read.to_string()),
            ("Rows analyzed:", rows_analyzed.to_string()),
            ("Source:", source.to_string()),
        ],
        2,
    ));
    lines
}

fn alerts_heading(noun: &str, count: usize, from: Option<&str>, to: Option<&str>) -> String {
    match (from, to) {
        (Some(start), Some(end)) => format!("{count} {noun} found from {start} to {end}."),
        (Some(start), None) => format!("{count} {noun} found from {start} onward."),
        (None, Some(end)) => format!("{count} {noun} found up to {end}."),
        (None, None) => format!("{count} {noun} found."),
    }
}
