use serde_json::Value;
use spendguard_engine::EngineError;

pub fn render_error(error: &EngineError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = validation_issues(error);
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Issues:".to_string());
        lines.extend(issues);
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn validation_issues(error: &EngineError) -> Vec<String> {
    let Some(issues) = error
        .data
        .as_ref()
        .and_then(|data| data.get("issues"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    issues
        .iter()
        .map(|issue| {
            let row = issue.get("row").and_then(Value::as_i64).unwrap_or(0);
            let field = issue.get("field").and_then(Value::as_str).unwrap_or("unknown");
            let description = issue
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("unknown issue");
            format!("  - row {row}, {field}: {description}")
        })
        .collect()
}
