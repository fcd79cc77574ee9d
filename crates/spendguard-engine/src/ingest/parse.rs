use serde_json::Value;

use crate::ingest::invalid_input_error;
use crate::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub(crate) struct ParsedRecord {
    pub(crate) row: i64,
    pub(crate) id: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) kind: Option<String>,
    pub(crate) amount: Option<String>,
}

pub(crate) fn parse_source(content: &str) -> EngineResult<Vec<ParsedRecord>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Transaction source is empty."));
    }

    if looks_like_ndjson(trimmed) {
        return Err(EngineError::invalid_input_format(
            "NDJSON is not supported. Provide a single JSON array of transaction objects.",
            "ndjson",
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(EngineError::invalid_input_format(
            "JSON input must be a top-level array of transaction objects.",
            "json_non_array",
        ));
    }

    Err(EngineError::invalid_input_format(
        "Unsupported input format. Provide a JSON array of transaction objects.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> EngineResult<Vec<ParsedRecord>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of transaction objects.",
        ));
    };

    let mut records = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                "JSON array entries must all be objects with transaction fields.",
            ));
        };

        records.push(ParsedRecord {
            row: (index as i64) + 1,
            id: read_optional_string(object.get("id")),
            date: read_optional_string(object.get("date")),
            description: read_optional_string(object.get("description")),
            category: read_optional_string(object.get("category")),
            kind: read_optional_string(object.get("type")),
            amount: read_optional_string(object.get("amount")),
        });
    }

    Ok(records)
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;

    if current.is_null() {
        return None;
    }

    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }

    if let Some(number_value) = current.as_f64() {
        return Some(number_value.to_string());
    }

    Some(current.to_string())
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        let parsed = serde_json::from_str::<Value>(line.trim());
        if let Ok(value) = parsed {
            return value.is_object();
        }
        false
    })
}
