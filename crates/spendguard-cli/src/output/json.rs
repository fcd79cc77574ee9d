use std::io;

use serde::Serialize;
use serde_json::{Value, json};
use spendguard_engine::{EngineError, SuccessEnvelope};

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "analyze" | "fraud" => serialize_json_pretty(&success.data),
        _ => Err(io::Error::other(format!(
            "JSON output is not supported for command `{}`",
            success.command
        ))),
    }
}

pub fn render_error_json(error: &EngineError) -> io::Result<String> {
    let mut error_body = json!({
        "code": error.code,
        "message": error.message,
        "recovery_steps": error.recovery_steps,
    });
    if let Some(data) = &error.data
        && let Some(object) = error_body.as_object_mut()
    {
        object.insert("data".to_string(), data.clone());
    }

    let payload = json!({ "error": error_body });
    serialize_json_pretty(&payload)
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
