use std::io;

use hearth_client::{ClientError, SuccessEnvelope};
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        // Analytics payloads are already self-describing objects.
        "insights" | "summary" | "trend" | "recurring" => success.data.clone(),
        "import" | "report" => json!({
            "ok": true,
            "version": JSON_VERSION,
            "data": success.data.clone(),
        }),
        // The list is emitted as a raw array, newest first, for easy piping.
        "import list" => {
            let rows = success.data.get("rows").cloned().unwrap_or(Value::Null);
            match rows {
                Value::Array(items) => Value::Array(items),
                _ => Value::Array(Vec::new()),
            }
        }
        other => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{other}`"
            )));
        }
    };

    to_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    to_pretty(&json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    }))
}

fn to_pretty(value: &Value) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
