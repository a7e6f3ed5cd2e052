use std::io;

use serde_json::Value;

use super::format;

pub fn render_report(data: &Value) -> io::Result<String> {
    let report_path = data
        .get("report_path")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("report output requires a report path"))?;

    let mut lines = vec!["Report written.".to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Path:", report_path.to_string()),
            (
                "Insights:",
                data.get("statement_count")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
            ),
            (
                "Records:",
                data.get("record_count")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
            ),
        ],
        2,
    ));

    Ok(lines.join("\n"))
}
