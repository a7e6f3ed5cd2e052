use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_import_run(data: &Value) -> io::Result<String> {
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("import output requires a message"))?;

    let summary = data.get("summary").cloned().unwrap_or(Value::Null);
    let mut lines = vec![message.to_string(), String::new(), "Summary:".to_string()];
    let mut entries = vec![
        ("Rows read:", count(summary.get("rows_read"))),
        ("Rows valid:", count(summary.get("rows_valid"))),
        ("Rows invalid:", count(summary.get("rows_invalid"))),
        ("Inserted:", count(summary.get("inserted"))),
    ];
    let replaced = summary
        .get("replaced_prior_rows")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    if replaced > 0 {
        entries.push(("Replaced prior rows:", replaced.to_string()));
    }
    if let Some(import_id) = data.get("import_id").and_then(Value::as_str) {
        entries.push(("Import id:", import_id.to_string()));
    }
    lines.extend(format::key_value_rows(&entries, 2));

    let warnings = data
        .get("warnings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings:".to_string());
        for warning in &warnings {
            let text = warning
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown warning");
            lines.push(format!("  - {text}"));
        }
    }

    if let Some(next_step) = data.get("next_step") {
        let label = next_step.get("label").and_then(Value::as_str).unwrap_or("");
        let command = next_step
            .get("command")
            .and_then(Value::as_str)
            .unwrap_or("");
        if !label.is_empty() && !command.is_empty() {
            lines.push(String::new());
            lines.push("What to do next:".to_string());
            lines.push(format!("  {label}: `{command}`"));
        }
    }

    let other_actions = data
        .get("other_actions")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    for action in &other_actions {
        let label = action.get("label").and_then(Value::as_str).unwrap_or("");
        let command = action.get("command").and_then(Value::as_str).unwrap_or("");
        if !label.is_empty() && !command.is_empty() {
            lines.push(format!("  {label}: `{command}`"));
        }
    }

    Ok(lines.join("\n"))
}

pub fn render_import_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("import list output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No imports recorded.",
            "",
            "Run `hearth import create <path>` to load your first batch.",
        ]
        .join("\n"));
    }

    let mut lines = vec![format!("{} imports recorded.", rows.len()), String::new()];

    let columns = [
        Column {
            name: "Import Id",
            align: Align::Left,
        },
        Column {
            name: "Status",
            align: Align::Left,
        },
        Column {
            name: "Read",
            align: Align::Right,
        },
        Column {
            name: "Inserted",
            align: Align::Right,
        },
        Column {
            name: "Replaced",
            align: Align::Right,
        },
        Column {
            name: "Source",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                row.get("import_id")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                row.get("status")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                count(row.get("rows_read")),
                count(row.get("inserted")),
                count(row.get("replaced_prior_rows")),
                row.get("source_ref")
                    .and_then(Value::as_str)
                    .or_else(|| row.get("source_kind").and_then(Value::as_str))
                    .unwrap_or("unknown")
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table(&columns, &table_rows));

    Ok(lines.join("\n"))
}

fn count(value: Option<&Value>) -> String {
    value.and_then(Value::as_i64).unwrap_or(0).to_string()
}
