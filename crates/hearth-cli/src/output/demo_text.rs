use std::io;

use serde_json::Value;

pub fn render_demo(data: &Value) -> io::Result<String> {
    let statements = data
        .get("statements")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("demo output requires statements"))?;
    let record_count = data
        .get("record_count")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    let mut lines = vec![
        format!("Demo insights from {record_count} bundled sample records."),
        String::new(),
    ];
    for statement in statements {
        let text = statement.as_str().unwrap_or("");
        lines.push(format!("  - {text}"));
    }
    lines.push(String::new());
    lines.push("Ready for your own data? Run `hearth import create --help`.".to_string());

    Ok(lines.join("\n"))
}
