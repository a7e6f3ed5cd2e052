use std::fs;
use std::path::{Path, PathBuf};

use hearth_client::commands::import::{self, ImportRunOptions};
use hearth_client::commands::insights::{self, InsightsRunOptions};
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("ledger-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

/// One CSV line per record: (date, category, description, amount, type).
pub fn csv_content(rows: &[(&str, &str, &str, f64, &str)]) -> String {
    let mut body = String::from("date,category,description,amount,type\n");
    for (date, category, description, amount, record_type) in rows {
        body.push_str(&format!(
            "{date},{category},{description},{amount},{record_type}\n"
        ));
    }
    body
}

pub fn import_rows(home: &Path, rows: &[(&str, &str, &str, f64, &str)]) {
    import_content(home, &csv_content(rows), false);
}

pub fn import_rows_replacing(home: &Path, rows: &[(&str, &str, &str, f64, &str)]) {
    import_content(home, &csv_content(rows), true);
}

pub fn import_content(home: &Path, content: &str, replace: bool) {
    let result = import_content_result(home, content, replace, false);
    assert!(result.is_ok());
}

pub fn import_content_result(
    home: &Path,
    content: &str,
    replace: bool,
    dry_run: bool,
) -> hearth_client::ClientResult<hearth_client::SuccessEnvelope> {
    let temp_dir = Builder::new()
        .prefix("hearth-import-fixture")
        .tempdir_in("/tmp");
    assert!(temp_dir.is_ok());
    let Ok(dir) = temp_dir else {
        return Err(hearth_client::ClientError::invalid_argument(
            "fixture directory unavailable",
        ));
    };

    let fixture = write_fixture(dir.path(), "rows.csv", content);
    assert!(fixture.is_ok());
    let Ok(path) = fixture else {
        return Err(hearth_client::ClientError::invalid_argument(
            "fixture file unavailable",
        ));
    };

    import::run_with_options(ImportRunOptions {
        path: Some(path.display().to_string()),
        dry_run,
        replace,
        home_override: Some(home),
        stdin_override: Some(String::new()),
    })
}

pub fn insights_payload(home: &Path, from: Option<&str>, to: Option<&str>) -> Value {
    let result = insights::run_with_options(InsightsRunOptions {
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        home_override: Some(home),
    });
    assert!(result.is_ok());
    if let Ok(success) = result {
        let payload = serde_json::to_value(success);
        assert!(payload.is_ok());
        if let Ok(value) = payload {
            return value;
        }
    }
    Value::Null
}

pub fn insight_statements(home: &Path, from: Option<&str>, to: Option<&str>) -> Vec<String> {
    insights_payload(home, from, to)["data"]["statements"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|row| row.as_str().unwrap_or("").to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn write_fixture(base: &Path, name: &str, content: &str) -> std::io::Result<PathBuf> {
    let path = base.join(name);
    fs::write(&path, content)?;
    Ok(path)
}
