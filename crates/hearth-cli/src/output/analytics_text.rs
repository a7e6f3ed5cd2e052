use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_insights(data: &Value) -> io::Result<String> {
    let statements = data
        .get("statements")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("insights output requires statements"))?;

    let from = data.get("from").and_then(Value::as_str);
    let to = data.get("to").and_then(Value::as_str);

    let mut lines = vec![scoped_heading(
        &format!("{} insights derived", statements.len()),
        from,
        to,
    )];
    lines.push(String::new());
    for statement in statements {
        let text = statement.as_str().unwrap_or("");
        lines.push(format!("  - {text}"));
    }

    append_data_covers(&mut lines, data);
    Ok(lines.join("\n"))
}

pub fn render_summary(data: &Value) -> io::Result<String> {
    let record_count = data
        .get("record_count")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    if record_count == 0 {
        return Ok(no_records_message("compute a summary"));
    }

    let from = data.get("from").and_then(Value::as_str);
    let to = data.get("to").and_then(Value::as_str);

    let mut lines = vec![scoped_heading(
        &format!("Summary of {record_count} records"),
        from,
        to,
    )];

    lines.push(String::new());
    lines.push("Totals:".to_string());
    let totals = data.get("totals").cloned().unwrap_or(Value::Null);
    lines.extend(format::key_value_rows(
        &[
            ("Income:", format_number(totals.get("income"))),
            ("Expenses:", format_number(totals.get("expenses"))),
            ("Net balance:", format_number(totals.get("net"))),
        ],
        2,
    ));

    let by_category = data
        .get("by_category")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !by_category.is_empty() {
        lines.push(String::new());
        lines.push("Spending by category:".to_string());
        let columns = [
            Column {
                name: "Category",
                align: Align::Left,
            },
            Column {
                name: "Amount",
                align: Align::Right,
            },
            Column {
                name: "Share",
                align: Align::Right,
            },
        ];
        let rows = by_category
            .iter()
            .map(|row| {
                vec![
                    row.get("category")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    format_number(row.get("total")),
                    format!("{}%", format_share(row.get("share"))),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(&columns, &rows));
    }

    let by_period = data
        .get("by_period")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !by_period.is_empty() {
        lines.push(String::new());
        lines.push("Monthly flow:".to_string());
        let columns = [
            Column {
                name: "Month",
                align: Align::Left,
            },
            Column {
                name: "Income",
                align: Align::Right,
            },
            Column {
                name: "Expenses",
                align: Align::Right,
            },
        ];
        let rows = by_period
            .iter()
            .map(|row| {
                let expense = row.get("expense").and_then(Value::as_f64).unwrap_or(0.0);
                vec![
                    row.get("month")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    format_number(row.get("income")),
                    format!("{:.2}", expense.abs()),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(&columns, &rows));
    }

    append_data_covers(&mut lines, data);
    Ok(lines.join("\n"))
}

pub fn render_trend(data: &Value) -> io::Result<String> {
    let Some(trend) = data.get("trend").filter(|value| !value.is_null()) else {
        return Ok([
            "Not enough monthly history to compare.",
            "",
            "The trend needs records in at least two calendar months. Import",
            "more history, then rerun `hearth trend`.",
        ]
        .join("\n"));
    };

    let statement = trend
        .get("statement")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let mut lines = vec![statement.to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            (
                "Previous month:",
                format!(
                    "{} ({})",
                    trend
                        .get("previous_month")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown"),
                    format_number(trend.get("previous_expenses"))
                ),
            ),
            (
                "Latest month:",
                format!(
                    "{} ({})",
                    trend
                        .get("latest_month")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown"),
                    format_number(trend.get("latest_expenses"))
                ),
            ),
            ("Delta:", format_number(trend.get("delta"))),
        ],
        2,
    ));

    append_data_covers(&mut lines, data);
    Ok(lines.join("\n"))
}

pub fn render_recurring(data: &Value) -> io::Result<String> {
    let groups = data
        .get("groups")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if groups.is_empty() {
        return Ok([
            "No recurring patterns found.",
            "",
            "Recurring detection scans record descriptions for markers like",
            "`rent`, `bill`, `subscription`, and `salary`.",
        ]
        .join("\n"));
    }

    let from = data.get("from").and_then(Value::as_str);
    let to = data.get("to").and_then(Value::as_str);

    let mut lines = vec![scoped_heading(
        &format!("{} recurring patterns detected", groups.len()),
        from,
        to,
    )];
    lines.push(String::new());
    lines.push("Patterns:".to_string());

    let columns = [
        Column {
            name: "Description",
            align: Align::Left,
        },
        Column {
            name: "Seen",
            align: Align::Right,
        },
        Column {
            name: "Avg Amount",
            align: Align::Right,
        },
    ];
    let rows = groups
        .iter()
        .map(|row| {
            vec![
                row.get("description")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                row.get("occurrence_count")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
                format_number(row.get("mean_amount")),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table(&columns, &rows));

    lines.push(String::new());
    lines.push(format!(
        "Estimated recurring total: {} per month.",
        format_number(data.get("monthly_total"))
    ));

    Ok(lines.join("\n"))
}

fn no_records_message(action: &str) -> String {
    [
        "No records found.".to_string(),
        String::new(),
        format!("Your ledger has no imported transactions yet, so there is nothing to {action}."),
        "Run `hearth import create --help` to get started.".to_string(),
    ]
    .join("\n")
}

fn scoped_heading(lead: &str, from: Option<&str>, to: Option<&str>) -> String {
    match (from, to) {
        (Some(start), Some(end)) => format!("{lead} from {start} to {end}."),
        (Some(start), None) => format!("{lead} from {start} onward."),
        (None, Some(end)) => format!("{lead} up to {end}."),
        (None, None) => format!("{lead}."),
    }
}

fn append_data_covers(lines: &mut Vec<String>, data: &Value) {
    if let Some(range_hint) = data.get("data_range_hint") {
        let earliest = range_hint.get("earliest").and_then(Value::as_str);
        let latest = range_hint.get("latest").and_then(Value::as_str);
        if earliest.is_some() || latest.is_some() {
            lines.push(String::new());
            lines.push(format!(
                "Data covers: {} to {}",
                earliest.unwrap_or("unknown"),
                latest.unwrap_or("unknown")
            ));
        }
    }
}

fn format_number(value: Option<&Value>) -> String {
    let number = value.and_then(Value::as_f64).unwrap_or(0.0);
    format!("{number:.2}")
}

fn format_share(value: Option<&Value>) -> String {
    let number = value.and_then(Value::as_f64).unwrap_or(0.0);
    format!("{number:.1}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_insights, render_recurring, render_summary, render_trend};

    #[test]
    fn insights_render_as_bulleted_statements() {
        let payload = json!({
            "statements": ["Total income: 3000.00", "Total expenses: 300.00"],
            "from": null,
            "to": null,
            "data_range_hint": { "earliest": "2026-01-05", "latest": "2026-01-10" }
        });
        let rendered = render_insights(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("2 insights derived."));
            assert!(text.contains("  - Total income: 3000.00"));
            assert!(text.contains("Data covers: 2026-01-05 to 2026-01-10"));
        }
    }

    #[test]
    fn empty_summary_uses_plaintext_no_records_message() {
        let payload = json!({ "record_count": 0 });
        let rendered = render_summary(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("No records found."));
        }
    }

    #[test]
    fn summary_shows_absolute_monthly_expenses() {
        let payload = json!({
            "record_count": 2,
            "from": null,
            "to": null,
            "totals": { "income": 0.0, "expenses": 650.0, "net": -650.0 },
            "by_category": [],
            "by_period": [{ "month": "2026-01", "income": 0.0, "expense": -650.0 }],
            "data_range_hint": { "earliest": null, "latest": null }
        });
        let rendered = render_summary(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("650.00"));
            assert!(!text.contains("-650.00 "));
        }
    }

    #[test]
    fn missing_trend_renders_guidance_instead_of_a_table() {
        let payload = json!({ "trend": null, "period_count": 1 });
        let rendered = render_trend(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Not enough monthly history to compare."));
        }
    }

    #[test]
    fn trend_leads_with_the_directional_statement() {
        let payload = json!({
            "trend": {
                "statement": "Expenses increased by 150.00 compared to previous month.",
                "previous_month": "2026-01",
                "latest_month": "2026-02",
                "previous_expenses": 500.0,
                "latest_expenses": 650.0,
                "delta": 150.0,
                "direction": "increased"
            }
        });
        let rendered = render_trend(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Expenses increased by 150.00"));
            assert!(text.contains("2026-02 (650.00)"));
        }
    }

    #[test]
    fn empty_recurring_output_uses_plaintext_no_data_message() {
        let payload = json!({ "groups": [], "monthly_total": 0.0 });
        let rendered = render_recurring(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("No recurring patterns found."));
        }
    }

    #[test]
    fn recurring_table_ends_with_the_monthly_estimate() {
        let payload = json!({
            "from": null,
            "to": null,
            "monthly_total": 1215.0,
            "groups": [
                { "description": "Rent payment", "occurrence_count": 2, "mean_amount": 1200.0 },
                { "description": "Netflix subscription", "occurrence_count": 1, "mean_amount": 15.0 }
            ]
        });
        let rendered = render_recurring(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("2 recurring patterns detected."));
            assert!(text.contains("Rent payment"));
            assert!(text.ends_with("Estimated recurring total: 1215.00 per month."));
        }
    }
}
