use std::fs;
use std::path::{Path, PathBuf};

use crate::analytics::aggregate::{LedgerSummary, summarize};
use crate::analytics::insights::compose_insights;
use crate::analytics::query::load_records;
use crate::analytics::types::AnalyticsFilter;
use crate::commands::common::load_setup;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ReportData;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct ReportRunOptions<'a> {
    pub output: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(output: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ReportRunOptions {
        output: output.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ReportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let filter = AnalyticsFilter {
        from: None,
        to: None,
    };
    let db_path = PathBuf::from(&setup.db_path);
    let records = load_records(&db_path, &filter)?;

    let statements = compose_insights(&records);
    let summary = summarize(&records);
    let markdown = render_report_markdown(&statements, &summary);

    let report_path = match options.output {
        Some(path) => PathBuf::from(path),
        None => Path::new(&setup.ledger_home).join("output").join("report.md"),
    };
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|error| ClientError::report_write_failed(&report_path, &error.to_string()))?;
    }
    fs::write(&report_path, &markdown)
        .map_err(|error| ClientError::report_write_failed(&report_path, &error.to_string()))?;

    let data = ReportData {
        report_path: report_path.display().to_string(),
        statement_count: statements.len() as i64,
        record_count: records.len() as i64,
        statements,
    };

    success("report", data)
}

fn render_report_markdown(statements: &[String], summary: &LedgerSummary) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Household Finance Report".to_string());
    lines.push(String::new());
    lines.push("## Insights".to_string());
    for statement in statements {
        lines.push(format!("- {statement}"));
    }

    if !summary.by_category.is_empty() {
        let denominator = summary.category_total_sum();
        lines.push(String::new());
        lines.push("## Spending by Category".to_string());
        lines.push(String::new());
        lines.push("| Category | Amount | Share |".to_string());
        lines.push("| --- | ---: | ---: |".to_string());
        for entry in &summary.by_category {
            let share = if denominator > 0.0 {
                100.0 * entry.total / denominator
            } else {
                0.0
            };
            lines.push(format!(
                "| {} | {:.2} | {:.1}% |",
                entry.category, entry.total, share
            ));
        }
    }

    if !summary.by_period.is_empty() {
        lines.push(String::new());
        lines.push("## Monthly Flow".to_string());
        lines.push(String::new());
        lines.push("| Month | Income | Expenses |".to_string());
        lines.push("| --- | ---: | ---: |".to_string());
        for flow in &summary.by_period {
            lines.push(format!(
                "| {} | {:.2} | {:.2} |",
                flow.month.format("%Y-%m"),
                flow.income,
                flow.expense_abs()
            ));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}
