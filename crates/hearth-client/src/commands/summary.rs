use std::path::{Path, PathBuf};

use crate::ClientResult;
use crate::analytics::aggregate::{LedgerSummary, summarize};
use crate::analytics::date::{build_filter, format_iso_date, format_month};
use crate::analytics::query::load_records;
use crate::analytics::recurring::round_to;
use crate::commands::common::{data_range_hint, load_setup};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategoryRow, PeriodRow, SummaryData, SummaryTotals};

#[derive(Debug, Default)]
pub struct SummaryRunOptions<'a> {
    pub from: Option<String>,
    pub to: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(from: Option<&str>, to: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SummaryRunOptions {
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SummaryRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let filter = build_filter(options.from.as_deref(), options.to.as_deref(), "summary")?;
    let db_path = PathBuf::from(&setup.db_path);
    let records = load_records(&db_path, &filter)?;
    let summary = summarize(&records);

    let data = SummaryData {
        from: filter.from.as_ref().map(format_iso_date),
        to: filter.to.as_ref().map(format_iso_date),
        record_count: summary.record_count as i64,
        totals: SummaryTotals {
            income: round_to(summary.totals.income, 2),
            expenses: round_to(summary.totals.expense_abs(), 2),
            net: round_to(summary.totals.net(), 2),
        },
        by_category: category_rows(&summary),
        by_period: period_rows(&summary),
        data_range_hint: data_range_hint(&setup.data_range),
    };

    success("summary", data)
}

fn category_rows(summary: &LedgerSummary) -> Vec<CategoryRow> {
    let denominator = summary.category_total_sum();
    summary
        .by_category
        .iter()
        .map(|entry| {
            let share = if denominator > 0.0 {
                100.0 * entry.total / denominator
            } else {
                0.0
            };
            CategoryRow {
                category: entry.category.clone(),
                total: round_to(entry.total, 2),
                share: round_to(share, 1),
            }
        })
        .collect()
}

fn period_rows(summary: &LedgerSummary) -> Vec<PeriodRow> {
    summary
        .by_period
        .iter()
        .map(|flow| PeriodRow {
            month: format_month(&flow.month),
            income: round_to(flow.income, 2),
            expense: round_to(flow.expense, 2),
        })
        .collect()
}
