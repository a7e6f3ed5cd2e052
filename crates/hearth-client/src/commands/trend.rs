use std::path::{Path, PathBuf};

use crate::ClientResult;
use crate::analytics::aggregate::summarize;
use crate::analytics::date::{build_filter, format_iso_date, format_month};
use crate::analytics::query::load_records;
use crate::analytics::recurring::round_to;
use crate::analytics::trend::compare_recent_months;
use crate::commands::common::{data_range_hint, load_setup};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TrendData, TrendRow};

#[derive(Debug, Default)]
pub struct TrendRunOptions<'a> {
    pub from: Option<String>,
    pub to: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(from: Option<&str>, to: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(TrendRunOptions {
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: TrendRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let filter = build_filter(options.from.as_deref(), options.to.as_deref(), "trend")?;
    let db_path = PathBuf::from(&setup.db_path);
    let records = load_records(&db_path, &filter)?;
    let summary = summarize(&records);

    let trend = compare_recent_months(&summary.by_period).map(|comparison| TrendRow {
        latest_month: format_month(&comparison.latest_month),
        previous_month: format_month(&comparison.previous_month),
        latest_expenses: round_to(comparison.latest_expenses, 2),
        previous_expenses: round_to(comparison.previous_expenses, 2),
        delta: round_to(comparison.delta(), 2),
        direction: comparison.direction.as_str().to_string(),
        statement: comparison.statement(),
    });

    let data = TrendData {
        from: filter.from.as_ref().map(format_iso_date),
        to: filter.to.as_ref().map(format_iso_date),
        period_count: summary.by_period.len() as i64,
        trend,
        data_range_hint: data_range_hint(&setup.data_range),
    };

    success("trend", data)
}
