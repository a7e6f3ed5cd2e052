use std::path::{Path, PathBuf};

use crate::ClientResult;
use crate::analytics::date::{build_filter, format_iso_date};
use crate::analytics::insights::compose_insights;
use crate::analytics::policy::ANALYTICS_POLICY_VERSION;
use crate::analytics::query::load_records;
use crate::commands::common::{data_range_hint, load_setup};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::InsightsData;

#[derive(Debug, Default)]
pub struct InsightsRunOptions<'a> {
    pub from: Option<String>,
    pub to: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(from: Option<&str>, to: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(InsightsRunOptions {
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: InsightsRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let filter = build_filter(options.from.as_deref(), options.to.as_deref(), "insights")?;
    let db_path = PathBuf::from(&setup.db_path);
    let records = load_records(&db_path, &filter)?;
    let statements = compose_insights(&records);

    let data = InsightsData {
        from: filter.from.as_ref().map(format_iso_date),
        to: filter.to.as_ref().map(format_iso_date),
        policy_version: ANALYTICS_POLICY_VERSION.to_string(),
        record_count: records.len() as i64,
        statements,
        data_range_hint: data_range_hint(&setup.data_range),
    };

    success("insights", data)
}
