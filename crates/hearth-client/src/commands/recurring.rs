use std::path::{Path, PathBuf};

use crate::ClientResult;
use crate::analytics::date::{build_filter, format_iso_date};
use crate::analytics::policy::{ANALYTICS_POLICY_V1, ANALYTICS_POLICY_VERSION};
use crate::analytics::query::load_records;
use crate::analytics::recurring::{estimate_recurring, round_to};
use crate::commands::common::{data_range_hint, load_setup};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RecurringData, RecurringGroupRow};

#[derive(Debug, Default)]
pub struct RecurringRunOptions<'a> {
    pub from: Option<String>,
    pub to: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(from: Option<&str>, to: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(RecurringRunOptions {
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: RecurringRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let filter = build_filter(options.from.as_deref(), options.to.as_deref(), "recurring")?;
    let db_path = PathBuf::from(&setup.db_path);
    let records = load_records(&db_path, &filter)?;

    let (monthly_total, groups) = match estimate_recurring(&records) {
        Some(estimate) => {
            let rows = estimate
                .groups
                .iter()
                .map(|group| RecurringGroupRow {
                    description: group.description.clone(),
                    occurrence_count: group.occurrence_count,
                    mean_amount: round_to(group.mean_amount, 2),
                })
                .collect::<Vec<RecurringGroupRow>>();
            (round_to(estimate.monthly_total, 2), rows)
        }
        None => (0.0, Vec::new()),
    };

    let data = RecurringData {
        from: filter.from.as_ref().map(format_iso_date),
        to: filter.to.as_ref().map(format_iso_date),
        policy_version: ANALYTICS_POLICY_VERSION.to_string(),
        markers: ANALYTICS_POLICY_V1
            .recurring_markers
            .iter()
            .map(|marker| (*marker).to_string())
            .collect(),
        monthly_total,
        groups,
        data_range_hint: data_range_hint(&setup.data_range),
    };

    success("recurring", data)
}
