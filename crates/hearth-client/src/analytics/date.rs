use chrono::{Datelike, NaiveDate};

use crate::analytics::types::AnalyticsFilter;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodGranularity {
    Monthly,
}

impl PeriodGranularity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
        }
    }

    /// First day of the bucket containing `date`.
    pub fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Monthly => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
            }
        }
    }
}

pub fn build_filter(
    from: Option<&str>,
    to: Option<&str>,
    command: &str,
) -> ClientResult<AnalyticsFilter> {
    let parsed_from = from
        .map(|value| parse_iso_date_strict(value, "from", command))
        .transpose()?;
    let parsed_to = to
        .map(|value| parse_iso_date_strict(value, "to", command))
        .transpose()?;

    if let (Some(start), Some(end)) = (parsed_from, parsed_to)
        && start > end
    {
        return Err(ClientError::invalid_argument_for_command(
            "Invalid date range: `from` must be on or before `to`.",
            Some(command),
        ));
    }

    Ok(AnalyticsFilter {
        from: parsed_from,
        to: parsed_to,
    })
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_month(date: &NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Lenient variant for stored rows: a malformed date yields `None` so the
/// loader can skip the row instead of failing the batch.
pub fn parse_transaction_date(value: &str) -> Option<NaiveDate> {
    if !is_iso_shaped(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_iso_date_strict(value: &str, field_name: &str, command: &str) -> ClientResult<NaiveDate> {
    if is_iso_shaped(value)
        && let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
    {
        return Ok(date);
    }

    Err(ClientError::invalid_argument_for_command(
        &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
        Some(command),
    ))
}

// chrono's %Y accepts variable-width years, so the shape is pinned to ten
// bytes before the parser sees the value.
fn is_iso_shaped(value: &str) -> bool {
    value.len() == 10
        && value.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}
