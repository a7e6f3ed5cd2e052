use std::collections::BTreeMap;

use crate::analytics::policy::{ANALYTICS_POLICY_V1, AnalyticsPolicy};
use crate::analytics::types::Record;

/// One recurring obligation, keyed by its exact description string.
#[derive(Debug, Clone)]
pub struct RecurringGroup {
    pub description: String,
    pub occurrence_count: i64,
    pub mean_amount: f64,
}

#[derive(Debug, Clone)]
pub struct RecurringEstimate {
    pub monthly_total: f64,
    pub groups: Vec<RecurringGroup>,
}

pub fn estimate_recurring(records: &[Record]) -> Option<RecurringEstimate> {
    estimate_recurring_with_policy(records, ANALYTICS_POLICY_V1)
}

/// Heuristic estimator: each distinct matching description is assumed to
/// recur roughly once per month, contributing the mean of its absolute
/// amounts. Not a recurrence-schedule reconstruction.
pub fn estimate_recurring_with_policy(
    records: &[Record],
    policy: AnalyticsPolicy,
) -> Option<RecurringEstimate> {
    let mut amounts_by_description: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for record in records {
        if !policy.matches_recurring_marker(&record.description) {
            continue;
        }
        amounts_by_description
            .entry(record.description.clone())
            .or_default()
            .push(record.abs_amount());
    }

    if amounts_by_description.is_empty() {
        return None;
    }

    let mut groups: Vec<RecurringGroup> = Vec::new();
    let mut monthly_total = 0.0;
    for (description, amounts) in amounts_by_description {
        let mean = mean_f64(&amounts).unwrap_or(0.0);
        monthly_total += mean;
        groups.push(RecurringGroup {
            description,
            occurrence_count: amounts.len() as i64,
            mean_amount: mean,
        });
    }

    groups.sort_by(|left, right| {
        right
            .mean_amount
            .total_cmp(&left.mean_amount)
            .then_with(|| left.description.cmp(&right.description))
    });

    Some(RecurringEstimate {
        monthly_total,
        groups,
    })
}

fn mean_f64(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / (values.len() as f64))
}

pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let exponent = i32::try_from(decimals).unwrap_or(2);
    let factor = 10_f64.powi(exponent);
    (value * factor).round() / factor
}
