use crate::analytics::aggregate::summarize_with_policy;
use crate::analytics::policy::{ANALYTICS_POLICY_V1, AnalyticsPolicy};
use crate::analytics::recurring::estimate_recurring_with_policy;
use crate::analytics::trend::compare_recent_months_with_policy;
use crate::analytics::types::Record;

pub const EMPTY_DATASET_STATEMENT: &str = "No data available. Please load transactions first.";

pub fn compose_insights(records: &[Record]) -> Vec<String> {
    compose_insights_with_policy(records, ANALYTICS_POLICY_V1)
}

/// Ordered, conditionally emitted statements. Aggregates are computed once
/// and shared across the category, trend, and recurring steps so every
/// statement agrees with the summary a renderer would chart.
pub fn compose_insights_with_policy(records: &[Record], policy: AnalyticsPolicy) -> Vec<String> {
    if records.is_empty() {
        return vec![EMPTY_DATASET_STATEMENT.to_string()];
    }

    let summary = summarize_with_policy(records, policy);
    let mut statements = vec![
        format!("Total income: {:.2}", summary.totals.income),
        format!("Total expenses: {:.2}", summary.totals.expense_abs()),
        format!("Net balance: {:.2}", summary.totals.net()),
    ];

    if let Some(top) = summary.largest_category() {
        let denominator = summary.category_total_sum();
        let share = if denominator > 0.0 {
            100.0 * top.total / denominator
        } else {
            0.0
        };
        statements.push(format!(
            "Largest expense category: {} ({:.2}, {:.1}% of expenses)",
            top.category, top.total, share
        ));
    }

    if let Some(trend) = compare_recent_months_with_policy(&summary.by_period, policy) {
        statements.push(trend.statement());
    }

    if let Some(recurring) = estimate_recurring_with_policy(records, policy) {
        statements.push(format!(
            "Approx recurring (avg by description): {:.2} per month.",
            recurring.monthly_total
        ));
    }

    statements
}
