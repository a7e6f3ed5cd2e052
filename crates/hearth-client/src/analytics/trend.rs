use chrono::NaiveDate;

use crate::analytics::aggregate::MonthlyFlow;
use crate::analytics::policy::{ANALYTICS_POLICY_V1, AnalyticsPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increased,
    Decreased,
    Unchanged,
}

impl TrendDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increased => "increased",
            Self::Decreased => "decreased",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Month-over-month expense comparison between the two most recent
/// periods. Amounts are absolute expense totals; income is out of scope.
#[derive(Debug, Clone, Copy)]
pub struct ExpenseTrend {
    pub latest_month: NaiveDate,
    pub previous_month: NaiveDate,
    pub latest_expenses: f64,
    pub previous_expenses: f64,
    pub direction: TrendDirection,
}

impl ExpenseTrend {
    pub fn delta(&self) -> f64 {
        self.latest_expenses - self.previous_expenses
    }

    pub fn magnitude(&self) -> f64 {
        self.delta().abs()
    }

    pub fn statement(&self) -> String {
        match self.direction {
            TrendDirection::Increased => format!(
                "Expenses increased by {:.2} compared to previous month.",
                self.magnitude()
            ),
            TrendDirection::Decreased => format!(
                "Expenses decreased by {:.2} compared to previous month.",
                self.magnitude()
            ),
            TrendDirection::Unchanged => "Expenses unchanged vs previous month.".to_string(),
        }
    }
}

pub fn compare_recent_months(by_period: &[MonthlyFlow]) -> Option<ExpenseTrend> {
    compare_recent_months_with_policy(by_period, ANALYTICS_POLICY_V1)
}

pub fn compare_recent_months_with_policy(
    by_period: &[MonthlyFlow],
    policy: AnalyticsPolicy,
) -> Option<ExpenseTrend> {
    if by_period.len() < policy.trend_min_periods {
        return None;
    }

    let [.., previous, latest] = by_period else {
        return None;
    };
    let latest_expenses = latest.expense_abs();
    let previous_expenses = previous.expense_abs();
    let delta = latest_expenses - previous_expenses;

    let direction = if delta > 0.0 {
        TrendDirection::Increased
    } else if delta < 0.0 {
        TrendDirection::Decreased
    } else {
        TrendDirection::Unchanged
    };

    Some(ExpenseTrend {
        latest_month: latest.month,
        previous_month: previous.month,
        latest_expenses,
        previous_expenses,
        direction,
    })
}
