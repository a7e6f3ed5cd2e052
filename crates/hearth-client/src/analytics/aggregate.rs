use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::analytics::policy::{ANALYTICS_POLICY_V1, AnalyticsPolicy};
use crate::analytics::types::{Record, RecordKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerTotals {
    pub income: f64,
    pub expense: f64,
}

impl LedgerTotals {
    pub fn expense_abs(&self) -> f64 {
        self.expense.abs()
    }

    pub fn net(&self) -> f64 {
        self.income + self.expense
    }
}

#[derive(Debug, Clone)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct MonthlyFlow {
    pub month: NaiveDate,
    pub income: f64,
    pub expense: f64,
}

impl MonthlyFlow {
    pub fn expense_abs(&self) -> f64 {
        self.expense.abs()
    }
}

#[derive(Debug, Clone)]
pub struct LedgerSummary {
    pub record_count: usize,
    pub totals: LedgerTotals,
    pub by_category: Vec<CategoryTotal>,
    pub by_period: Vec<MonthlyFlow>,
}

impl LedgerSummary {
    /// Sum of the per-category values; the share denominator for the
    /// largest-category insight and any externally rendered breakdown.
    pub fn category_total_sum(&self) -> f64 {
        self.by_category.iter().map(|entry| entry.total).sum()
    }

    pub fn largest_category(&self) -> Option<&CategoryTotal> {
        self.by_category.first()
    }
}

pub fn summarize(records: &[Record]) -> LedgerSummary {
    summarize_with_policy(records, ANALYTICS_POLICY_V1)
}

pub fn summarize_with_policy(records: &[Record], policy: AnalyticsPolicy) -> LedgerSummary {
    LedgerSummary {
        record_count: records.len(),
        totals: compute_totals(records),
        by_category: expense_totals_by_category(records),
        by_period: flows_by_period(records, policy),
    }
}

fn compute_totals(records: &[Record]) -> LedgerTotals {
    let mut totals = LedgerTotals::default();
    for record in records {
        match record.kind {
            Some(RecordKind::Income) => totals.income += record.amount,
            Some(RecordKind::Expense) => totals.expense += record.amount,
            None => {}
        }
    }
    totals
}

struct CategoryAccumulator {
    label: String,
    signed_sum: f64,
}

fn expense_totals_by_category(records: &[Record]) -> Vec<CategoryTotal> {
    let mut accumulators: Vec<CategoryAccumulator> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for record in records {
        if !record.is_expense() {
            continue;
        }

        let label = record.category.trim();
        let key = label.to_lowercase();
        match index_by_key.get(&key) {
            Some(&index) => accumulators[index].signed_sum += record.amount,
            None => {
                index_by_key.insert(key, accumulators.len());
                accumulators.push(CategoryAccumulator {
                    label: label.to_string(),
                    signed_sum: record.amount,
                });
            }
        }
    }

    let mut totals = accumulators
        .into_iter()
        .map(|accumulator| CategoryTotal {
            category: accumulator.label,
            total: accumulator.signed_sum.abs(),
        })
        .collect::<Vec<CategoryTotal>>();

    // Accumulators are in first-seen input order, so a stable descending
    // sort keeps ties ranked by first appearance.
    totals.sort_by(|left, right| right.total.total_cmp(&left.total));
    totals
}

fn flows_by_period(records: &[Record], policy: AnalyticsPolicy) -> Vec<MonthlyFlow> {
    let mut months: BTreeMap<NaiveDate, MonthlyFlow> = BTreeMap::new();

    for record in records {
        let Some(kind) = record.kind else {
            continue;
        };

        let month = policy.period_granularity.bucket_start(record.date);
        let entry = months.entry(month).or_insert(MonthlyFlow {
            month,
            income: 0.0,
            expense: 0.0,
        });
        match kind {
            RecordKind::Income => entry.income += record.amount,
            RecordKind::Expense => entry.expense += record.amount,
        }
    }

    months.into_values().collect()
}
