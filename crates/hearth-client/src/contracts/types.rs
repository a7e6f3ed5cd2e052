use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DataRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataRangeHint {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightsData {
    pub from: Option<String>,
    pub to: Option<String>,
    pub policy_version: String,
    pub record_count: i64,
    pub statements: Vec<String>,
    pub data_range_hint: DataRangeHint,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryTotals {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub total: f64,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodRow {
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub from: Option<String>,
    pub to: Option<String>,
    pub record_count: i64,
    pub totals: SummaryTotals,
    pub by_category: Vec<CategoryRow>,
    pub by_period: Vec<PeriodRow>,
    pub data_range_hint: DataRangeHint,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendRow {
    pub latest_month: String,
    pub previous_month: String,
    pub latest_expenses: f64,
    pub previous_expenses: f64,
    pub delta: f64,
    pub direction: String,
    pub statement: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendData {
    pub from: Option<String>,
    pub to: Option<String>,
    pub period_count: i64,
    pub trend: Option<TrendRow>,
    pub data_range_hint: DataRangeHint,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringGroupRow {
    pub description: String,
    pub occurrence_count: i64,
    pub mean_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringData {
    pub from: Option<String>,
    pub to: Option<String>,
    pub policy_version: String,
    pub markers: Vec<String>,
    pub monthly_total: f64,
    pub groups: Vec<RecurringGroupRow>,
    pub data_range_hint: DataRangeHint,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
    pub inserted: i64,
    pub replaced_prior_rows: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportWarning {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportNextStep {
    pub label: String,
    pub command: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportAction {
    pub label: String,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportData {
    pub dry_run: bool,
    pub replace: bool,
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,
    pub message: String,
    pub summary: ImportSummary,
    pub warnings: Vec<ImportWarning>,
    pub next_step: ImportNextStep,
    pub other_actions: Vec<ImportAction>,
    pub data_range_hint: DataRangeHint,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportListItem {
    pub import_id: String,
    pub status: String,
    pub created_at: String,
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
    pub inserted: i64,
    pub replaced_prior_rows: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportListData {
    pub rows: Vec<ImportListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub report_path: String,
    pub statement_count: i64,
    pub record_count: i64,
    pub statements: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoData {
    pub source: String,
    pub record_count: i64,
    pub statements: Vec<String>,
}
