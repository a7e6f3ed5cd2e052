use std::collections::HashSet;

use crate::ClientResult;
use crate::analytics::date::parse_transaction_date;
use crate::analytics::types::RecordKind;
use crate::contracts::types::{ImportIssue, ImportSummary, ImportWarning};
use crate::error::ClientError;
use crate::import::CanonicalRecord;
use crate::import::parse::ParsedRow;

#[derive(Debug, Clone)]
pub(crate) struct ValidatedRows {
    pub(crate) rows: Vec<CanonicalRecord>,
    pub(crate) summary: ImportSummary,
    pub(crate) warnings: Vec<ImportWarning>,
}

/// All-or-nothing validation: a single bad row fails the whole batch with
/// the full issue list, so a committed import never contains repaired or
/// partially accepted data. Unrecognized types are warned, not rejected.
pub(crate) fn validate_rows(parsed_rows: Vec<ParsedRow>) -> ClientResult<ValidatedRows> {
    let total_rows = parsed_rows.len();
    let mut rows = Vec::new();
    let mut issues = Vec::new();
    let mut unrecognized_types: Vec<String> = Vec::new();
    let mut seen_unrecognized: HashSet<String> = HashSet::new();

    for raw in parsed_rows {
        let mut row_issues = Vec::new();

        let date = check_date(raw.row, raw.date, &mut row_issues);
        let category = check_text(raw.row, "category", raw.category, &mut row_issues);
        let description = check_text(raw.row, "description", raw.description, &mut row_issues);
        let amount = check_amount(raw.row, raw.amount, &mut row_issues);
        let record_type = check_text(raw.row, "type", raw.record_type, &mut row_issues);

        if !row_issues.is_empty() {
            issues.extend(row_issues);
            continue;
        }

        if let Some(type_value) = record_type.as_ref()
            && RecordKind::parse(type_value).is_none()
            && seen_unrecognized.insert(type_value.to_lowercase())
        {
            unrecognized_types.push(type_value.clone());
        }

        rows.push(CanonicalRecord {
            date: date.unwrap_or_default(),
            category: category.unwrap_or_default(),
            description: description.unwrap_or_default(),
            amount: amount.unwrap_or_default(),
            record_type: record_type.unwrap_or_default(),
        });
    }

    let invalid_rows = issues
        .iter()
        .map(|issue| issue.row)
        .collect::<HashSet<i64>>();
    let summary = ImportSummary {
        rows_read: total_rows as i64,
        rows_valid: rows.len() as i64,
        rows_invalid: invalid_rows.len() as i64,
        inserted: 0,
        replaced_prior_rows: 0,
    };

    if !issues.is_empty() {
        return Err(ClientError::import_validation_failed(summary, issues));
    }

    let warnings = unrecognized_types
        .into_iter()
        .map(|value| ImportWarning {
            code: "unrecognized_type".to_string(),
            message: format!(
                "Type `{value}` is neither income nor expense; its rows are stored but excluded from typed aggregates."
            ),
        })
        .collect();

    Ok(ValidatedRows {
        rows,
        summary,
        warnings,
    })
}

fn check_text(
    row: i64,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<String> {
    let trimmed = non_blank(value);
    if trimmed.is_none() {
        issues.push(missing_field_issue(row, field, "non-empty string"));
    }
    trimmed
}

fn check_date(row: i64, value: Option<String>, issues: &mut Vec<ImportIssue>) -> Option<String> {
    let Some(candidate) = non_blank(value) else {
        issues.push(missing_field_issue(row, "date", "YYYY-MM-DD"));
        return None;
    };

    if parse_transaction_date(&candidate).is_some() {
        return Some(candidate);
    }

    issues.push(ImportIssue {
        row,
        field: "date".to_string(),
        code: "invalid_date".to_string(),
        description: format!("date must be a real YYYY-MM-DD calendar date; got \"{candidate}\""),
        expected: Some("YYYY-MM-DD".to_string()),
        received: Some(candidate),
    });
    None
}

fn check_amount(row: i64, value: Option<String>, issues: &mut Vec<ImportIssue>) -> Option<f64> {
    let Some(candidate) = non_blank(value) else {
        issues.push(missing_field_issue(row, "amount", "number (e.g. -42.15)"));
        return None;
    };

    match candidate.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Some(amount),
        _ => {
            issues.push(ImportIssue {
                row,
                field: "amount".to_string(),
                code: "invalid_number".to_string(),
                description: format!("amount must be numeric; got \"{candidate}\""),
                expected: Some("number (e.g. -42.15)".to_string()),
                received: Some(candidate),
            });
            None
        }
    }
}

fn missing_field_issue(row: i64, field: &str, expected: &str) -> ImportIssue {
    ImportIssue {
        row,
        field: field.to_string(),
        code: "missing_required_field".to_string(),
        description: format!("{field} must be present and non-empty."),
        expected: Some(expected.to_string()),
        received: Some(String::new()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use crate::import::parse::ParsedRow;

    use super::validate_rows;

    fn row(
        index: i64,
        date: Option<&str>,
        category: Option<&str>,
        description: Option<&str>,
        amount: Option<&str>,
        record_type: Option<&str>,
    ) -> ParsedRow {
        ParsedRow {
            row: index,
            date: date.map(str::to_string),
            category: category.map(str::to_string),
            description: description.map(str::to_string),
            amount: amount.map(str::to_string),
            record_type: record_type.map(str::to_string),
        }
    }

    #[test]
    fn fully_valid_rows_pass_with_counts() {
        let rows = vec![
            row(
                1,
                Some("2026-01-15"),
                Some("Groceries"),
                Some("Market"),
                Some("-42.15"),
                Some("expense"),
            ),
            row(
                2,
                Some("2026-01-16"),
                Some("Salary"),
                Some("Monthly salary"),
                Some("3000"),
                Some("Income"),
            ),
        ];
        let validated = validate_rows(rows);
        assert!(validated.is_ok());
        if let Ok(result) = validated {
            assert_eq!(result.summary.rows_read, 2);
            assert_eq!(result.summary.rows_valid, 2);
            assert_eq!(result.summary.rows_invalid, 0);
            assert!(result.warnings.is_empty());
        }
    }

    #[test]
    fn any_invalid_row_fails_the_whole_batch_with_issues() {
        let rows = vec![
            row(
                1,
                Some("2026-01-15"),
                Some("Groceries"),
                Some("Market"),
                Some("-42.15"),
                Some("expense"),
            ),
            row(
                2,
                Some("15/01/2026"),
                Some("Groceries"),
                Some("Market"),
                Some("abc"),
                None,
            ),
        ];
        let validated = validate_rows(rows);
        assert!(validated.is_err());
        if let Err(error) = validated {
            assert_eq!(error.code, "import_validation_failed");
            assert!(error.message.contains("1 rows need fixes"));
        }
    }

    #[test]
    fn impossible_calendar_dates_are_invalid() {
        let rows = vec![row(
            1,
            Some("2026-02-31"),
            Some("Groceries"),
            Some("Market"),
            Some("-42.15"),
            Some("expense"),
        )];
        assert!(validate_rows(rows).is_err());
    }

    #[test]
    fn unrecognized_types_warn_once_per_value_but_import() {
        let rows = vec![
            row(
                1,
                Some("2026-01-15"),
                Some("Misc"),
                Some("Move to savings"),
                Some("-100"),
                Some("transfer"),
            ),
            row(
                2,
                Some("2026-01-16"),
                Some("Misc"),
                Some("Move to savings"),
                Some("-100"),
                Some("Transfer"),
            ),
        ];
        let validated = validate_rows(rows);
        assert!(validated.is_ok());
        if let Ok(result) = validated {
            assert_eq!(result.summary.rows_valid, 2);
            assert_eq!(result.warnings.len(), 1);
            assert_eq!(result.warnings[0].code, "unrecognized_type");
        }
    }

    #[test]
    fn non_finite_amounts_are_invalid() {
        let rows = vec![row(
            1,
            Some("2026-01-15"),
            Some("Misc"),
            Some("Weird"),
            Some("inf"),
            Some("expense"),
        )];
        assert!(validate_rows(rows).is_err());
    }
}
