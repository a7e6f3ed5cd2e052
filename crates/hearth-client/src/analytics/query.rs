use std::path::Path;

use rusqlite::params;
use rusqlite::types::Value as SqlValue;

use crate::ClientResult;
use crate::analytics::date::{format_iso_date, parse_transaction_date};
use crate::analytics::types::{AnalyticsFilter, Record, RecordKind};
use crate::state::{map_sqlite_error, open_connection};

/// The single "fetch all records" store contract. Malformed rows (bad
/// date, missing type, non-numeric amount) are skipped, never fatal.
pub fn load_records(db_path: &Path, filter: &AnalyticsFilter) -> ClientResult<Vec<Record>> {
    let connection = open_connection(db_path)?;
    let mut statement = connection
        .prepare(
            "SELECT
                date,
                category,
                description,
                amount,
                type
             FROM internal_records
             WHERE (?1 IS NULL OR date >= ?1)
               AND (?2 IS NULL OR date <= ?2)
             ORDER BY date ASC, record_id ASC",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let from_bound = filter.from.as_ref().map(format_iso_date);
    let to_bound = filter.to.as_ref().map(format_iso_date);

    let rows_iter = statement
        .query_map(params![from_bound, to_bound], |row| {
            let date: Option<String> = row.get(0)?;
            let category: Option<String> = row.get(1)?;
            let description: Option<String> = row.get(2)?;
            let amount: SqlValue = row.get(3)?;
            let record_type: Option<String> = row.get(4)?;
            Ok((date, category, description, amount, record_type))
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut records: Vec<Record> = Vec::new();
    for row in rows_iter {
        let (date, category, description, amount, record_type) =
            row.map_err(|error| map_sqlite_error(db_path, &error))?;

        let Some(parsed_date) = date.as_deref().and_then(parse_transaction_date) else {
            continue;
        };
        let Some(type_value) = record_type.filter(|value| !value.trim().is_empty()) else {
            continue;
        };
        let Some(parsed_amount) = numeric_amount(&amount) else {
            continue;
        };

        records.push(Record {
            date: parsed_date,
            category: category.map(|value| value.trim().to_string()).unwrap_or_default(),
            description: description
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
            amount: parsed_amount,
            kind: RecordKind::parse(&type_value),
        });
    }

    Ok(records)
}

// SQLite column affinity does not stop a REAL column from holding text, so
// the amount is read as a raw value and coerced here.
fn numeric_amount(value: &SqlValue) -> Option<f64> {
    match value {
        SqlValue::Real(amount) => Some(*amount),
        SqlValue::Integer(amount) => Some(*amount as f64),
        SqlValue::Text(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        SqlValue::Blob(_) | SqlValue::Null => None,
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value as SqlValue;

    use super::numeric_amount;

    #[test]
    fn numeric_amounts_accept_real_integer_and_parseable_text() {
        assert_eq!(numeric_amount(&SqlValue::Real(-42.15)), Some(-42.15));
        assert_eq!(numeric_amount(&SqlValue::Integer(7)), Some(7.0));
        assert_eq!(
            numeric_amount(&SqlValue::Text("-12.50".to_string())),
            Some(-12.5)
        );
    }

    #[test]
    fn non_numeric_amounts_are_rejected() {
        assert_eq!(numeric_amount(&SqlValue::Null), None);
        assert_eq!(numeric_amount(&SqlValue::Text("twelve".to_string())), None);
        assert_eq!(numeric_amount(&SqlValue::Text("nan".to_string())), None);
    }
}
