use std::collections::HashMap;

use serde_json::Value;

use crate::import::invalid_input_error;
use crate::{ClientError, ClientResult};

pub(crate) const REQUIRED_IMPORT_HEADERS: [&str; 5] =
    ["date", "category", "description", "amount", "type"];

#[derive(Debug, Clone)]
pub(crate) struct ParsedRow {
    pub(crate) row: i64,
    pub(crate) date: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) amount: Option<String>,
    pub(crate) record_type: Option<String>,
}

pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Import source is empty."));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if trimmed.starts_with('{') {
        if looks_like_ndjson(trimmed) {
            return Err(ClientError::invalid_import_format(
                "NDJSON is not supported. Provide a JSON array or CSV.",
                "ndjson",
            ));
        }
        return Err(ClientError::invalid_import_format(
            "JSON input must be a top-level array of transaction objects.",
            "json_non_array",
        ));
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    Err(ClientError::invalid_import_format(
        "Unsupported import format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of transaction objects.",
        ));
    };

    let mut rows = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                "JSON array entries must all be objects with transaction fields.",
            ));
        };

        rows.push(ParsedRow {
            row: (index as i64) + 1,
            date: read_optional_string(object.get("date")),
            category: read_optional_string(object.get("category")),
            description: read_optional_string(object.get("description")),
            amount: read_optional_string(object.get("amount")),
            record_type: read_optional_string(object.get("type")),
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::import_schema_mismatch(
            REQUIRED_IMPORT_HEADERS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            headers,
        ));
    }

    let mut index_by_name: HashMap<&str, usize> = HashMap::new();
    for (index, name) in headers.iter().enumerate() {
        index_by_name.insert(name.as_str(), index);
    }

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;

        rows.push(ParsedRow {
            row: (row_index as i64) + 1,
            date: cell(&record, &index_by_name, "date"),
            category: cell(&record, &index_by_name, "category"),
            description: cell(&record, &index_by_name, "description"),
            amount: cell(&record, &index_by_name, "amount"),
            record_type: cell(&record, &index_by_name, "type"),
        });
    }

    Ok(rows)
}

fn headers_are_valid(headers: &[String]) -> bool {
    let all_required_present = REQUIRED_IMPORT_HEADERS
        .iter()
        .all(|required| headers.iter().any(|header| header == required));
    let no_unknown_headers = headers
        .iter()
        .all(|header| REQUIRED_IMPORT_HEADERS.contains(&header.as_str()));

    all_required_present && no_unknown_headers && headers.len() == REQUIRED_IMPORT_HEADERS.len()
}

// A comma in the first line is enough to route to the CSV parser; the
// header check after it does the real gatekeeping.
fn looks_like_csv(content: &str) -> bool {
    content.lines().next().is_some_and(|line| line.contains(','))
}

fn looks_like_ndjson(content: &str) -> bool {
    content
        .lines()
        .filter(|line| line.trim_start().starts_with('{'))
        .nth(1)
        .is_some()
}

fn cell(
    record: &csv::StringRecord,
    index_by_name: &HashMap<&str, usize>,
    field_name: &str,
) -> Option<String> {
    index_by_name
        .get(field_name)
        .and_then(|index| record.get(*index))
        .map(str::to_string)
}

// Scalars are accepted for any field (JSON numbers are the natural way to
// write an amount); null and nested values read as absent.
fn read_optional_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
