use crate::ClientResult;
use crate::analytics::date::parse_transaction_date;
use crate::analytics::insights::compose_insights;
use crate::analytics::types::{Record, RecordKind};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DemoData;
use crate::import::CanonicalRecord;
use crate::import::parse::parse_source;
use crate::import::validate::validate_rows;

// Two months of household rows so the trend and recurring insights both
// fire. The demo never touches the ledger.
const SAMPLE_RECORDS_CSV: &str = "\
date,category,description,amount,type
2026-01-02,Salary,Monthly salary,3200.00,income
2026-01-03,Housing,Rent payment,-1200.00,expense
2026-01-07,Groceries,Market run,-310.40,expense
2026-01-12,Utilities,Electric bill,-82.50,expense
2026-01-15,Entertainment,Netflix subscription,-15.99,expense
2026-01-21,Dining,Dinner out,-96.20,expense
2026-01-27,Transport,Fuel,-44.00,expense
2026-02-02,Salary,Monthly salary,3200.00,income
2026-02-03,Housing,Rent payment,-1200.00,expense
2026-02-08,Groceries,Market run,-287.15,expense
2026-02-12,Utilities,Electric bill,-79.10,expense
2026-02-15,Entertainment,Netflix subscription,-15.99,expense
2026-02-19,Dining,Dinner out,-154.75,expense
2026-02-25,Transport,Fuel,-51.25,expense
";

pub fn run() -> ClientResult<SuccessEnvelope> {
    let parsed = parse_source(SAMPLE_RECORDS_CSV)?;
    let validated = validate_rows(parsed)?;
    let records = validated
        .rows
        .iter()
        .filter_map(canonical_to_record)
        .collect::<Vec<Record>>();
    let statements = compose_insights(&records);

    let data = DemoData {
        source: "bundled-sample".to_string(),
        record_count: records.len() as i64,
        statements,
    };

    success("demo", data)
}

fn canonical_to_record(row: &CanonicalRecord) -> Option<Record> {
    let date = parse_transaction_date(&row.date)?;
    Some(Record {
        date,
        category: row.category.clone(),
        description: row.description.clone(),
        amount: row.amount,
        kind: RecordKind::parse(&row.record_type),
    })
}
