use std::collections::HashMap;

use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

const BOOTSTRAP_SQL: &str = include_str!("migrations/0001_bootstrap.sql");

const REPAIR_START_MARKER: &str = "-- hearth:safe_repair:start:";
const REPAIR_END_MARKER: &str = "-- hearth:safe_repair:end:";

pub const REQUIRED_INDEX_NAMES: [&str; 3] = [
    "idx_internal_records_date",
    "idx_internal_records_import_id",
    "idx_internal_import_runs_created_at_desc",
];

pub const REQUIRED_META_KEYS: [(&str, &str); 2] = [
    ("schema_version", "v1"),
    ("import_contract_version", "v1"),
];

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    Migrations::new(vec![M::up(BOOTSTRAP_SQL)]).to_latest(conn)
}

/// Canonical SQL for an object the startup self-check may recreate. The
/// blocks live inside the bootstrap file itself, fenced by marker
/// comments, so repair and migration can never drift apart.
pub fn safe_repair_statement(statement_name: &str) -> Option<String> {
    parse_safe_repair_statements().remove(statement_name)
}

fn parse_safe_repair_statements() -> HashMap<String, String> {
    let mut blocks: HashMap<String, String> = HashMap::new();
    let mut open_block: Option<(String, Vec<&str>)> = None;

    for line in BOOTSTRAP_SQL.lines() {
        let trimmed = line.trim();

        if let Some(name) = trimmed.strip_prefix(REPAIR_START_MARKER) {
            open_block = Some((name.to_string(), Vec::new()));
        } else if let Some(name) = trimmed.strip_prefix(REPAIR_END_MARKER) {
            if let Some((open_name, body)) = open_block.take()
                && open_name == name
            {
                blocks.insert(open_name, body.join("\n").trim().to_string());
            }
        } else if let Some((_, body)) = open_block.as_mut() {
            body.push(line);
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::{REQUIRED_INDEX_NAMES, safe_repair_statement};

    #[test]
    fn safe_repair_statement_exists_for_every_required_index() {
        for name in REQUIRED_INDEX_NAMES {
            assert!(safe_repair_statement(name).is_some(), "missing block: {name}");
        }
    }

    #[test]
    fn safe_repair_blocks_contain_create_index_sql() {
        let sql = safe_repair_statement("idx_internal_records_date");
        assert!(sql.is_some());
        if let Some(body) = sql {
            assert!(body.starts_with("CREATE INDEX idx_internal_records_date"));
        }
    }

    #[test]
    fn unknown_names_have_no_repair_block() {
        assert!(safe_repair_statement("idx_missing").is_none());
    }
}
