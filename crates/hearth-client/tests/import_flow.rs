mod support;

use hearth_client::commands::import;
use serde_json::Value;
use support::testkit::{
    csv_content, import_content, import_content_result, import_rows, import_rows_replacing,
    insight_statements, temp_home_in_tmp,
};

#[test]
fn import_commits_rows_and_reports_counts() {
    let temp = temp_home_in_tmp("hearth-import-commit");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let content = csv_content(&[
            ("2026-01-05", "Salary", "Monthly salary", 3000.0, "income"),
            ("2026-01-10", "Groceries", "Market", -300.0, "expense"),
            ("2026-01-12", "Rent", "Rent payment", -1200.0, "expense"),
        ]);
        let result = import_content_result(&home, &content, false, false);
        assert!(result.is_ok());
        if let Ok(success) = result {
            assert_eq!(success.command, "import");
            assert_eq!(success.data["summary"]["rows_read"], Value::from(3));
            assert_eq!(success.data["summary"]["inserted"], Value::from(3));
            assert_eq!(success.data["summary"]["rows_invalid"], Value::from(0));
            assert!(success.data["import_id"].is_string());
            assert_eq!(
                success.data["data_range_hint"]["earliest"],
                Value::String("2026-01-05".to_string())
            );
            assert_eq!(
                success.data["data_range_hint"]["latest"],
                Value::String("2026-01-12".to_string())
            );
        }
    }
}

#[test]
fn dry_run_validates_without_writing() {
    let temp = temp_home_in_tmp("hearth-import-dry-run");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let content = csv_content(&[(
            "2026-01-10",
            "Groceries",
            "Market",
            -300.0,
            "expense",
        )]);
        let result = import_content_result(&home, &content, false, true);
        assert!(result.is_ok());
        if let Ok(success) = result {
            assert_eq!(success.data["dry_run"], Value::Bool(true));
            assert_eq!(success.data["summary"]["inserted"], Value::from(0));
            assert!(success.data["import_id"].is_null());
        }

        let statements = insight_statements(&home, None, None);
        assert_eq!(
            statements,
            vec!["No data available. Please load transactions first.".to_string()]
        );
    }
}

#[test]
fn replace_leaves_exactly_the_new_batch() {
    let temp = temp_home_in_tmp("hearth-import-replace");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        import_rows(
            &home,
            &[
                ("2026-01-10", "Groceries", "Market", -300.0, "expense"),
                ("2026-01-12", "Rent", "Rent payment", -1200.0, "expense"),
            ],
        );
        import_rows_replacing(
            &home,
            &[("2026-02-10", "Dining", "Dinner out", -80.0, "expense")],
        );

        let statements = insight_statements(&home, None, None);
        assert!(statements.contains(&"Total expenses: 80.00".to_string()));
    }
}

#[test]
fn replace_reports_how_many_rows_were_dropped() {
    let temp = temp_home_in_tmp("hearth-import-replace-count");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        import_rows(
            &home,
            &[
                ("2026-01-10", "Groceries", "Market", -300.0, "expense"),
                ("2026-01-12", "Rent", "Rent payment", -1200.0, "expense"),
            ],
        );
        let content = csv_content(&[(
            "2026-02-10",
            "Dining",
            "Dinner out",
            -80.0,
            "expense",
        )]);
        let result = import_content_result(&home, &content, true, false);
        assert!(result.is_ok());
        if let Ok(success) = result {
            assert_eq!(
                success.data["summary"]["replaced_prior_rows"],
                Value::from(2)
            );
            assert!(
                success.data["message"]
                    .as_str()
                    .unwrap_or("")
                    .contains("2 prior rows were replaced")
            );
        }
    }
}

#[test]
fn schema_mismatched_csv_headers_are_rejected() {
    let temp = temp_home_in_tmp("hearth-import-schema");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let content = "posted_at,category,description,amount,type\n\
                       2026-01-10,Groceries,Market,-300.00,expense\n";
        let result = import_content_result(&home, content, false, false);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "import_schema_mismatch");
        }
    }
}

#[test]
fn validation_failure_aborts_the_whole_batch() {
    let temp = temp_home_in_tmp("hearth-import-validation");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let content = csv_content(&[
            ("2026-01-10", "Groceries", "Market", -300.0, "expense"),
            ("2026-13-40", "Rent", "Rent payment", -1200.0, "expense"),
        ]);
        let result = import_content_result(&home, &content, false, false);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "import_validation_failed");
        }

        let statements = insight_statements(&home, None, None);
        assert_eq!(
            statements,
            vec!["No data available. Please load transactions first.".to_string()]
        );
    }
}

#[test]
fn unrecognized_types_import_with_a_warning() {
    let temp = temp_home_in_tmp("hearth-import-warning");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let content = csv_content(&[
            ("2026-01-10", "Groceries", "Market", -300.0, "expense"),
            ("2026-01-11", "Misc", "Move to savings", -100.0, "transfer"),
        ]);
        let result = import_content_result(&home, &content, false, false);
        assert!(result.is_ok());
        if let Ok(success) = result {
            assert_eq!(success.data["summary"]["inserted"], Value::from(2));
            let warnings = success.data["warnings"].as_array().cloned().unwrap_or_default();
            assert_eq!(warnings.len(), 1);
            assert_eq!(
                warnings[0]["code"],
                Value::String("unrecognized_type".to_string())
            );
        }

        // The transfer row stays out of typed totals.
        let statements = insight_statements(&home, None, None);
        assert!(statements.contains(&"Total expenses: 300.00".to_string()));
    }
}

#[test]
fn import_list_records_every_committed_run() {
    let temp = temp_home_in_tmp("hearth-import-list");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        import_rows(
            &home,
            &[("2026-01-10", "Groceries", "Market", -300.0, "expense")],
        );
        import_content(
            &home,
            &csv_content(&[("2026-02-10", "Dining", "Dinner out", -80.0, "expense")]),
            false,
        );

        let listed = import::list_with_options(Some(&home));
        assert!(listed.is_ok());
        if let Ok(success) = listed {
            assert_eq!(success.command, "import list");
            let rows = success.data["rows"].as_array().cloned().unwrap_or_default();
            assert_eq!(rows.len(), 2);
            for row in rows {
                assert_eq!(row["status"], Value::String("committed".to_string()));
                assert_eq!(row["inserted"], Value::from(1));
            }
        }
    }
}
