mod support;

use hearth_client::commands::recurring::{self, RecurringRunOptions};
use hearth_client::commands::summary::{self, SummaryRunOptions};
use hearth_client::commands::trend::{self, TrendRunOptions};
use serde_json::Value;
use support::testkit::{import_rows, temp_home_in_tmp};

fn summary_data(home: &std::path::Path) -> Value {
    let result = summary::run_with_options(SummaryRunOptions {
        from: None,
        to: None,
        home_override: Some(home),
    });
    assert!(result.is_ok());
    result.map(|success| success.data).unwrap_or(Value::Null)
}

fn trend_data(home: &std::path::Path) -> Value {
    let result = trend::run_with_options(TrendRunOptions {
        from: None,
        to: None,
        home_override: Some(home),
    });
    assert!(result.is_ok());
    result.map(|success| success.data).unwrap_or(Value::Null)
}

fn recurring_data(home: &std::path::Path) -> Value {
    let result = recurring::run_with_options(RecurringRunOptions {
        from: None,
        to: None,
        home_override: Some(home),
    });
    assert!(result.is_ok());
    result.map(|success| success.data).unwrap_or(Value::Null)
}

#[test]
fn summary_ranks_categories_and_reports_shares() {
    let temp = temp_home_in_tmp("hearth-summary-ranking");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        import_rows(
            &home,
            &[
                ("2026-01-10", "Groceries", "Market", -300.0, "expense"),
                ("2026-01-12", "Rent", "Rent payment", -1200.0, "expense"),
                ("2026-01-15", "Dining", "Dinner out", -150.0, "expense"),
            ],
        );

        let data = summary_data(&home);
        assert_eq!(data["record_count"], Value::from(3));
        assert_eq!(data["totals"]["income"], Value::from(0.0));
        assert_eq!(data["totals"]["expenses"], Value::from(1650.0));
        assert_eq!(data["totals"]["net"], Value::from(-1650.0));

        let categories = data["by_category"].as_array().cloned().unwrap_or_default();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0]["category"], Value::String("Rent".to_string()));
        assert_eq!(categories[0]["total"], Value::from(1200.0));
        assert_eq!(categories[0]["share"], Value::from(72.7));
        assert_eq!(
            categories[1]["category"],
            Value::String("Groceries".to_string())
        );
        assert_eq!(categories[2]["category"], Value::String("Dining".to_string()));
    }
}

#[test]
fn summary_tie_ranking_is_stable_by_input_order() {
    let temp = temp_home_in_tmp("hearth-summary-ties");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        import_rows(
            &home,
            &[
                ("2026-01-10", "Alpha", "First", -100.0, "expense"),
                ("2026-01-11", "Beta", "Second", -100.0, "expense"),
            ],
        );

        let data = summary_data(&home);
        let categories = data["by_category"].as_array().cloned().unwrap_or_default();
        assert_eq!(categories[0]["category"], Value::String("Alpha".to_string()));
        assert_eq!(categories[1]["category"], Value::String("Beta".to_string()));
    }
}

#[test]
fn summary_exposes_monthly_flows_in_order() {
    let temp = temp_home_in_tmp("hearth-summary-periods");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        import_rows(
            &home,
            &[
                ("2026-02-10", "Groceries", "Market", -650.0, "expense"),
                ("2026-01-05", "Salary", "Monthly salary", 3000.0, "income"),
                ("2026-01-28", "Groceries", "Market", -500.0, "expense"),
            ],
        );

        let data = summary_data(&home);
        let periods = data["by_period"].as_array().cloned().unwrap_or_default();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0]["month"], Value::String("2026-01".to_string()));
        assert_eq!(periods[0]["income"], Value::from(3000.0));
        assert_eq!(periods[0]["expense"], Value::from(-500.0));
        assert_eq!(periods[1]["month"], Value::String("2026-02".to_string()));
        assert_eq!(periods[1]["expense"], Value::from(-650.0));
    }
}

#[test]
fn trend_reports_a_month_over_month_increase() {
    let temp = temp_home_in_tmp("hearth-trend-increase");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        import_rows(
            &home,
            &[
                ("2026-01-10", "Groceries", "Market", -500.0, "expense"),
                ("2026-02-10", "Groceries", "Market", -650.0, "expense"),
            ],
        );

        let data = trend_data(&home);
        assert_eq!(data["period_count"], Value::from(2));
        assert_eq!(data["trend"]["direction"], Value::String("increased".to_string()));
        assert_eq!(data["trend"]["delta"], Value::from(150.0));
        assert_eq!(
            data["trend"]["statement"],
            Value::String("Expenses increased by 150.00 compared to previous month.".to_string())
        );
        assert_eq!(
            data["trend"]["latest_month"],
            Value::String("2026-02".to_string())
        );
    }
}

#[test]
fn trend_with_a_single_period_is_null_not_an_error() {
    let temp = temp_home_in_tmp("hearth-trend-single");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        import_rows(
            &home,
            &[("2026-01-10", "Groceries", "Market", -500.0, "expense")],
        );

        let data = trend_data(&home);
        assert_eq!(data["period_count"], Value::from(1));
        assert!(data["trend"].is_null());
    }
}

#[test]
fn recurring_sums_means_across_description_groups() {
    let temp = temp_home_in_tmp("hearth-recurring-groups");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        import_rows(
            &home,
            &[
                ("2026-01-03", "Housing", "Rent payment", -1200.0, "expense"),
                ("2026-02-03", "Housing", "Rent payment", -1200.0, "expense"),
                (
                    "2026-01-15",
                    "Entertainment",
                    "Netflix subscription",
                    -15.0,
                    "expense",
                ),
            ],
        );

        let data = recurring_data(&home);
        assert_eq!(data["monthly_total"], Value::from(1215.0));
        let groups = data["groups"].as_array().cloned().unwrap_or_default();
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0]["description"],
            Value::String("Rent payment".to_string())
        );
        assert_eq!(groups[0]["occurrence_count"], Value::from(2));
        assert_eq!(groups[0]["mean_amount"], Value::from(1200.0));
        assert_eq!(
            groups[1]["description"],
            Value::String("Netflix subscription".to_string())
        );
    }
}

#[test]
fn recurring_without_marker_matches_is_empty() {
    let temp = temp_home_in_tmp("hearth-recurring-none");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        import_rows(
            &home,
            &[("2026-01-10", "Groceries", "Market", -300.0, "expense")],
        );

        let data = recurring_data(&home);
        assert_eq!(data["monthly_total"], Value::from(0.0));
        let groups = data["groups"].as_array().cloned().unwrap_or_default();
        assert!(groups.is_empty());
    }
}

#[test]
fn recurring_payload_names_the_marker_lexicon() {
    let temp = temp_home_in_tmp("hearth-recurring-markers");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let data = recurring_data(&home);
        let markers = data["markers"].as_array().cloned().unwrap_or_default();
        assert_eq!(
            markers,
            vec![
                Value::String("bill".to_string()),
                Value::String("rent".to_string()),
                Value::String("subscription".to_string()),
                Value::String("salary".to_string()),
            ]
        );
        assert_eq!(
            data["policy_version"],
            Value::String("insights/v1".to_string())
        );
    }
}
