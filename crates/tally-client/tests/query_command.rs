mod support;

use std::path::Path;

use chrono::NaiveDate;
use serde_json::{Value, json};
use support::store_testkit::{sample_rows, seed_store, temp_home};
use tally_client::commands::query::{self, ExplicitFields, QueryOptions};

fn reference_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 3, 15)
}

fn run_query(home: &Path, text: &str, explicit: ExplicitFields) -> tally_client::ClientResult<Value> {
    let result = query::run_with_options(QueryOptions {
        text: text.to_string(),
        explicit,
        today: reference_date(),
        home_override: Some(home),
    })?;
    serde_json::to_value(result)
        .map_err(|error| tally_client::ClientError::internal_serialization(&error.to_string()))
}

fn transaction_ids(data: &Value) -> Vec<String> {
    data["rows"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row["transaction_id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn sales_today_returns_sale_summary_for_reference_date() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        seed_store(&home, &sample_rows());

        let result = run_query(&home, "sales today", ExplicitFields::default());
        assert!(result.is_ok());
        if let Ok(value) = result {
            assert_eq!(value["command"], Value::String("query".to_string()));
            let data = &value["data"];
            assert_eq!(data["mode"], "summary");
            assert_eq!(
                data["filters"],
                json!({ "transaction_type": "SALE", "date": "2024-03-15" })
            );
            assert_eq!(
                data["summary"],
                json!([
                    { "item_name": "Widget B", "total_quantity": 4, "total_sales": 100 },
                    { "item_name": "Widget A", "total_quantity": 2, "total_sales": 20 },
                ])
            );
            assert_eq!(data["rows"], json!([]));
        }
    }
}

#[test]
fn last_month_summary_covers_leap_february() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        seed_store(&home, &sample_rows());

        let result = run_query(&home, "sales last month", ExplicitFields::default());
        assert!(result.is_ok());
        if let Ok(value) = result {
            let data = &value["data"];
            assert_eq!(
                data["filters"]["date_range"],
                json!({ "start": "2024-02-01", "end": "2024-02-29" })
            );
            assert_eq!(
                data["summary"],
                json!([
                    { "item_name": "Widget A", "total_quantity": 5, "total_sales": 50 },
                    { "item_name": "Gadget", "total_quantity": 1, "total_sales": 40 },
                ])
            );
        }
    }
}

#[test]
fn future_month_name_targets_previous_year() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        seed_store(&home, &sample_rows());

        let result = run_query(&home, "what did we sell in December", ExplicitFields::default());
        assert!(result.is_ok());
        if let Ok(value) = result {
            let data = &value["data"];
            assert_eq!(data["mode"], "summary");
            assert_eq!(
                data["summary"],
                json!([{ "item_name": "Gadget", "total_quantity": 2, "total_sales": 80 }])
            );
        }
    }
}

#[test]
fn customer_sale_text_lists_rows_in_date_order() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        seed_store(&home, &sample_rows());

        let result = run_query(&home, "sale for C001", ExplicitFields::default());
        assert!(result.is_ok());
        if let Ok(value) = result {
            let data = &value["data"];
            assert_eq!(data["mode"], "listing");
            assert_eq!(
                data["inferred_filters"],
                json!({ "customer_id": "C001", "transaction_type": "SALE" })
            );
            assert_eq!(transaction_ids(data), vec!["T007", "T004", "T001"]);
            assert_eq!(data["summary"], json!([]));
        }
    }
}

#[test]
fn explicit_fields_take_precedence_over_text() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        seed_store(&home, &sample_rows());

        let result = run_query(
            &home,
            "purchases for c002",
            ExplicitFields {
                customer_id: Some("C001".to_string()),
                ..ExplicitFields::default()
            },
        );
        assert!(result.is_ok());
        if let Ok(value) = result {
            let data = &value["data"];
            assert_eq!(data["explicit_filters"], json!({ "customer_id": "C001" }));
            assert_eq!(data["inferred_filters"]["customer_id"], "C002");
            assert_eq!(data["filters"]["customer_id"], "C001");
            assert_eq!(transaction_ids(data), vec!["T003"]);
        }
    }
}

#[test]
fn last_week_lists_inclusive_range() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        seed_store(&home, &sample_rows());

        let result = run_query(&home, "bought last week", ExplicitFields::default());
        assert!(result.is_ok());
        if let Ok(value) = result {
            let data = &value["data"];
            assert_eq!(data["mode"], "listing");
            assert_eq!(
                data["filters"]["date_range"],
                json!({ "start": "2024-03-08", "end": "2024-03-15" })
            );
            assert_eq!(transaction_ids(data), vec!["T006", "T003"]);
        }
    }
}

#[test]
fn item_text_resolves_against_stored_catalog() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        seed_store(&home, &sample_rows());

        let result = run_query(&home, "gadgets", ExplicitFields::default());
        assert!(result.is_ok());
        if let Ok(value) = result {
            let data = &value["data"];
            assert_eq!(data["filters"], json!({ "item_name": "Gadget" }));
            assert_eq!(transaction_ids(data), vec!["T007", "T005"]);
            assert_eq!(data["items"], json!(["Gadget", "Widget A", "Widget B"]));
        }
    }
}

#[test]
fn blank_text_with_explicit_item_lists_matching_rows() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        seed_store(&home, &sample_rows());

        let result = run_query(
            &home,
            "",
            ExplicitFields {
                item_name: Some("Widget A".to_string()),
                transaction_type: Some("sale".to_string()),
                ..ExplicitFields::default()
            },
        );
        assert!(result.is_ok());
        if let Ok(value) = result {
            let data = &value["data"];
            assert_eq!(data["mode"], "listing");
            assert_eq!(data["inferred_filters"], json!({}));
            assert_eq!(transaction_ids(data), vec!["T004", "T001"]);
        }
    }
}

#[test]
fn invalid_explicit_date_is_rejected_before_querying() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let result = run_query(
            &home,
            "sales",
            ExplicitFields {
                date: Some("03/15/2024".to_string()),
                ..ExplicitFields::default()
            },
        );
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("YYYY-MM-DD"));
        }
    }
}

#[test]
fn empty_store_returns_no_rows_and_no_items() {
    let temp = temp_home();
    assert!(temp.is_ok());
    if let Ok((_temp, home)) = temp {
        let result = run_query(&home, "widget a sold", ExplicitFields::default());
        assert!(result.is_ok());
        if let Ok(value) = result {
            let data = &value["data"];
            assert_eq!(data["mode"], "listing");
            assert_eq!(data["items"], json!([]));
            assert_eq!(data["rows"], json!([]));
            assert!(data["filters"].get("item_name").is_none());
        }
    }
}
