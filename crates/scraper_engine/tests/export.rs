use std::fs;

use scraper_core::{normalize_record, DataRow};
use scraper_engine::{export_csv, render_csv, CSV_HEADER};
use serde_json::json;
use tempfile::TempDir;

fn row(school: &str, address: &str, email: Option<&str>) -> DataRow {
    let mut record = json!({ "SchoolName": school, "Number": "555", "Address": address });
    if let Some(email) = email {
        record["Email"] = json!(email);
    }
    normalize_record(&record)
}

#[test]
fn empty_result_set_renders_nothing() {
    assert_eq!(render_csv(&[]), None);
}

#[test]
fn csv_has_header_and_quoted_display_fields_only() {
    let mut with_extras = row("Oak High", "1 Oak Rd", Some("a@oak.example"));
    with_extras.response_not_customer_support = Some("secret".to_string());
    with_extras.id = Some(json!(99));
    let rows = vec![with_extras, row("Elm", "2 Elm St", None)];

    let csv = render_csv(&rows).unwrap();
    let lines: Vec<_> = csv.split('\n').collect();

    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines[0], "School Name,Number,Address,Website,Email");
    assert_eq!(
        lines[1],
        r#""Oak High","555","1 Oak Rd","N/A","a@oak.example""#
    );
    assert_eq!(lines[2], r#""Elm","555","2 Elm St","N/A","""#);
    assert_eq!(lines.len(), 3);
    assert!(!csv.contains("secret"));
    assert!(!csv.ends_with('\n'));
}

#[test]
fn embedded_quotes_are_doubled() {
    let csv = render_csv(&[row("Main School", r#"123 "Main" St"#, None)]).unwrap();
    assert!(csv.contains(r#""123 ""Main"" St""#));
}

#[test]
fn export_writes_timestamped_file() {
    let temp = TempDir::new().unwrap();
    let rows = vec![row("Oak", "1 Oak Rd", None)];

    let path = export_csv(temp.path(), &rows, "1700000000000")
        .unwrap()
        .expect("file written");

    assert_eq!(path.file_name().unwrap(), "scraped_data_1700000000000.csv");
    assert_eq!(fs::read_to_string(&path).unwrap(), render_csv(&rows).unwrap());
}

#[test]
fn export_with_no_rows_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    assert!(export_csv(&out, &[], "1").unwrap().is_none());
    assert!(!out.exists());
}

#[test]
fn repeated_export_with_same_token_does_not_overwrite() {
    let temp = TempDir::new().unwrap();
    let first_rows = vec![row("First", "", None)];
    let second_rows = vec![row("Second", "", None)];

    let first = export_csv(temp.path(), &first_rows, "42").unwrap().unwrap();
    let second = export_csv(temp.path(), &second_rows, "42").unwrap().unwrap();

    assert_ne!(first, second);
    assert_eq!(second.file_name().unwrap(), "scraped_data_42-1.csv");
    assert!(fs::read_to_string(&first).unwrap().contains("First"));
    assert!(fs::read_to_string(&second).unwrap().contains("Second"));
}

#[test]
fn export_into_file_path_fails() {
    let temp = TempDir::new().unwrap();
    let not_a_dir = temp.path().join("not_a_dir");
    fs::write(&not_a_dir, "x").unwrap();

    let result = export_csv(&not_a_dir, &[row("Oak", "", None)], "1");
    assert!(result.is_err());
}
