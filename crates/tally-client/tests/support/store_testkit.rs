#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tally_client::commands::import::{self, ImportOptions};
use tempfile::tempdir;

pub const HEADER: &str = "transaction_id,customer_id,customer_name,email,item_id,item_name,price,quantity,total_amount,transaction_type,date";

pub fn temp_home() -> std::io::Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempdir()?;
    let home = dir.path().join("store-home");
    Ok((dir, home))
}

pub fn write_file(path: &Path, body: &str) {
    let result = fs::write(path, body);
    assert!(result.is_ok());
}

pub fn csv_body(rows: &[&str]) -> String {
    let mut body = String::from(HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    body
}

pub fn seed_store(home: &Path, rows: &[&str]) {
    let result = import::run_with_options(ImportOptions {
        path: "seed.csv".to_string(),
        home_override: Some(home),
        content_override: Some(csv_body(rows)),
    });
    assert!(result.is_ok(), "seed import failed: {result:?}");
}

pub fn sample_rows() -> Vec<&'static str> {
    vec![
        "T001,C001,Ada,ada@example.com,I1,Widget A,10,2,20,SALE,2024-03-15",
        "T002,C002,Bob,bob@example.com,I2,Widget B,25,4,100,SALE,2024-03-15",
        "T003,C001,Ada,ada@example.com,I2,Widget B,25,1,25,PURCHASE,2024-03-15",
        "T004,C001,Ada,ada@example.com,I1,Widget A,10,5,50,SALE,2024-02-10",
        "T005,C003,Cy,cy@example.com,I3,Gadget,40,1,40,SALE,2024-02-29",
        "T006,C002,Bob,bob@example.com,I1,Widget A,10,3,30,PURCHASE,2024-03-14",
        "T007,C001,Ada,ada@example.com,I3,Gadget,40,2,80,SALE,2023-12-05",
    ]
}
