//! Shared test harness for storage backend testing
//!
//! Provides `TestRecord`, an entity whose fields cover every `FieldKind`,
//! plus helpers for creating test data.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod data_service_tests;
#[macro_use]
pub mod integration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// TestRecord: covers all FieldKind variants
// ---------------------------------------------------------------------------

registrar::impl_data_entity!(
    TestRecord,
    "test_record",
    "test_records",
    ["name", "email", "nickname"],
    {
        name: String,
        email: String,
        age: i64,
        score: f64,
        active: bool,
        joined_on: NaiveDate,
        last_seen: Option<DateTime<Utc>>,
        nickname: Option<String>,
    }
);

/// Create a record with a fresh id and fixed dates
pub fn create_test_record(
    name: &str,
    email: &str,
    age: i64,
    score: f64,
    active: bool,
) -> TestRecord {
    TestRecord::new(
        name.to_string(),
        email.to_string(),
        age,
        score,
        active,
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        None,
        None,
    )
}

/// Record with a predictable id (`Uuid::from_u128(n)`)
pub fn record_with_id(n: u128, name: &str, age: i64) -> TestRecord {
    let mut record = create_test_record(
        name,
        &format!("{}@school.test", name.to_lowercase()),
        age,
        age as f64 / 10.0,
        n % 2 == 1,
    );
    record.id = Uuid::from_u128(n);
    record
}

/// Timestamp helper for `last_seen`
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// The three-record set used throughout the query tests:
/// Alice (30), Bob (25), Carl (25), with ids 1, 2, 3
pub fn alice_bob_carl() -> Vec<TestRecord> {
    vec![
        record_with_id(1, "Alice", 30),
        record_with_id(2, "Bob", 25),
        record_with_id(3, "Carl", 25),
    ]
}

pub fn names(records: &[TestRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}
