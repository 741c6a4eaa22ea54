//! Macro-generated test suite for `DataService<TestRecord>` contract validation.
//!
//! The `data_service_tests!` macro generates a test module that validates
//! any `DataService<TestRecord>` implementation against the full contract:
//! CRUD operations, natural order, query scans, edge cases and concurrent
//! access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use registrar::storage::InMemoryDataService;
//!
//! data_service_tests!(in_memory, InMemoryDataService::<TestRecord>::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`: create then retrieve, verify all fields
//! - `test_get_nonexistent`: get with random UUID returns None
//! - `test_list_empty`: list on empty store returns empty vec
//! - `test_list_keeps_insertion_order`: natural order is insertion order
//! - `test_update_existing` / `test_update_nonexistent`
//! - `test_delete_existing` / `test_delete_nonexistent`
//! - `test_create_duplicate_id`: second insert is a conflict
//!
//! ## Scan
//! - `test_scan_matches_in_memory_apply`: scan equals `CompiledQuery::apply`
//!   over `list`
//! - `test_scan_pages_through_everything`
//!
//! ## Concurrency
//! - `test_concurrent_access`: parallel creates from spawned tasks

/// Generate a full `DataService<TestRecord>` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an instance implementing
/// `DataService<TestRecord>`. It is re-evaluated for each test to ensure
/// isolation. For the concurrent access test, the returned service must also
/// implement `Clone + 'static` (shared state via Arc pattern).
#[macro_export]
macro_rules! data_service_tests {
    ($name:ident, $factory:expr) => {
        mod $name {
            use super::*;
            use registrar::core::entity::Entity;
            use registrar::core::error::{EntityError, RegistrarError};
            use registrar::core::filter::{FilterCriterion, FilterOperator};
            use registrar::core::query::QueryRequest;
            use registrar::core::service::DataService;
            use registrar::core::store::QueryableStore;
            use uuid::Uuid;

            // ==================================================================
            // CRUD: Create & Get
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let record = create_test_record("Alice", "alice@test.com", 30, 4.5, true);
                let original_id = record.id;

                let created = service.create(record.clone()).await.unwrap();
                assert_eq!(created, record);

                let retrieved = service.get(&original_id).await.unwrap();
                assert_eq!(retrieved, Some(record));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert_eq!(service.get(&Uuid::new_v4()).await.unwrap(), None);
            }

            // ==================================================================
            // CRUD: List
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                assert!(service.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_keeps_insertion_order() {
                let service = $factory;
                for name in ["Echo", "Alpha", "Delta", "Bravo", "Charlie"] {
                    service
                        .create(create_test_record(name, "x@test.com", 20, 1.0, true))
                        .await
                        .unwrap();
                }

                let listed = service.list().await.unwrap();
                assert_eq!(names(&listed), vec!["Echo", "Alpha", "Delta", "Bravo", "Charlie"]);
            }

            // ==================================================================
            // CRUD: Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let first = service.create(record_with_id(1, "Alice", 30)).await.unwrap();
                service.create(record_with_id(2, "Bob", 25)).await.unwrap();

                let mut changed = first.clone();
                changed.name = "Alicia".to_string();
                changed.nickname = Some("Ali".to_string());
                let updated = service.update(&first.id, changed.clone()).await.unwrap();
                assert_eq!(updated, changed);

                // position in the natural order is unchanged
                let listed = service.list().await.unwrap();
                assert_eq!(names(&listed), vec!["Alicia", "Bob"]);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let record = record_with_id(9, "Ghost", 1);
                let err = service.update(&record.id(), record.clone()).await.unwrap_err();
                assert!(matches!(
                    err,
                    RegistrarError::Entity(EntityError::NotFound { .. })
                ));
            }

            // ==================================================================
            // CRUD: Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                for record in alice_bob_carl() {
                    service.create(record).await.unwrap();
                }

                service.delete(&Uuid::from_u128(2)).await.unwrap();

                assert_eq!(service.get(&Uuid::from_u128(2)).await.unwrap(), None);
                let listed = service.list().await.unwrap();
                assert_eq!(names(&listed), vec!["Alice", "Carl"]);
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                let err = service.delete(&Uuid::new_v4()).await.unwrap_err();
                assert!(matches!(
                    err,
                    RegistrarError::Entity(EntityError::NotFound { .. })
                ));
            }

            // ==================================================================
            // Edge cases
            // ==================================================================

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let service = $factory;
                let record = record_with_id(1, "Alice", 30);
                service.create(record.clone()).await.unwrap();

                let mut clash = record_with_id(1, "Impostor", 99);
                clash.email = "impostor@test.com".to_string();
                let err = service.create(clash).await.unwrap_err();
                assert!(matches!(
                    err,
                    RegistrarError::Entity(EntityError::AlreadyExists { .. })
                ));

                // the original is untouched
                assert_eq!(service.get(&record.id).await.unwrap(), Some(record));
            }

            // ==================================================================
            // Scan
            // ==================================================================

            #[tokio::test]
            async fn test_scan_matches_in_memory_apply() {
                let service = $factory;
                for record in alice_bob_carl() {
                    service.create(record).await.unwrap();
                }
                service
                    .create(record_with_id(4, "Dora", 41))
                    .await
                    .unwrap();

                let requests = vec![
                    QueryRequest::page(1, 10),
                    QueryRequest::page(1, 10).filter(FilterCriterion::equal("Age", "25")),
                    QueryRequest::page(1, 2).sort("Age", "desc"),
                    QueryRequest::page(2, 2).sort("Name", "asc"),
                    QueryRequest::page(1, 10).search("ALI"),
                    QueryRequest::page(1, 10).filter(FilterCriterion::new(
                        "Score",
                        FilterOperator::GreaterThanOrEqual,
                        "3",
                    )),
                ];

                for request in requests {
                    let compiled = request.compile::<TestRecord>().unwrap();
                    let scanned = service.scan(&compiled).await.unwrap();
                    let expected = compiled.apply(service.list().await.unwrap());
                    assert_eq!(scanned, expected, "{:?}", request);
                }
            }

            #[tokio::test]
            async fn test_scan_pages_through_everything() {
                let service = $factory;
                for n in 0..7u128 {
                    service
                        .create(record_with_id(n + 1, &format!("R{}", n), n as i64))
                        .await
                        .unwrap();
                }

                let mut seen = Vec::new();
                for page in 1..=4 {
                    let compiled = QueryRequest::page(page, 2)
                        .sort("age", "desc")
                        .compile::<TestRecord>()
                        .unwrap();
                    seen.extend(service.scan(&compiled).await.unwrap());
                }

                let ages: Vec<i64> = seen.iter().map(|r| r.age).collect();
                assert_eq!(ages, vec![6, 5, 4, 3, 2, 1, 0]);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_access() {
                let service = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        let record = create_test_record(
                            &format!("Concurrent{}", i),
                            &format!("c{}@test.com", i),
                            i,
                            i as f64,
                            true,
                        );
                        service.create(record).await.unwrap();
                    }));
                }

                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(service.list().await.unwrap().len(), 10);
            }
        }
    };
}
