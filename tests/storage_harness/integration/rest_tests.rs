//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that validate
//! a `DataService<TestRecord>` through full REST round-trips:
//! JSON → HTTP request → handler → EntityService → DataService → HTTP response → JSON.

/// Generate a REST integration test suite for a storage backend.
///
/// `$data_factory` must produce an `impl DataService<TestRecord> + 'static`.
///
/// # Generated Tests
///
/// ## CRUD
/// - `test_rest_create`: POST 201 + assigned id
/// - `test_rest_create_keeps_client_id`
/// - `test_rest_get`
/// - `test_rest_update`
/// - `test_rest_patch_merge` / `test_rest_patch_json_patch`
/// - `test_rest_delete`: DELETE 204, then GET 404
///
/// ## Listing
/// - `test_rest_list_paging`
/// - `test_rest_list_filter`
/// - `test_rest_list_search_and_sort`
///
/// ## Error handling
/// - unknown id, invalid id, conflicts, bad queries and bad patches
#[macro_export]
macro_rules! rest_integration_tests {
    ($name:ident, $data_factory:expr) => {
        mod $name {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use registrar::core::service::DataService;
            use serde_json::{Value, json};
            use std::sync::Arc;

            fn make_server() -> TestServer {
                let data_service = $data_factory;
                let ds: Arc<dyn DataService<TestRecord>> = Arc::new(data_service);
                let router = storage_harness::integration::build_test_router(ds);
                TestServer::try_new(router).unwrap()
            }

            fn body(name: &str, age: i64) -> Value {
                json!({
                    "name": name,
                    "email": format!("{}@test.com", name.to_lowercase()),
                    "age": age,
                    "score": 3.5,
                    "active": true,
                    "joined_on": "2024-09-01"
                })
            }

            async fn seed(server: &TestServer, name: &str, age: i64) -> Value {
                let response = server.post("/test_records").json(&body(name, age)).await;
                response.assert_status(StatusCode::CREATED);
                response.json::<Value>()
            }

            fn names(list: &Value) -> Vec<&str> {
                list.as_array()
                    .unwrap()
                    .iter()
                    .map(|r| r["name"].as_str().unwrap())
                    .collect()
            }

            // ==============================================================
            // CRUD
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server();

                let response = server.post("/test_records").json(&body("Alice", 30)).await;

                response.assert_status(StatusCode::CREATED);
                let created: Value = response.json();
                assert_eq!(created["name"], "Alice");
                assert_eq!(created["age"], 30);
                assert_eq!(created["joined_on"], "2024-09-01");
                assert_eq!(created["nickname"], Value::Null);
                let id = uuid::Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();
                assert!(!id.is_nil());
            }

            #[tokio::test]
            async fn test_rest_create_keeps_client_id() {
                let server = make_server();
                let id = uuid::Uuid::new_v4();
                let mut payload = body("Alice", 30);
                payload["id"] = json!(id);

                let response = server.post("/test_records").json(&payload).await;
                response.assert_status(StatusCode::CREATED);
                assert_eq!(response.json::<Value>()["id"], json!(id));

                let again = server.post("/test_records").json(&payload).await;
                again.assert_status(StatusCode::CONFLICT);
                assert_eq!(again.json::<Value>()["code"], "ENTITY_ALREADY_EXISTS");
            }

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server();
                let created = seed(&server, "Bob", 25).await;
                let id = created["id"].as_str().unwrap();

                let response = server.get(&format!("/test_records/{}", id)).await;

                response.assert_status(StatusCode::OK);
                assert_eq!(response.json::<Value>(), created);
            }

            #[tokio::test]
            async fn test_rest_update() {
                let server = make_server();
                let created = seed(&server, "Bob", 25).await;
                let id = created["id"].as_str().unwrap();

                // payload without id takes the path id
                let response = server
                    .put(&format!("/test_records/{}", id))
                    .json(&body("Robert", 26))
                    .await;

                response.assert_status(StatusCode::OK);
                let updated: Value = response.json();
                assert_eq!(updated["id"], id);
                assert_eq!(updated["name"], "Robert");
                assert_eq!(updated["age"], 26);
            }

            #[tokio::test]
            async fn test_rest_update_id_mismatch() {
                let server = make_server();
                let created = seed(&server, "Bob", 25).await;
                let id = created["id"].as_str().unwrap();
                let mut payload = body("Bob", 25);
                payload["id"] = json!(uuid::Uuid::new_v4());

                let response = server
                    .put(&format!("/test_records/{}", id))
                    .json(&payload)
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "ENTITY_ID_MISMATCH");
            }

            #[tokio::test]
            async fn test_rest_patch_merge() {
                let server = make_server();
                let created = seed(&server, "Carl", 25).await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .patch(&format!("/test_records/{}", id))
                    .json(&json!({ "nickname": "CJ", "age": 26 }))
                    .await;

                response.assert_status(StatusCode::OK);
                let patched: Value = response.json();
                assert_eq!(patched["nickname"], "CJ");
                assert_eq!(patched["age"], 26);
                assert_eq!(patched["name"], "Carl");
            }

            #[tokio::test]
            async fn test_rest_patch_json_patch() {
                let server = make_server();
                let created = seed(&server, "Carl", 25).await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .patch(&format!("/test_records/{}", id))
                    .json(&json!([
                        { "op": "test", "path": "/name", "value": "Carl" },
                        { "op": "replace", "path": "/active", "value": false }
                    ]))
                    .await;

                response.assert_status(StatusCode::OK);
                assert_eq!(response.json::<Value>()["active"], false);

                let stale = server
                    .patch(&format!("/test_records/{}", id))
                    .json(&json!([{ "op": "test", "path": "/name", "value": "Karl" }]))
                    .await;
                stale.assert_status(StatusCode::CONFLICT);
                assert_eq!(stale.json::<Value>()["code"], "PATCH_TEST_FAILED");
            }

            #[tokio::test]
            async fn test_rest_patch_rejects_bad_documents() {
                let server = make_server();
                let created = seed(&server, "Carl", 25).await;
                let path = format!("/test_records/{}", created["id"].as_str().unwrap());

                let id_change = server
                    .patch(&path)
                    .json(&json!({ "id": uuid::Uuid::new_v4() }))
                    .await;
                id_change.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(id_change.json::<Value>()["code"], "PATCH_ID_CHANGED");

                let wrong_type = server.patch(&path).json(&json!({ "age": "old" })).await;
                wrong_type.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(wrong_type.json::<Value>()["code"], "PATCH_INVALID_RESULT");

                let scalar = server.patch(&path).json(&json!(42)).await;
                scalar.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(scalar.json::<Value>()["code"], "INVALID_PATCH_DOCUMENT");

                // nothing was stored
                let current: Value = server.get(&path).await.json();
                assert_eq!(current, created);
            }

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server();
                let created = seed(&server, "Dora", 41).await;
                let path = format!("/test_records/{}", created["id"].as_str().unwrap());

                server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
                server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
                server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
            }

            // ==============================================================
            // Listing
            // ==============================================================

            #[tokio::test]
            async fn test_rest_list_paging() {
                let server = make_server();
                for (name, age) in [("Alice", 30), ("Bob", 25), ("Carl", 25), ("Dora", 41)] {
                    seed(&server, name, age).await;
                }

                let all: Value = server.get("/test_records").await.json();
                assert_eq!(names(&all), vec!["Alice", "Bob", "Carl", "Dora"]);

                let response = server
                    .get("/test_records")
                    .add_query_param("pageNumber", 2)
                    .add_query_param("pageSize", 3)
                    .await;
                response.assert_status(StatusCode::OK);
                assert_eq!(names(&response.json::<Value>()), vec!["Dora"]);

                let beyond: Value = server
                    .get("/test_records")
                    .add_query_param("pageNumber", 9)
                    .add_query_param("pageSize", 3)
                    .await
                    .json();
                assert_eq!(beyond, json!([]));
            }

            #[tokio::test]
            async fn test_rest_list_filter() {
                let server = make_server();
                for (name, age) in [("Alice", 30), ("Bob", 25), ("Carl", 25)] {
                    seed(&server, name, age).await;
                }

                let filters = json!([
                    { "PropertyName": "Age", "Operator": "Equal", "Value": "25" }
                ])
                .to_string();
                let response = server
                    .get("/test_records")
                    .add_query_param("filters", &filters)
                    .await;

                response.assert_status(StatusCode::OK);
                assert_eq!(names(&response.json::<Value>()), vec!["Bob", "Carl"]);
            }

            #[tokio::test]
            async fn test_rest_list_search_and_sort() {
                let server = make_server();
                for (name, age) in [("Alice", 30), ("Bob", 25), ("Carl", 25), ("Alina", 19)] {
                    seed(&server, name, age).await;
                }

                let response = server
                    .get("/test_records")
                    .add_query_param("searchTerm", "ALI")
                    .add_query_param("sortField", "age")
                    .add_query_param("sortOrder", "desc")
                    .await;

                response.assert_status(StatusCode::OK);
                assert_eq!(names(&response.json::<Value>()), vec!["Alice", "Alina"]);
            }

            // ==============================================================
            // Error handling
            // ==============================================================

            #[tokio::test]
            async fn test_rest_error_not_found() {
                let server = make_server();
                let id = uuid::Uuid::new_v4();

                let response = server.get(&format!("/test_records/{}", id)).await;

                response.assert_status(StatusCode::NOT_FOUND);
                let error: Value = response.json();
                assert_eq!(error["code"], "ENTITY_NOT_FOUND");
                assert_eq!(error["details"]["id"], id.to_string());
            }

            #[tokio::test]
            async fn test_rest_error_invalid_uuid() {
                let server = make_server();

                let response = server.get("/test_records/not-a-uuid").await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "INVALID_ID");
            }

            #[tokio::test]
            async fn test_rest_error_bad_queries() {
                let server = make_server();
                seed(&server, "Alice", 30).await;

                let cases = [
                    ("pageSize", "0", "INVALID_PAGE_SIZE"),
                    ("pageNumber", "0", "INVALID_PAGE_NUMBER"),
                    ("sortField", "Height", "UNKNOWN_FIELD"),
                    ("filters", "not json", "MALFORMED_FILTER"),
                ];
                for (param, value, code) in cases {
                    let response = server
                        .get("/test_records")
                        .add_query_param(param, value)
                        .await;
                    response.assert_status(StatusCode::BAD_REQUEST);
                    assert_eq!(response.json::<Value>()["code"], code, "{}={}", param, value);
                }

                let response = server
                    .get("/test_records")
                    .add_query_param("sortField", "Name")
                    .add_query_param("sortOrder", "sideways")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "INVALID_SORT_ORDER");

                let unsupported = json!([
                    { "PropertyName": "active", "Operator": "GreaterThan", "Value": "true" }
                ])
                .to_string();
                let response = server
                    .get("/test_records")
                    .add_query_param("filters", &unsupported)
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let error: Value = response.json();
                assert_eq!(error["code"], "UNSUPPORTED_OPERATOR");
                assert_eq!(error["details"]["operator"], "GreaterThan");

                let response = server
                    .get("/test_records")
                    .add_query_param("pageSize", "many")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "INVALID_QUERY");
            }

            #[tokio::test]
            async fn test_rest_error_invalid_body() {
                let server = make_server();

                let response = server
                    .post("/test_records")
                    .json(&json!({ "name": "NoAge" }))
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "INVALID_BODY");
            }
        }
    };
}
