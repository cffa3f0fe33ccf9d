use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

use postq_providers::{Error, VECTORIZER_KEY_HEADER, graphql};
use postq_testkit::MockStore;

#[test]
fn builds_bearer_and_vectorizer_headers() {
	let headers = postq_providers::auth_headers("secret", "vector-secret", &Map::new())
		.expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
	assert!(value.is_sensitive());
	assert_eq!(
		headers.get(VECTORIZER_KEY_HEADER).expect("Missing vectorizer header."),
		"vector-secret"
	);
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("X-Retry".to_string(), Value::Bool(true));

	assert!(matches!(
		postq_providers::auth_headers("secret", "vector-secret", &defaults),
		Err(Error::InvalidConfig { .. })
	));
}

#[tokio::test]
async fn posts_query_with_credentials() {
	let envelope =
		serde_json::json!({ "data": { "Aggregate": { "Post": [{ "meta": { "count": 4 } }] } } });
	let store = MockStore::start(envelope.clone()).await.expect("Failed to start mock store.");
	let mut cfg = store.store_config();

	cfg.default_headers.insert("X-Client".to_string(), Value::String("postq".to_string()));

	let query = "{ Aggregate { Post { meta { count } } } }";
	let response = graphql::execute(&cfg, query).await.expect("Query must succeed.");

	assert_eq!(response, envelope);

	let requests = store.requests();

	assert_eq!(requests.len(), 1);

	let request = &requests[0];

	assert_eq!(request.query(), Some(query));
	assert_eq!(
		request.headers.get("authorization").map(String::as_str),
		Some("Bearer test-api-key")
	);
	assert_eq!(
		request.headers.get(VECTORIZER_KEY_HEADER).map(String::as_str),
		Some("test-vectorizer-key")
	);
	assert_eq!(request.headers.get("x-client").map(String::as_str), Some("postq"));
}

#[tokio::test]
async fn graphql_errors_are_returned_verbatim() {
	let envelope = serde_json::json!({ "errors": [{ "message": "Cannot query field" }] });
	let store = MockStore::start(envelope.clone()).await.expect("Failed to start mock store.");
	let response =
		graphql::execute(&store.store_config(), "{ Get }").await.expect("Transport must succeed.");

	assert_eq!(response, envelope);
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
	let store = MockStore::start_with_status(401, serde_json::json!({ "error": "unauthorized" }))
		.await
		.expect("Failed to start mock store.");
	let err = graphql::execute(&store.store_config(), "{ Get }")
		.await
		.expect_err("Expected status error.");
	let Error::Status { status, body } = err else {
		panic!("Expected a status error, got {err:?}.");
	};

	assert_eq!(status, 401);
	assert!(body.contains("unauthorized"), "{body}");
}

#[tokio::test]
async fn unreachable_store_is_a_transport_error() {
	let store = MockStore::start(Value::Null).await.expect("Failed to start mock store.");
	let mut cfg = store.store_config();

	cfg.graphql_path = "/missing".to_string();

	assert!(matches!(
		graphql::execute(&cfg, "{ Get }").await,
		Err(Error::Status { status: 404, .. })
	));

	cfg.url = "http://127.0.0.1:1".to_string();

	assert!(matches!(graphql::execute(&cfg, "{ Get }").await, Err(Error::Reqwest(_))));
}
