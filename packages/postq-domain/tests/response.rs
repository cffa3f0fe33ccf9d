use serde_json::json;
use uuid::Uuid;

use postq_domain::{Collection, Error, TermOccurrence, response};

const SOURCE_ID: &str = "36ddd591-2dee-4e7e-a3cc-eb86d30a4303";
const OTHER_ID: &str = "8d5a2a6e-0bb4-4b43-9d35-1d9b8c0f6a11";

fn post_record(post_id: &str, object_id: &str, certainty: f64) -> serde_json::Value {
	json!({
		"postId": post_id,
		"content": "Automation is eating finance.",
		"authorName": "Ada",
		"authorUsername": "ada",
		"publishedAt": "2026-10-01T08:00:00Z",
		"likes": 40,
		"comments": 8,
		"shares": 2,
		"engagementTotal": 50,
		"hashtags": ["ai", "finance"],
		"postUrl": "https://example.com/p/1",
		"profileId": 3,
		"workspaceIds": [1, 3],
		"_additional": { "id": object_id, "certainty": certainty }
	})
}

#[test]
fn errors_take_precedence_over_data() {
	let envelope = json!({
		"errors": [{ "message": "no such class Post", "path": ["Get", "Post"] }],
		"data": { "Get": { "Post": [post_record("1", SOURCE_ID, 0.9)] } }
	});
	let err = response::search_results(&envelope, &Collection::default())
		.expect_err("Expected query failure.");
	let Error::QueryFailed { errors } = err else {
		panic!("Expected QueryFailed, got {err:?}.");
	};

	assert_eq!(errors, json!([{ "message": "no such class Post", "path": ["Get", "Post"] }]));
}

#[test]
fn empty_or_null_errors_are_ignored() {
	for envelope in [
		json!({ "errors": [], "data": { "Aggregate": { "Post": [{ "meta": { "count": 3 } }] } } }),
		json!({
			"errors": null,
			"data": { "Aggregate": { "Post": [{ "meta": { "count": 3 } }] } }
		}),
	] {
		assert_eq!(
			response::count_result(&envelope, &Collection::default()).expect("Count must parse."),
			3
		);
	}
}

#[test]
fn search_results_decode_posts() {
	let envelope = json!({ "data": { "Get": { "Post": [post_record("1", SOURCE_ID, 0.87)] } } });
	let posts =
		response::search_results(&envelope, &Collection::default()).expect("Posts must parse.");

	assert_eq!(posts.len(), 1);

	let post = &posts[0];

	assert_eq!(post.post_id.as_deref(), Some("1"));
	assert_eq!(post.engagement_total, Some(50));
	assert_eq!(post.workspace_ids, Some(vec![1, 3]));
	assert_eq!(post.certainty(), Some(0.87));
	assert_eq!(post.object_id(), Uuid::parse_str(SOURCE_ID).ok());
}

#[test]
fn search_without_matches_is_empty() {
	for envelope in [
		json!({ "data": { "Get": { "Post": [] } } }),
		json!({ "data": { "Get": { "Post": null } } }),
		json!({ "data": {} }),
		json!({}),
	] {
		let posts = response::search_results(&envelope, &Collection::default())
			.expect("Empty payload must parse.");

		assert!(posts.is_empty(), "{envelope}");
	}
}

#[test]
fn search_rejects_non_list_payload() {
	let envelope = json!({ "data": { "Get": { "Post": { "postId": "1" } } } });

	assert!(matches!(
		response::search_results(&envelope, &Collection::default()),
		Err(Error::InvalidResponse { .. })
	));
}

#[test]
fn posts_tolerate_null_fields() {
	let envelope = json!({ "data": { "Get": { "Post": [
		{ "postId": "2", "hashtags": null, "likes": null }
	] } } });
	let posts =
		response::search_results(&envelope, &Collection::default()).expect("Posts must parse.");

	assert_eq!(posts[0].hashtags, None);
	assert_eq!(posts[0].certainty(), None);
}

#[test]
fn missing_count_defaults_to_zero() {
	for envelope in [
		json!({ "data": { "Aggregate": { "Post": [{ "meta": {} }] } } }),
		json!({ "data": { "Aggregate": { "Post": [] } } }),
		json!({ "data": { "Aggregate": {} } }),
		json!({ "data": null }),
	] {
		assert_eq!(
			response::count_result(&envelope, &Collection::default()).expect("Count must parse."),
			0,
			"{envelope}"
		);
	}
}

#[test]
fn negative_count_is_invalid() {
	let envelope = json!({ "data": { "Aggregate": { "Post": [{ "meta": { "count": -1 } }] } } });

	assert!(matches!(
		response::count_result(&envelope, &Collection::default()),
		Err(Error::InvalidResponse { .. })
	));
}

#[test]
fn top_occurrences_keep_store_order() {
	let envelope = json!({
		"data": { "Aggregate": { "Post": [{
			"hashtags": {
				"count": 31,
				"topOccurrences": [
					{ "value": "ai", "occurs": 12 },
					{ "value": "automation", "occurs": 12 },
					{ "value": "fintech", "occurs": 4 }
				]
			}
		}] } }
	});
	let terms = response::top_occurrences_result(&envelope, &Collection::default())
		.expect("Terms must parse.");

	assert_eq!(
		terms,
		vec![
			TermOccurrence { value: "ai".to_string(), occurs: 12 },
			TermOccurrence { value: "automation".to_string(), occurs: 12 },
			TermOccurrence { value: "fintech".to_string(), occurs: 4 },
		]
	);
}

#[test]
fn top_occurrences_missing_is_empty() {
	let envelope = json!({ "data": { "Aggregate": { "Post": [{ "hashtags": null }] } } });

	assert!(
		response::top_occurrences_result(&envelope, &Collection::default())
			.expect("Terms must parse.")
			.is_empty()
	);
}

#[test]
fn similar_results_drop_source_and_cap() {
	let envelope = json!({ "data": { "Get": { "Post": [
		post_record("1", SOURCE_ID, 1.0),
		post_record("2", OTHER_ID, 0.91),
		post_record("3", "not-a-uuid", 0.85),
	] } } });
	let source = Uuid::parse_str(SOURCE_ID).expect("Valid uuid.");
	let posts = response::similar_results(&envelope, &Collection::default(), source, 1)
		.expect("Posts must parse.");

	assert_eq!(posts.len(), 1);
	assert_eq!(posts[0].post_id.as_deref(), Some("2"));
}

#[test]
fn custom_collection_is_read() {
	let collection = Collection::new("Article").expect("Valid collection.");
	let envelope = json!({ "data": { "Aggregate": { "Article": [{ "meta": { "count": 9 } }] } } });

	assert_eq!(response::count_result(&envelope, &collection).expect("Count must parse."), 9);
}
