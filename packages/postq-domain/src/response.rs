//! Payload extraction from GraphQL response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result, query::{Collection, TERM_PROPERTY}};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub post_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub author_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub author_username: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub published_at: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub likes: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub comments: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub shares: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub engagement_total: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hashtags: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub post_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub profile_id: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub workspace_ids: Option<Vec<i64>>,
	#[serde(rename = "_additional", skip_serializing_if = "Option::is_none")]
	pub additional: Option<Additional>,
}
impl Post {
	/// Match confidence in `0.0..=1.0`, when the store reported one.
	pub fn certainty(&self) -> Option<f64> {
		self.additional.as_ref().and_then(|additional| additional.certainty)
	}

	pub fn object_id(&self) -> Option<Uuid> {
		self.additional
			.as_ref()
			.and_then(|additional| additional.id.as_deref())
			.and_then(|id| Uuid::parse_str(id).ok())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Additional {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub certainty: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TermOccurrence {
	pub value: String,
	pub occurs: u64,
}

/// Fails with [`Error::QueryFailed`] when the envelope reports errors. `data` is not inspected.
pub fn ensure_no_errors(envelope: &Value) -> Result<()> {
	match envelope.get("errors") {
		None | Some(Value::Null) => Ok(()),
		Some(Value::Array(errors)) if errors.is_empty() => Ok(()),
		Some(errors) => Err(Error::QueryFailed { errors: errors.clone() }),
	}
}

pub fn search_results(envelope: &Value, collection: &Collection) -> Result<Vec<Post>> {
	ensure_no_errors(envelope)?;

	match envelope.pointer(&format!("/data/Get/{collection}")) {
		None | Some(Value::Null) => Ok(Vec::new()),
		Some(Value::Array(records)) => {
			let mut posts = Vec::with_capacity(records.len());

			for record in records {
				posts.push(Post::deserialize(record)?);
			}

			Ok(posts)
		},
		Some(_) => Err(Error::invalid_response(format!("data.Get.{collection} must be a list."))),
	}
}

/// Neighbours of `source`, without `source` itself, capped at `limit`.
pub fn similar_results(
	envelope: &Value,
	collection: &Collection,
	source: Uuid,
	limit: u32,
) -> Result<Vec<Post>> {
	let mut posts = search_results(envelope, collection)?;

	posts.retain(|post| post.object_id() != Some(source));
	posts.truncate(limit as usize);

	Ok(posts)
}

/// Missing aggregation levels count as zero matches.
pub fn count_result(envelope: &Value, collection: &Collection) -> Result<u64> {
	ensure_no_errors(envelope)?;

	match aggregate_group(envelope, collection).and_then(|group| group.pointer("/meta/count")) {
		None | Some(Value::Null) => Ok(0),
		Some(count) => count.as_u64().ok_or_else(|| {
			Error::invalid_response(format!(
				"data.Aggregate.{collection}.meta.count must be a non-negative integer."
			))
		}),
	}
}

/// Ranked terms in the order the store returned them.
pub fn top_occurrences_result(
	envelope: &Value,
	collection: &Collection,
) -> Result<Vec<TermOccurrence>> {
	ensure_no_errors(envelope)?;

	let pointer = format!("/{TERM_PROPERTY}/topOccurrences");

	match aggregate_group(envelope, collection).and_then(|group| group.pointer(&pointer)) {
		None | Some(Value::Null) => Ok(Vec::new()),
		Some(Value::Array(items)) => {
			let mut terms = Vec::with_capacity(items.len());

			for item in items {
				terms.push(TermOccurrence::deserialize(item)?);
			}

			Ok(terms)
		},
		Some(_) => Err(Error::invalid_response(format!(
			"data.Aggregate.{collection}.{TERM_PROPERTY}.topOccurrences must be a list."
		))),
	}
}

fn aggregate_group<'a>(envelope: &'a Value, collection: &Collection) -> Option<&'a Value> {
	envelope.pointer(&format!("/data/Aggregate/{collection}/0"))
}
