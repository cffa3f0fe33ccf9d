//! GraphQL text for the four supported query shapes.

use std::fmt::{Display, Formatter};

use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Error, Result,
	filter::{self, Filter, Predicate},
};

pub const DEFAULT_COLLECTION: &str = "Post";
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_TRENDING_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_TRENDING_LIMIT: u32 = 20;
/// Text-array property ranked by the trending aggregation.
pub const TERM_PROPERTY: &str = "hashtags";
/// Properties requested for every returned post.
pub const POST_FIELDS: [&str; 13] = [
	"postId",
	"content",
	"authorName",
	"authorUsername",
	"publishedAt",
	"likes",
	"comments",
	"shares",
	"engagementTotal",
	"hashtags",
	"postUrl",
	"profileId",
	"workspaceIds",
];

/// Store class name. Always a GraphQL name starting with an uppercase ASCII letter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection(String);
impl Collection {
	pub fn new(name: impl Into<String>) -> Result<Self> {
		let name = name.into();
		let mut chars = name.chars();
		let valid = chars.next().is_some_and(|first| first.is_ascii_uppercase())
			&& chars.all(|c| c == '_' || c.is_ascii_alphanumeric());

		if !valid {
			return Err(Error::validation(format!(
				"Collection name '{name}' must start with an uppercase letter and contain only \
				 letters, digits, or underscores."
			)));
		}

		Ok(Self(name))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Default for Collection {
	fn default() -> Self {
		Self(DEFAULT_COLLECTION.to_string())
	}
}
impl Display for Collection {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Clone, Debug)]
pub struct SearchRequest {
	pub concept: String,
	pub limit: u32,
	pub predicate: Predicate,
}
impl SearchRequest {
	pub fn new(concept: impl Into<String>) -> Self {
		Self { concept: concept.into(), limit: DEFAULT_SEARCH_LIMIT, predicate: Predicate::Empty }
	}

	pub fn with_limit(mut self, limit: u32) -> Self {
		self.limit = limit;

		self
	}

	pub fn with_predicate(mut self, predicate: Predicate) -> Self {
		self.predicate = predicate;

		self
	}
}

#[derive(Clone, Debug)]
pub struct SimilarRequest {
	pub object_id: Uuid,
	pub limit: u32,
	pub predicate: Predicate,
}
impl SimilarRequest {
	pub fn new(object_id: Uuid) -> Self {
		Self { object_id, limit: DEFAULT_SEARCH_LIMIT, predicate: Predicate::Empty }
	}

	pub fn with_limit(mut self, limit: u32) -> Self {
		self.limit = limit;

		self
	}

	pub fn with_predicate(mut self, predicate: Predicate) -> Self {
		self.predicate = predicate;

		self
	}
}

/// Top-occurrence aggregation over posts published inside a trailing window.
#[derive(Clone, Debug)]
pub struct TrendingRequest {
	pub predicate: Predicate,
	pub window_days: u32,
	pub limit: u32,
	/// Reference instant the window is measured back from.
	pub now: OffsetDateTime,
}
impl TrendingRequest {
	pub fn new(now: OffsetDateTime) -> Self {
		Self {
			predicate: Predicate::Empty,
			window_days: DEFAULT_TRENDING_WINDOW_DAYS,
			limit: DEFAULT_TRENDING_LIMIT,
			now,
		}
	}

	pub fn with_window_days(mut self, window_days: u32) -> Self {
		self.window_days = window_days;

		self
	}

	pub fn with_limit(mut self, limit: u32) -> Self {
		self.limit = limit;

		self
	}

	pub fn with_predicate(mut self, predicate: Predicate) -> Self {
		self.predicate = predicate;

		self
	}
}

#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
	collection: Collection,
}
impl QueryBuilder {
	pub fn new(collection: Collection) -> Self {
		Self { collection }
	}

	pub fn collection(&self) -> &Collection {
		&self.collection
	}

	pub fn semantic_search(&self, req: &SearchRequest) -> Result<String> {
		if req.concept.trim().is_empty() {
			return Err(Error::validation("Search text must be non-empty."));
		}

		ensure_positive("limit", req.limit)?;

		let mut arguments = vec![
			format!("nearText: {{ concepts: [{}] }}", filter::quote(&req.concept)),
			format!("limit: {}", req.limit),
		];

		arguments.extend(where_argument(&req.predicate)?);

		Ok(self.get_query(&arguments))
	}

	/// Counts matching posts; with an empty predicate the whole collection is counted.
	pub fn count(&self, predicate: &Predicate) -> Result<String> {
		let selection = ["meta {".to_string(), "  count".to_string(), "}".to_string()];

		self.aggregate_query(predicate, &selection)
	}

	pub fn top_occurrences(&self, req: &TrendingRequest) -> Result<String> {
		ensure_positive("window_days", req.window_days)?;
		ensure_positive("limit", req.limit)?;

		let since = filter::window_start(req.now, req.window_days)?;
		let predicate = req.predicate.clone().and(Filter::published_since(since)?);
		let selection = [
			format!("{TERM_PROPERTY} {{"),
			"  count".to_string(),
			format!("  topOccurrences(limit: {}) {{", req.limit),
			"    value".to_string(),
			"    occurs".to_string(),
			"  }".to_string(),
			"}".to_string(),
		];

		self.aggregate_query(&predicate, &selection)
	}

	/// Nearest neighbours of a stored object. One extra slot is requested because the store
	/// returns the source object itself as the closest match.
	pub fn similar(&self, req: &SimilarRequest) -> Result<String> {
		ensure_positive("limit", req.limit)?;

		let mut arguments = vec![
			format!("nearObject: {{ id: {} }}", filter::quote(&req.object_id.to_string())),
			format!("limit: {}", req.limit.saturating_add(1)),
		];

		arguments.extend(where_argument(&req.predicate)?);

		Ok(self.get_query(&arguments))
	}

	fn get_query(&self, arguments: &[String]) -> String {
		let mut query = String::from("{\n  Get {\n");

		query.push_str(&format!("    {}(\n", self.collection));

		for argument in arguments {
			query.push_str(&format!("      {argument}\n"));
		}

		query.push_str("    ) {\n");

		for field in POST_FIELDS {
			query.push_str(&format!("      {field}\n"));
		}

		query.push_str("      _additional { id certainty }\n    }\n  }\n}\n");

		query
	}

	fn aggregate_query(&self, predicate: &Predicate, selection: &[String]) -> Result<String> {
		let mut query = String::from("{\n  Aggregate {\n");

		match where_argument(predicate)? {
			Some(argument) =>
				query.push_str(&format!("    {}(\n      {argument}\n    ) {{\n", self.collection)),
			None => query.push_str(&format!("    {} {{\n", self.collection)),
		}

		for line in selection {
			query.push_str(&format!("      {line}\n"));
		}

		query.push_str("    }\n  }\n}\n");

		Ok(query)
	}
}

fn where_argument(predicate: &Predicate) -> Result<Option<String>> {
	Ok(predicate.render()?.map(|clause| format!("where: {clause}")))
}

fn ensure_positive(label: &str, value: u32) -> Result<()> {
	if value == 0 {
		return Err(Error::validation(format!("{label} must be greater than zero.")));
	}

	Ok(())
}
