use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub store: Store,
	pub query: Query,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

/// Connection settings for the vector store.
///
/// `url`, `api_key` and `vectorizer_key` are opaque; they are forwarded to the executor as-is.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Store {
	pub url: String,
	pub api_key: String,
	/// Key the store forwards to its text vectorizer module.
	pub vectorizer_key: String,
	pub collection: String,
	pub graphql_path: String,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}
impl Default for Store {
	fn default() -> Self {
		Self {
			url: String::new(),
			api_key: String::new(),
			vectorizer_key: String::new(),
			collection: "Post".to_string(),
			graphql_path: "/v1/graphql".to_string(),
			timeout_ms: 30_000,
			default_headers: Map::new(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Query {
	pub default_limit: u32,
	pub trending_window_days: u32,
	pub trending_limit: u32,
	pub preview_chars: usize,
}
impl Default for Query {
	fn default() -> Self {
		Self { default_limit: 10, trending_window_days: 7, trending_limit: 20, preview_chars: 500 }
	}
}
