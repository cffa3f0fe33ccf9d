use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Sends one GraphQL document to the store and returns the decoded envelope.
///
/// A single attempt is made; non-2xx statuses surface as [`Error::Status`] with the body text.
pub async fn execute(cfg: &postq_config::Store, query: &str) -> Result<Value> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.url, cfg.graphql_path);
	let body = serde_json::json!({ "query": query });

	tracing::debug!(%url, "Sending GraphQL request.");

	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.vectorizer_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let status = res.status();

	if !status.is_success() {
		let body = res.text().await.unwrap_or_default();

		return Err(Error::Status { status: status.as_u16(), body });
	}

	let json: Value = res.json().await?;

	tracing::debug!(status = status.as_u16(), "GraphQL response decoded.");

	Ok(json)
}
