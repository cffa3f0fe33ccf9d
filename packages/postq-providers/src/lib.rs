pub mod graphql;

mod error;

pub use error::{Error, Result};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

/// Header carrying the vectorizer key the store forwards to its embedding module.
pub const VECTORIZER_KEY_HEADER: &str = "x-openai-api-key";

pub fn auth_headers(
	api_key: &str,
	vectorizer_key: &str,
	default_headers: &Map<String, Value>,
) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	let mut authorization: HeaderValue = format!("Bearer {api_key}").parse()?;
	let mut vectorizer: HeaderValue = vectorizer_key.parse()?;

	authorization.set_sensitive(true);
	vectorizer.set_sensitive(true);
	headers.insert(AUTHORIZATION, authorization);
	headers.insert(HeaderName::from_static(VECTORIZER_KEY_HEADER), vectorizer);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}
