mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Query, Service, Store};

use std::{env, fs, path::Path};

pub const ENV_STORE_URL: &str = "WEAVIATE_URL";
pub const ENV_STORE_API_KEY: &str = "WEAVIATE_API_KEY";
pub const ENV_VECTORIZER_KEY: &str = "OPENAI_API_KEY";

/// Builds the process configuration from an optional TOML file and the environment.
pub fn load(path: Option<&Path>) -> Result<Config> {
	let cfg = match path {
		Some(path) => read(path)?,
		None => Config::default(),
	};

	resolve(cfg, |name| env::var(name).ok())
}

pub fn read(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	toml::from_str(&raw).map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })
}

/// Applies credential overrides from `lookup`, then normalizes and validates.
pub fn resolve<F>(mut cfg: Config, lookup: F) -> Result<Config>
where
	F: Fn(&str) -> Option<String>,
{
	for (name, slot) in [
		(ENV_STORE_URL, &mut cfg.store.url),
		(ENV_STORE_API_KEY, &mut cfg.store.api_key),
		(ENV_VECTORIZER_KEY, &mut cfg.store.vectorizer_key),
	] {
		if let Some(value) = lookup(name)
			&& !value.trim().is_empty()
		{
			*slot = value;
		}
	}

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (name, value) in [
		(ENV_STORE_URL, &cfg.store.url),
		(ENV_STORE_API_KEY, &cfg.store.api_key),
		(ENV_VECTORIZER_KEY, &cfg.store.vectorizer_key),
	] {
		if value.is_empty() {
			return Err(Error::MissingCredential { name });
		}
	}

	if !(cfg.store.url.starts_with("http://") || cfg.store.url.starts_with("https://")) {
		return Err(Error::Validation {
			message: "store.url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.store.collection.is_empty() {
		return Err(Error::Validation {
			message: "store.collection must be non-empty.".to_string(),
		});
	}
	if !cfg.store.graphql_path.starts_with('/') {
		return Err(Error::Validation {
			message: "store.graphql_path must start with '/'.".to_string(),
		});
	}
	if cfg.store.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "store.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.store.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("store.default_headers.{key} must be a string."),
			});
		}
	}

	for (label, value) in [
		("query.default_limit", cfg.query.default_limit),
		("query.trending_window_days", cfg.query.trending_window_days),
		("query.trending_limit", cfg.query.trending_limit),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	if cfg.query.preview_chars == 0 {
		return Err(Error::Validation {
			message: "query.preview_chars must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.store.url = cfg.store.url.trim().trim_end_matches('/').to_string();
	cfg.store.api_key = cfg.store.api_key.trim().to_string();
	cfg.store.vectorizer_key = cfg.store.vectorizer_key.trim().to_string();
	cfg.store.collection = cfg.store.collection.trim().to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
