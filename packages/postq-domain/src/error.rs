use serde_json::Value;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid argument: {message}")]
	Validation { message: String },
	#[error("Query failed: {errors}")]
	QueryFailed { errors: Value },
	#[error("Invalid response: {message}")]
	InvalidResponse { message: String },
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
}
impl Error {
	pub(crate) fn validation(message: impl Into<String>) -> Self {
		Self::Validation { message: message.into() }
	}

	pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
		Self::InvalidResponse { message: message.into() }
	}
}
