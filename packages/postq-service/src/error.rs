pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Query(#[from] postq_domain::Error),
	#[error("Transport error: {0}")]
	Transport(#[from] postq_providers::Error),
}
