mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use postq_config::Config;
use postq_domain::{
	Collection, Post, Predicate, QueryBuilder, SearchRequest, SimilarRequest, TermOccurrence,
	TrendingRequest, response,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Sends a built GraphQL document and returns the decoded response envelope.
pub trait QueryExecutor
where
	Self: Send + Sync,
{
	fn execute<'a>(&'a self, query: &'a str) -> BoxFuture<'a, postq_providers::Result<Value>>;
}

/// Executes against the configured store over HTTP.
pub struct HttpExecutor {
	store: postq_config::Store,
}
impl HttpExecutor {
	pub fn new(store: postq_config::Store) -> Self {
		Self { store }
	}
}
impl QueryExecutor for HttpExecutor {
	fn execute<'a>(&'a self, query: &'a str) -> BoxFuture<'a, postq_providers::Result<Value>> {
		Box::pin(postq_providers::graphql::execute(&self.store, query))
	}
}

pub struct PostqService {
	pub cfg: Config,
	pub executor: Arc<dyn QueryExecutor>,
	builder: QueryBuilder,
}
impl PostqService {
	pub fn new(cfg: Config) -> Result<Self> {
		let executor = Arc::new(HttpExecutor::new(cfg.store.clone()));

		Self::with_executor(cfg, executor)
	}

	pub fn with_executor(cfg: Config, executor: Arc<dyn QueryExecutor>) -> Result<Self> {
		let builder = QueryBuilder::new(Collection::new(cfg.store.collection.clone())?);

		Ok(Self { cfg, executor, builder })
	}

	pub fn collection(&self) -> &Collection {
		self.builder.collection()
	}

	pub async fn search(&self, req: &SearchRequest) -> Result<Vec<Post>> {
		let query = self.builder.semantic_search(req)?;
		let envelope = self.run("search", &query).await?;

		Ok(response::search_results(&envelope, self.collection())?)
	}

	pub async fn count(&self, predicate: &Predicate) -> Result<u64> {
		let query = self.builder.count(predicate)?;
		let envelope = self.run("count", &query).await?;

		Ok(response::count_result(&envelope, self.collection())?)
	}

	pub async fn trending(&self, req: &TrendingRequest) -> Result<Vec<TermOccurrence>> {
		let query = self.builder.top_occurrences(req)?;
		let envelope = self.run("trending", &query).await?;

		Ok(response::top_occurrences_result(&envelope, self.collection())?)
	}

	pub async fn similar(&self, req: &SimilarRequest) -> Result<Vec<Post>> {
		let query = self.builder.similar(req)?;
		let envelope = self.run("similar", &query).await?;

		Ok(response::similar_results(&envelope, self.collection(), req.object_id, req.limit)?)
	}

	async fn run(&self, shape: &'static str, query: &str) -> Result<Value> {
		tracing::debug!(shape, %query, "Executing GraphQL query.");

		let envelope = self.executor.execute(query).await?;

		if let Err(err) = response::ensure_no_errors(&envelope) {
			tracing::warn!(shape, error = %err, "Store rejected the query.");

			return Err(err.into());
		}

		Ok(envelope)
	}
}
