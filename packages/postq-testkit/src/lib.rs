mod error;

pub use error::{Error, Result};

use std::{
	collections::HashMap,
	future::IntoFuture,
	sync::{Arc, Mutex},
};

use axum::{
	Json, Router,
	extract::State,
	http::{HeaderMap, StatusCode},
	response::IntoResponse,
	routing,
};
use serde_json::{Map, Value};
use tokio::{
	net::TcpListener,
	sync::{oneshot, oneshot::Sender},
};

pub const GRAPHQL_PATH: &str = "/v1/graphql";

#[derive(Clone, Debug)]
pub struct RecordedRequest {
	/// Lower-cased header names.
	pub headers: HashMap<String, String>,
	pub body: Value,
}
impl RecordedRequest {
	pub fn query(&self) -> Option<&str> {
		self.body.get("query").and_then(Value::as_str)
	}
}

struct MockState {
	status: StatusCode,
	response: Value,
	requests: Mutex<Vec<RecordedRequest>>,
}

/// A GraphQL endpoint on a loopback port that answers every request with one canned response.
pub struct MockStore {
	url: String,
	state: Arc<MockState>,
	shutdown: Option<Sender<()>>,
}
impl MockStore {
	pub async fn start(response: Value) -> Result<Self> {
		Self::start_with_status(200, response).await
	}

	pub async fn start_with_status(status: u16, response: Value) -> Result<Self> {
		let status = StatusCode::from_u16(status)
			.map_err(|err| Error::Message(format!("Invalid mock status {status}: {err}.")))?;
		let state =
			Arc::new(MockState { status, response, requests: Mutex::new(Vec::new()) });
		let app = Router::new()
			.route(GRAPHQL_PATH, routing::post(graphql_handler))
			.with_state(state.clone());
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let (tx, rx) = oneshot::channel();
		let server = axum::serve(listener, app).with_graceful_shutdown(async move {
			let _ = rx.await;
		});

		tokio::spawn(async move {
			let _ = server.into_future().await;
		});

		Ok(Self { url: format!("http://{addr}"), state, shutdown: Some(tx) })
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	/// Store settings pointing at this mock with fixed test credentials.
	pub fn store_config(&self) -> postq_config::Store {
		postq_config::Store {
			url: self.url.clone(),
			api_key: "test-api-key".to_string(),
			vectorizer_key: "test-vectorizer-key".to_string(),
			collection: "Post".to_string(),
			graphql_path: GRAPHQL_PATH.to_string(),
			timeout_ms: 5_000,
			default_headers: Map::new(),
		}
	}
}
impl Drop for MockStore {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

async fn graphql_handler(
	State(state): State<Arc<MockState>>,
	headers: HeaderMap,
	Json(body): Json<Value>,
) -> impl IntoResponse {
	let headers = headers
		.iter()
		.filter_map(|(name, value)| {
			value.to_str().ok().map(|value| (name.as_str().to_string(), value.to_string()))
		})
		.collect();

	state
		.requests
		.lock()
		.unwrap_or_else(|err| err.into_inner())
		.push(RecordedRequest { headers, body });

	(state.status, Json(state.response.clone()))
}
