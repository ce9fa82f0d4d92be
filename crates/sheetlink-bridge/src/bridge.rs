// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The read and write pipelines.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use reqwest::Client;
use sheetlink_auth::{Operation, TokenBroker};
use sheetlink_credentials::{load_service_identity, SecretStore};
use sheetlink_sheets::{
	locate_tab, read_records, write_grid, RecordRow, ResultGrid, SheetsClient, UpdateSummary,
};
use tracing::{error, info, instrument};

use crate::config::BridgeConfig;
use crate::engine::QueryEngine;
use crate::error::BridgeError;
use crate::outcome::{Failure, ReadOutcome, WriteOutcome};

/// Secret name used when none is configured.
pub const DEFAULT_SECRET_NAME: &str = "gsheets_credentials";

/// Moves data between a query engine and spreadsheet tabs.
///
/// Every call loads the credential, mints a fresh token and resolves the tab
/// again; nothing is shared between calls except the injected collaborators.
#[derive(Debug, Clone)]
pub struct SheetBridge {
	secret_store: Arc<dyn SecretStore>,
	http_client: Client,
	config: BridgeConfig,
	secret_name: String,
}

impl SheetBridge {
	pub fn new(secret_store: Arc<dyn SecretStore>, http_client: Client, config: BridgeConfig) -> Self {
		Self {
			secret_store,
			http_client,
			config,
			secret_name: DEFAULT_SECRET_NAME.to_string(),
		}
	}

	/// Name under which the service identity is stored.
	pub fn with_secret_name(mut self, name: impl Into<String>) -> Self {
		self.secret_name = name.into();
		self
	}

	pub fn config(&self) -> &BridgeConfig {
		&self.config
	}

	pub fn secret_name(&self) -> &str {
		&self.secret_name
	}

	/// Read every record of a tab.
	///
	/// Never fails: errors and panics become [`ReadOutcome::Failed`] with the
	/// spreadsheet id as context.
	#[instrument(skip(self), fields(secret_name = %self.secret_name))]
	pub async fn read(&self, spreadsheet_id: &str, tab_id: i64) -> ReadOutcome {
		match guarded(self.try_read(spreadsheet_id, tab_id)).await {
			Ok(records) => {
				info!(records = records.len(), "Read complete");
				ReadOutcome::Records(records)
			}
			Err(e) => {
				let failure = Failure::from_error(&e, spreadsheet_id);
				error!(error_type = %failure.error_type, error = %e, "Read failed");
				ReadOutcome::Failed(failure)
			}
		}
	}

	/// Run `query` on `engine` and write its result to the top-left of a tab.
	///
	/// Never fails: errors and panics become [`WriteOutcome::Failed`] with the
	/// spreadsheet id as context.
	#[instrument(skip(self, engine), fields(secret_name = %self.secret_name))]
	pub async fn write(&self, query: &str, engine: &dyn QueryEngine, spreadsheet_id: &str, tab_id: i64) -> WriteOutcome {
		match guarded(self.try_write(query, engine, spreadsheet_id, tab_id)).await {
			Ok(summary) => {
				info!(updated_cells = summary.updated_cells, "Write complete");
				WriteOutcome::Success
			}
			Err(e) => {
				let failure = Failure::from_error(&e, spreadsheet_id);
				error!(error_type = %failure.error_type, error = %e, "Write failed");
				WriteOutcome::Failed(failure)
			}
		}
	}

	async fn connect(&self, operation: Operation) -> Result<SheetsClient, BridgeError> {
		let identity = load_service_identity(self.secret_store.as_ref(), &self.secret_name).await?;

		let broker = TokenBroker::new(self.http_client.clone())
			.with_scope_policy(self.config.scope_policy())
			.with_assertion_lifetime(self.config.assertion_lifetime());
		let token = broker.fetch_token(&identity, operation).await?;

		Ok(SheetsClient::new(self.http_client.clone(), token)?.with_base_url(self.config.sheets_base_url().clone()))
	}

	async fn try_read(&self, spreadsheet_id: &str, tab_id: i64) -> Result<Vec<RecordRow>, BridgeError> {
		let client = self.connect(Operation::Read).await?;
		let tab = locate_tab(&client, spreadsheet_id, tab_id).await?;
		Ok(read_records(&client, &tab).await?)
	}

	async fn try_write(
		&self,
		query: &str,
		engine: &dyn QueryEngine,
		spreadsheet_id: &str,
		tab_id: i64,
	) -> Result<UpdateSummary, BridgeError> {
		let client = self.connect(Operation::Write).await?;
		let tab = locate_tab(&client, spreadsheet_id, tab_id).await?;

		let result = engine.execute(query).await?;
		let grid = ResultGrid::from_result(result.columns(), result.rows());

		Ok(write_grid(&client, &tab, &grid, self.config.value_input()).await?)
	}
}

/// Run a pipeline, turning a panic anywhere inside it into an error.
async fn guarded<T, F>(pipeline: F) -> Result<T, BridgeError>
where
	F: Future<Output = Result<T, BridgeError>>,
{
	match AssertUnwindSafe(pipeline).catch_unwind().await {
		Ok(result) => result,
		Err(payload) => Err(BridgeError::Unexpected(panic_message(payload.as_ref()))),
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		format!("panic: {s}")
	} else if let Some(s) = payload.downcast_ref::<String>() {
		format!("panic: {s}")
	} else {
		"panic".to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::{QueryError, ResultSet};
	use crate::outcome::FailureKind;
	use async_trait::async_trait;
	use sheetlink_credentials::MemorySecretStore;

	#[derive(Debug)]
	struct PanickingEngine;

	#[async_trait]
	impl QueryEngine for PanickingEngine {
		async fn execute(&self, _query: &str) -> Result<ResultSet, QueryError> {
			panic!("engine exploded")
		}
	}

	fn bridge(store: MemorySecretStore) -> SheetBridge {
		SheetBridge::new(Arc::new(store), Client::new(), BridgeConfig::new())
	}

	async fn explode() -> Result<(), BridgeError> {
		panic!("kaboom")
	}

	async fn explode_owned() -> Result<(), BridgeError> {
		std::panic::panic_any(String::from("owned"))
	}

	#[tokio::test]
	async fn guarded_converts_panics() {
		match guarded(explode()).await {
			Err(BridgeError::Unexpected(message)) => assert_eq!(message, "panic: kaboom"),
			other => panic!("expected Unexpected, got {other:?}"),
		}

		let owned = guarded(explode_owned()).await;
		assert!(matches!(owned, Err(BridgeError::Unexpected(m)) if m == "panic: owned"));
	}

	#[tokio::test]
	async fn guarded_passes_results_through() {
		let ok = guarded(async { Ok::<_, BridgeError>(7u8) }).await;
		assert_eq!(ok.unwrap(), 7);
	}

	#[tokio::test]
	async fn panicking_engine_is_contained() {
		let err = guarded(PanickingEngine.execute("SELECT 1").map(|r| r.map_err(BridgeError::from)))
			.await
			.unwrap_err();
		assert_eq!(err.kind(), FailureKind::Unknown);
		assert!(err.to_string().contains("engine exploded"));
	}

	#[test]
	fn panic_message_falls_back() {
		let payload: Box<dyn Any + Send> = Box::new(42u32);
		assert_eq!(panic_message(payload.as_ref()), "panic");
	}

	#[tokio::test]
	async fn missing_secret_is_credential_error() {
		let outcome = bridge(MemorySecretStore::new()).read("S1", 0).await;
		let failure = outcome.failure().unwrap();
		assert_eq!(failure.error_type, FailureKind::Credential);
		assert_eq!(failure.context, "S1");
	}

	#[tokio::test]
	async fn malformed_secret_is_credential_error() {
		let store = MemorySecretStore::new().with_secret(DEFAULT_SECRET_NAME, "{not json");
		let outcome = bridge(store).write("SELECT 1", &PanickingEngine, "S1", 0).await;
		assert_eq!(outcome.failure().unwrap().error_type, FailureKind::Credential);
	}

	#[tokio::test]
	async fn custom_secret_name_is_used() {
		let store = MemorySecretStore::new().with_secret(DEFAULT_SECRET_NAME, "{}");
		let bridge = bridge(store).with_secret_name("other");
		assert_eq!(bridge.secret_name(), "other");

		let failure = bridge.read("S1", 0).await.failure().cloned().unwrap();
		assert_eq!(failure.error_type, FailureKind::Credential);
		assert!(failure.error.contains("other"), "{}", failure.error);
	}
}
