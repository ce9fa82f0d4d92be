// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite-backed query engine for the write path.

use std::str::FromStr;

use async_trait::async_trait;
use sheetlink_bridge::{QueryEngine, QueryError, ResultSet};
use sheetlink_sheets::Scalar;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::{Column, Executor, Row, Statement, TypeInfo, ValueRef};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct SqliteQueryEngine {
	pool: SqlitePool,
}

impl SqliteQueryEngine {
	/// Connect to an existing database, e.g. `sqlite:./warehouse.db`.
	#[instrument(skip(database_url))]
	pub async fn connect(database_url: &str) -> Result<Self, QueryError> {
		let options = SqliteConnectOptions::from_str(database_url)
			.map_err(|e| QueryError::Unavailable(format!("Invalid database URL: {e}")))?;

		let pool = SqlitePool::connect_with(options)
			.await
			.map_err(|e| QueryError::Unavailable(e.to_string()))?;

		debug!("database pool created");
		Ok(Self { pool })
	}
}

#[async_trait]
impl QueryEngine for SqliteQueryEngine {
	#[instrument(skip(self))]
	async fn execute(&self, query: &str) -> Result<ResultSet, QueryError> {
		let statement = (&self.pool)
			.prepare(query)
			.await
			.map_err(|e| QueryError::Execution(e.to_string()))?;
		let columns: Vec<String> = statement.columns().iter().map(|c| c.name().to_string()).collect();

		let rows = sqlx::query(query)
			.fetch_all(&self.pool)
			.await
			.map_err(|e| QueryError::Execution(e.to_string()))?;

		let rows = rows.iter().map(row_scalars).collect::<Result<Vec<_>, _>>()?;
		debug!(columns = columns.len(), rows = rows.len(), "Query executed");

		ResultSet::new(columns, rows)
	}
}

/// Map one row by each value's storage class.
fn row_scalars(row: &SqliteRow) -> Result<Vec<Scalar>, QueryError> {
	(0..row.len())
		.map(|i| {
			let raw = row.try_get_raw(i).map_err(decode_error)?;
			if raw.is_null() {
				return Ok(Scalar::Null);
			}
			let kind = raw.type_info().name().to_string();
			match kind.as_str() {
				"INTEGER" | "BOOLEAN" => row.try_get::<i64, _>(i).map(Scalar::Int),
				"REAL" | "NUMERIC" => row.try_get::<f64, _>(i).map(Scalar::Float),
				"BLOB" => row.try_get::<Vec<u8>, _>(i).map(|b| Scalar::Text(hex::encode(b))),
				_ => row.try_get::<String, _>(i).map(Scalar::Text),
			}
			.map_err(decode_error)
		})
		.collect()
}

fn decode_error(e: sqlx::Error) -> QueryError {
	QueryError::Execution(format!("Failed to decode value: {e}"))
}
