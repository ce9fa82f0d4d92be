// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The SQL engine collaborator used by the write path.

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use sheetlink_sheets::Scalar;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
	/// The engine rejected or failed to run the query.
	#[error("Query failed: {0}")]
	Execution(String),

	/// A result row does not have one value per column.
	#[error("Row {row} has {found} values, expected {expected}")]
	RowWidth { row: usize, expected: usize, found: usize },

	/// The engine could not be reached.
	#[error("Query engine unavailable: {0}")]
	Unavailable(String),
}

/// Column names plus rows, fully materialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
	columns: Vec<String>,
	rows: Vec<Vec<Scalar>>,
}

impl ResultSet {
	/// Every row must carry exactly one value per column.
	pub fn new(columns: Vec<String>, rows: Vec<Vec<Scalar>>) -> Result<Self, QueryError> {
		if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns.len()) {
			return Err(QueryError::RowWidth {
				row,
				expected: columns.len(),
				found: values.len(),
			});
		}
		Ok(Self { columns, rows })
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	pub fn rows(&self) -> &[Vec<Scalar>] {
		&self.rows
	}

	pub fn row_count(&self) -> usize {
		self.rows.len()
	}
}

/// Executes a query and returns its complete result.
#[async_trait]
pub trait QueryEngine: Send + Sync + Debug {
	async fn execute(&self, query: &str) -> Result<ResultSet, QueryError>;
}

/// Engine that answers a fixed set of queries from memory.
///
/// Unknown queries fail with [`QueryError::Execution`].
#[derive(Debug, Clone, Default)]
pub struct MemoryQueryEngine {
	results: HashMap<String, ResultSet>,
}

impl MemoryQueryEngine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_result(mut self, query: impl Into<String>, result: ResultSet) -> Self {
		self.results.insert(query.into(), result);
		self
	}
}

#[async_trait]
impl QueryEngine for MemoryQueryEngine {
	async fn execute(&self, query: &str) -> Result<ResultSet, QueryError> {
		self
			.results
			.get(query)
			.cloned()
			.ok_or_else(|| QueryError::Execution(format!("no result registered for query: {query}")))
	}
}
