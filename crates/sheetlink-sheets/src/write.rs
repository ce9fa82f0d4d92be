// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Query results as a header-first grid anchored at the tab origin.

use serde_json::Value;
use tracing::{info, instrument};

use crate::client::SheetsClient;
use crate::error::SheetsError;
use crate::locator::TabHandle;
use crate::types::{UpdateSummary, ValueInputOption};
use crate::values::Scalar;

/// Column names followed by data rows, ready to write.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultGrid {
	rows: Vec<Vec<Value>>,
}

impl ResultGrid {
	/// Build a grid whose first row is `columns` and whose remaining rows are
	/// `rows` in order.
	pub fn from_result(columns: &[String], rows: &[Vec<Scalar>]) -> Self {
		let mut grid = Vec::with_capacity(rows.len() + 1);
		grid.push(columns.iter().cloned().map(Value::String).collect());
		grid.extend(rows.iter().map(|row| row.iter().map(Scalar::to_grid_value).collect()));
		Self { rows: grid }
	}

	pub fn rows(&self) -> &[Vec<Value>] {
		&self.rows
	}

	pub fn header(&self) -> &[Value] {
		&self.rows[0]
	}

	pub fn data_rows(&self) -> usize {
		self.rows.len() - 1
	}

	pub fn width(&self) -> usize {
		self.rows.iter().map(Vec::len).max().unwrap_or(0)
	}
}

/// Overwrite the tab's top-left region with `grid` in one update.
///
/// Cells outside the grid's rectangle are left untouched.
#[instrument(skip(client, tab, grid), fields(spreadsheet_id = %tab.spreadsheet_id, title = %tab.title, rows = grid.data_rows()))]
pub async fn write_grid(
	client: &SheetsClient,
	tab: &TabHandle,
	grid: &ResultGrid,
	input: ValueInputOption,
) -> Result<UpdateSummary, SheetsError> {
	let summary = client
		.update_values(&tab.spreadsheet_id, &tab.origin(), grid.rows(), input)
		.await?;
	info!(
		updated_range = summary.updated_range.as_deref().unwrap_or(""),
		updated_cells = summary.updated_cells,
		"Grid written"
	);
	Ok(summary)
}
