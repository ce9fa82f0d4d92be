// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tab contents as header-keyed records.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::SheetsClient;
use crate::error::SheetsError;
use crate::locator::TabHandle;
use crate::values::CellValue;

/// One data row, keyed by the header row's text in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordRow(IndexMap<String, CellValue>);

impl RecordRow {
	pub fn get(&self, header: &str) -> Option<&CellValue> {
		self.0.get(header)
	}

	pub fn headers(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_inner(self) -> IndexMap<String, CellValue> {
		self.0
	}
}

/// Convert a row-major grid into records.
///
/// The first row supplies the keys. Short rows are padded with blanks, cells
/// past the header width are dropped, and blank rows between data rows are
/// kept. When two headers carry the same text the later column's value is
/// stored under the earlier column's position.
pub fn records_from_grid(grid: Vec<Vec<Value>>) -> Vec<RecordRow> {
	let mut rows = grid.into_iter();
	let headers: Vec<String> = match rows.next() {
		Some(header_row) => header_row.iter().map(|v| CellValue::from_json(v).as_header()).collect(),
		None => return Vec::new(),
	};

	rows
		.map(|row| {
			let mut cells = row.into_iter();
			let mut record = IndexMap::with_capacity(headers.len());
			for header in &headers {
				let cell = cells.next().map(|v| CellValue::from_json(&v)).unwrap_or(CellValue::Blank);
				record.insert(header.clone(), cell);
			}
			RecordRow(record)
		})
		.collect()
}

/// Fetch every populated cell of the tab and return its records.
#[instrument(skip(client, tab), fields(spreadsheet_id = %tab.spreadsheet_id, title = %tab.title))]
pub async fn read_records(client: &SheetsClient, tab: &TabHandle) -> Result<Vec<RecordRow>, SheetsError> {
	let values = client.get_values(&tab.spreadsheet_id, &tab.range()).await?;
	let records = records_from_grid(values.values);
	debug!(records = records.len(), "Tab read");
	Ok(records)
}
