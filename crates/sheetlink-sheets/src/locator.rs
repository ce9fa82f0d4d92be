// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Resolution of a (spreadsheet, tab id) pair to a concrete tab.

use tracing::{debug, instrument, warn};

use crate::client::SheetsClient;
use crate::error::SheetsError;
use crate::types::{cell_range, tab_range, TabProperties};

/// A resolved tab, ready for reading or writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabHandle {
	pub spreadsheet_id: String,
	pub sheet_id: i64,
	pub title: String,
	pub index: i64,
}

impl TabHandle {
	/// A1 range covering the whole tab.
	pub fn range(&self) -> String {
		tab_range(&self.title)
	}

	/// A1 range of the tab's top-left cell.
	pub fn origin(&self) -> String {
		cell_range(&self.title, "A1")
	}
}

/// Pick the tab whose immutable id equals `tab_id`.
///
/// Ids are unique in practice; if the API ever reports a duplicate the first
/// tab in listing order wins.
pub fn find_tab(tabs: &[TabProperties], tab_id: i64) -> Option<&TabProperties> {
	let mut matches = tabs.iter().filter(|tab| tab.sheet_id == tab_id);
	let first = matches.next()?;
	let duplicates = matches.count();
	if duplicates > 0 {
		warn!(
			tab_id,
			duplicates,
			title = %first.title,
			"Multiple tabs share the same id, using the first"
		);
	}
	Some(first)
}

/// Open `spreadsheet_id` and resolve `tab_id` against its tab list.
///
/// A spreadsheet that is missing or invisible to the caller is reported as
/// [`SheetsError::NotFound`]; an open spreadsheet with no such tab is
/// [`SheetsError::TabNotFound`].
#[instrument(skip(client))]
pub async fn locate_tab(client: &SheetsClient, spreadsheet_id: &str, tab_id: i64) -> Result<TabHandle, SheetsError> {
	if spreadsheet_id.trim().is_empty() {
		return Err(SheetsError::NotFound("spreadsheet id is empty".to_string()));
	}

	let spreadsheet = client.get_spreadsheet(spreadsheet_id).await.map_err(|e| match e {
		SheetsError::PermissionDenied { message, .. } => SheetsError::NotFound(format!("{spreadsheet_id}: {message}")),
		other => other,
	})?;

	let tabs: Vec<TabProperties> = spreadsheet.sheets.into_iter().map(|entry| entry.properties).collect();
	debug!(tabs = tabs.len(), "Spreadsheet opened");

	let tab = find_tab(&tabs, tab_id).ok_or_else(|| SheetsError::tab_not_found(spreadsheet_id, tab_id))?;

	Ok(TabHandle {
		spreadsheet_id: spreadsheet_id.to_string(),
		sheet_id: tab.sheet_id,
		title: tab.title.clone(),
		index: tab.index,
	})
}
