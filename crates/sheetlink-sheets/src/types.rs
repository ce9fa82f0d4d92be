// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Wire types for the spreadsheet API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Spreadsheet metadata, limited to the fields sheetlink requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
	pub spreadsheet_id: Option<String>,
	#[serde(default)]
	pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetEntry {
	pub properties: TabProperties,
}

/// Properties of one tab.
///
/// `sheet_id` is the tab's own immutable identifier; `index` is its current
/// position and is never used for resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabProperties {
	#[serde(default)]
	pub sheet_id: i64,
	pub title: String,
	#[serde(default)]
	pub index: i64,
}

/// A block of cell values, row-major.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub range: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub major_dimension: Option<String>,
	#[serde(default)]
	pub values: Vec<Vec<Value>>,
}

/// Summary returned by a grid update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
	pub updated_range: Option<String>,
	#[serde(default)]
	pub updated_rows: u64,
	#[serde(default)]
	pub updated_columns: u64,
	#[serde(default)]
	pub updated_cells: u64,
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
	pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
	#[serde(default)]
	pub message: String,
	#[serde(default)]
	pub status: Option<String>,
}

/// How written values are interpreted by the spreadsheet.
///
/// `Raw` stores values as given, so text that looks like a number stays text.
/// `UserEntered` parses them as if typed into the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueInputOption {
	#[default]
	Raw,
	UserEntered,
}

impl ValueInputOption {
	pub fn as_str(&self) -> &'static str {
		match self {
			ValueInputOption::Raw => "RAW",
			ValueInputOption::UserEntered => "USER_ENTERED",
		}
	}
}

impl fmt::Display for ValueInputOption {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ValueInputOption {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"raw" => Ok(ValueInputOption::Raw),
			"user_entered" | "user-entered" => Ok(ValueInputOption::UserEntered),
			other => Err(format!(
				"unknown value input option '{other}', expected 'raw' or 'user_entered'"
			)),
		}
	}
}

/// A1 range covering the whole tab, e.g. `'Q3 Sales'`.
pub fn tab_range(title: &str) -> String {
	format!("'{}'", title.replace('\'', "''"))
}

/// A1 range for a single cell of the tab, e.g. `'Q3 Sales'!A1`.
pub fn cell_range(title: &str, cell: &str) -> String {
	format!("{}!{}", tab_range(title), cell)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_spreadsheet_metadata() {
		let json = r#"{
			"spreadsheetId": "S1",
			"sheets": [
				{"properties": {"sheetId": 0, "title": "Sheet1", "index": 0, "sheetType": "GRID"}},
				{"properties": {"sheetId": 1723, "title": "Data", "index": 1}}
			]
		}"#;
		let parsed: Spreadsheet = serde_json::from_str(json).unwrap();
		assert_eq!(parsed.spreadsheet_id.as_deref(), Some("S1"));
		assert_eq!(parsed.sheets.len(), 2);
		assert_eq!(parsed.sheets[1].properties.sheet_id, 1723);
		assert_eq!(parsed.sheets[1].properties.title, "Data");
	}

	#[test]
	fn missing_values_is_empty() {
		let parsed: ValueRange =
			serde_json::from_str(r#"{"range": "'Sheet1'!A1:Z1000", "majorDimension": "ROWS"}"#).unwrap();
		assert!(parsed.values.is_empty());
	}

	#[test]
	fn ranges_quote_titles() {
		assert_eq!(tab_range("Sheet1"), "'Sheet1'");
		assert_eq!(tab_range("Bob's data"), "'Bob''s data'");
		assert_eq!(cell_range("Q3 Sales", "A1"), "'Q3 Sales'!A1");
	}

	#[test]
	fn value_input_option_parsing() {
		assert_eq!(ValueInputOption::default().as_str(), "RAW");
		assert_eq!(
			"USER_ENTERED".parse::<ValueInputOption>().unwrap(),
			ValueInputOption::UserEntered
		);
		assert!("formatted".parse::<ValueInputOption>().is_err());
	}
}
