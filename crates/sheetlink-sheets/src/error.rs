// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the spreadsheet API client.

use thiserror::Error;

/// Errors that can occur when talking to the spreadsheet API.
#[derive(Debug, Error)]
pub enum SheetsError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("Request timed out")]
	Timeout,

	/// Spreadsheet or range does not exist, or is not visible to the identity.
	#[error("Not found: {0}")]
	NotFound(String),

	/// The spreadsheet exists but has no tab with the requested identifier.
	#[error("Tab {tab_id} not found in spreadsheet {spreadsheet_id}")]
	TabNotFound { spreadsheet_id: String, tab_id: i64 },

	/// The token was refused or lacks permission for the operation.
	#[error("Permission denied ({status}): {message}")]
	PermissionDenied { status: u16, message: String },

	/// Any other error status from the API.
	#[error("Spreadsheet API error: {status} - {message}")]
	ApiError { status: u16, message: String },

	/// Invalid or unparseable response.
	#[error("Invalid response from spreadsheet API: {0}")]
	InvalidResponse(String),

	/// The request could not be built (bad base URL or identifier).
	#[error("Invalid request: {0}")]
	InvalidRequest(String),
}

impl SheetsError {
	pub fn api_error(status: u16, message: impl Into<String>) -> Self {
		Self::ApiError {
			status,
			message: message.into(),
		}
	}

	pub fn tab_not_found(spreadsheet_id: impl Into<String>, tab_id: i64) -> Self {
		Self::TabNotFound {
			spreadsheet_id: spreadsheet_id.into(),
			tab_id,
		}
	}

	/// True for failures to reach the API at all.
	pub fn is_transport(&self) -> bool {
		matches!(self, SheetsError::Network(_) | SheetsError::Timeout)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tab_not_found_display() {
		let err = SheetsError::tab_not_found("S1", 42);
		assert_eq!(err.to_string(), "Tab 42 not found in spreadsheet S1");
	}

	#[test]
	fn transport_classification() {
		assert!(SheetsError::Timeout.is_transport());
		assert!(!SheetsError::NotFound("S1".to_string()).is_transport());
		assert!(!SheetsError::api_error(500, "backend").is_transport());
	}

	#[test]
	fn not_found_display_is_neutral() {
		let err = SheetsError::NotFound("spreadsheet id is empty".to_string());
		assert_eq!(err.to_string(), "Not found: spreadsheet id is empty");
	}
}
