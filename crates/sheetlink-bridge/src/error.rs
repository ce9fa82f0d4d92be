// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use sheetlink_auth::AuthError;
use sheetlink_credentials::CredentialError;
use sheetlink_sheets::SheetsError;
use thiserror::Error;

use crate::engine::QueryError;
use crate::outcome::FailureKind;

/// Any failure inside a read or write pipeline.
#[derive(Debug, Error)]
pub enum BridgeError {
	#[error(transparent)]
	Credential(#[from] CredentialError),

	#[error(transparent)]
	Auth(#[from] AuthError),

	#[error(transparent)]
	Sheets(#[from] SheetsError),

	#[error(transparent)]
	Query(#[from] QueryError),

	/// A panic or other failure with no typed source.
	#[error("Unexpected failure: {0}")]
	Unexpected(String),
}

impl BridgeError {
	/// The caller-facing classification of this failure.
	pub fn kind(&self) -> FailureKind {
		match self {
			BridgeError::Credential(_) => FailureKind::Credential,
			BridgeError::Auth(_) => FailureKind::Auth,
			BridgeError::Sheets(e) => match e {
				SheetsError::NotFound(_) | SheetsError::TabNotFound { .. } => FailureKind::NotFound,
				SheetsError::PermissionDenied { .. } => FailureKind::Auth,
				e if e.is_transport() => FailureKind::Transport,
				_ => FailureKind::Unknown,
			},
			BridgeError::Query(_) => FailureKind::Query,
			BridgeError::Unexpected(_) => FailureKind::Unknown,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use sheetlink_credentials::SecretStoreError;

	#[test]
	fn classification() {
		let cases = [
			(
				BridgeError::from(CredentialError::from(SecretStoreError::NotFound {
					name: "gsheets_credentials".to_string(),
				})),
				FailureKind::Credential,
			),
			(
				BridgeError::from(CredentialError::MissingField("private_key")),
				FailureKind::Credential,
			),
			(
				BridgeError::from(AuthError::InvalidKey("bad pem".to_string())),
				FailureKind::Auth,
			),
			(
				BridgeError::from(AuthError::rejected(400, "invalid_grant")),
				FailureKind::Auth,
			),
			(
				BridgeError::from(SheetsError::PermissionDenied {
					status: 401,
					message: "expired".to_string(),
				}),
				FailureKind::Auth,
			),
			(
				BridgeError::from(SheetsError::NotFound("S1".to_string())),
				FailureKind::NotFound,
			),
			(
				BridgeError::from(SheetsError::tab_not_found("S1", 7)),
				FailureKind::NotFound,
			),
			(BridgeError::from(SheetsError::Timeout), FailureKind::Transport),
			(
				BridgeError::from(SheetsError::api_error(500, "backend")),
				FailureKind::Unknown,
			),
			(
				BridgeError::from(SheetsError::InvalidResponse("not json".to_string())),
				FailureKind::Unknown,
			),
			(
				BridgeError::from(QueryError::Execution("no such table".to_string())),
				FailureKind::Query,
			),
			(
				BridgeError::Unexpected("boom".to_string()),
				FailureKind::Unknown,
			),
		];

		for (err, expected) in cases {
			assert_eq!(err.kind(), expected, "{err}");
		}
	}

	#[test]
	fn display_is_transparent() {
		let err = BridgeError::from(SheetsError::tab_not_found("S1", 7));
		assert_eq!(err.to_string(), "Tab 7 not found in spreadsheet S1");
	}
}
