// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the token broker.

use thiserror::Error;

/// Errors that can occur while obtaining an access token.
#[derive(Debug, Error)]
pub enum AuthError {
	/// The signing key could not be parsed.
	#[error("Invalid signing key: {0}")]
	InvalidKey(String),

	/// The assertion could not be built or signed.
	#[error("Failed to sign assertion: {0}")]
	Signing(String),

	/// The token endpoint could not be reached.
	#[error("Token endpoint unreachable: {0}")]
	Transport(#[source] reqwest::Error),

	/// The identity provider refused the assertion.
	#[error("Token request rejected ({status}): {message}")]
	Rejected { status: u16, message: String },

	/// The identity provider answered with something that is not a token.
	#[error("Invalid token response: {0}")]
	InvalidResponse(String),
}

impl AuthError {
	pub fn rejected(status: u16, message: impl Into<String>) -> Self {
		Self::Rejected {
			status,
			message: message.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejected_display_includes_status() {
		let err = AuthError::rejected(400, "invalid_grant: Invalid JWT Signature.");
		assert_eq!(
			err.to_string(),
			"Token request rejected (400): invalid_grant: Invalid JWT Signature."
		);
	}
}
