// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential error types.

use std::path::PathBuf;

/// Errors raised by a [`SecretStore`](crate::SecretStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum SecretStoreError {
	#[error("secret '{name}' not found")]
	NotFound { name: String },

	#[error("secret name '{name}' is not valid: {reason}")]
	InvalidName { name: String, reason: String },

	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Errors raised while turning a secret reference into a service identity.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
	#[error(transparent)]
	Store(#[from] SecretStoreError),

	#[error("credential blob is not valid JSON: {0}")]
	Parse(String),

	#[error("credential blob is missing required field '{0}'")]
	MissingField(&'static str),

	#[error("unsupported credential type '{0}', expected 'service_account'")]
	UnsupportedType(String),

	#[error("invalid token endpoint '{uri}': {reason}")]
	InvalidTokenUri { uri: String, reason: String },
}

impl From<serde_json::Error> for CredentialError {
	fn from(err: serde_json::Error) -> Self {
		CredentialError::Parse(err.to_string())
	}
}

/// Errors raised by the credential compaction helper.
#[derive(Debug, thiserror::Error)]
pub enum EscapeError {
	#[error("file '{path}' not found")]
	NotFound { path: PathBuf },

	#[error("failed to read '{path}': {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid JSON in '{origin}': {source}")]
	InvalidJson {
		origin: String,
		#[source]
		source: serde_json::Error,
	},
}
