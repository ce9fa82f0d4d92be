// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret store backends.
//!
//! The secret store is an external collaborator: sheetlink only ever asks it
//! for one opaque blob by logical name. Backends here cover the environment
//! (with the `*_FILE` convention used by Docker and Kubernetes secrets), a
//! directory of secret files, and an in-memory map for tests and embedding.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sheetlink_common_secret::SecretString;
use tokio::fs;
use tracing::debug;

use crate::error::SecretStoreError;

/// Default prefix for [`EnvSecretStore`] variable names.
pub const DEFAULT_ENV_PREFIX: &str = "SHEETLINK_SECRET_";

/// Read-only access to named secrets.
#[async_trait]
pub trait SecretStore: Send + Sync + std::fmt::Debug {
	/// Fetch the blob stored under `name`.
	async fn get_secret(&self, name: &str) -> Result<SecretString, SecretStoreError>;
}

/// Resolves secrets from environment variables.
///
/// A logical name such as `gsheets_credentials` maps to
/// `SHEETLINK_SECRET_GSHEETS_CREDENTIALS`. If `<VAR>_FILE` is set the secret
/// is read from that path instead, with one trailing newline stripped.
#[derive(Debug, Clone)]
pub struct EnvSecretStore {
	prefix: String,
}

impl Default for EnvSecretStore {
	fn default() -> Self {
		Self::new()
	}
}

impl EnvSecretStore {
	pub fn new() -> Self {
		Self::with_prefix(DEFAULT_ENV_PREFIX)
	}

	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	/// Environment variable consulted for `name`.
	pub fn var_name(&self, name: &str) -> String {
		let normalized: String = name
			.chars()
			.map(|c| {
				if c.is_ascii_alphanumeric() {
					c.to_ascii_uppercase()
				} else {
					'_'
				}
			})
			.collect();
		format!("{}{}", self.prefix, normalized)
	}
}

#[async_trait]
impl SecretStore for EnvSecretStore {
	async fn get_secret(&self, name: &str) -> Result<SecretString, SecretStoreError> {
		if name.is_empty() {
			return Err(SecretStoreError::InvalidName {
				name: name.to_string(),
				reason: "name is empty".to_string(),
			});
		}

		let var = self.var_name(name);
		let file_var = format!("{var}_FILE");

		if let Ok(path_str) = std::env::var(&file_var) {
			if path_str.is_empty() {
				return Err(SecretStoreError::EmptyPath { var: file_var });
			}
			debug!(secret = %name, var = %file_var, "Reading secret from file");
			return read_secret_file(Path::new(&path_str)).await;
		}

		match std::env::var(&var) {
			Ok(value) => {
				debug!(secret = %name, var = %var, "Read secret from environment");
				Ok(SecretString::new(value))
			}
			Err(_) => Err(SecretStoreError::NotFound {
				name: name.to_string(),
			}),
		}
	}
}

/// Resolves secrets from files in a directory, one file per name.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
	dir: PathBuf,
}

impl FileSecretStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}
}

#[async_trait]
impl SecretStore for FileSecretStore {
	async fn get_secret(&self, name: &str) -> Result<SecretString, SecretStoreError> {
		let invalid = name.is_empty()
			|| name == "."
			|| name == ".."
			|| name.contains('/')
			|| name.contains('\\');
		if invalid {
			return Err(SecretStoreError::InvalidName {
				name: name.to_string(),
				reason: "must be a plain file name".to_string(),
			});
		}

		let path = self.dir.join(name);
		if !path.exists() {
			return Err(SecretStoreError::NotFound {
				name: name.to_string(),
			});
		}
		read_secret_file(&path).await
	}
}

async fn read_secret_file(path: &Path) -> Result<SecretString, SecretStoreError> {
	let content = fs::read_to_string(path)
		.await
		.map_err(|source| SecretStoreError::Io {
			path: path.to_path_buf(),
			source,
		})?;
	let trimmed = content.strip_suffix('\n').unwrap_or(&content).to_string();
	Ok(SecretString::new(trimmed))
}

/// Fixed set of secrets held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySecretStore {
	secrets: HashMap<String, SecretString>,
}

impl MemorySecretStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(name, value);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self
			.secrets
			.insert(name.into(), SecretString::new(value.into()));
	}
}

#[async_trait]
impl SecretStore for MemorySecretStore {
	async fn get_secret(&self, name: &str) -> Result<SecretString, SecretStoreError> {
		self
			.secrets
			.get(name)
			.cloned()
			.ok_or_else(|| SecretStoreError::NotFound {
				name: name.to_string(),
			})
	}
}
