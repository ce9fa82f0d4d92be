// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Service identity descriptor and loader.

use serde::Deserialize;
use sheetlink_common_secret::SecretString;
use tracing::{debug, instrument};
use url::Url;

use crate::error::CredentialError;
use crate::store::SecretStore;

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// A parsed service-account descriptor.
///
/// Built once per invocation from the secret store blob and dropped when the
/// invocation ends.
#[derive(Debug, Clone)]
pub struct ServiceIdentity {
	client_email: String,
	private_key: SecretString,
	private_key_id: String,
	token_uri: Url,
	project_id: Option<String>,
}

/// Wire shape of the descriptor. Unknown keys (`auth_uri`, `client_id`, ...)
/// are ignored.
#[derive(Deserialize)]
struct RawDescriptor {
	#[serde(rename = "type")]
	kind: Option<String>,
	client_email: Option<String>,
	private_key: Option<SecretString>,
	private_key_id: Option<String>,
	token_uri: Option<String>,
	project_id: Option<String>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, CredentialError> {
	match value {
		Some(v) if !v.trim().is_empty() => Ok(v),
		_ => Err(CredentialError::MissingField(field)),
	}
}

impl ServiceIdentity {
	/// Parse a descriptor document. Performs no unescaping.
	pub fn from_json(blob: &str) -> Result<Self, CredentialError> {
		let raw: RawDescriptor = serde_json::from_str(blob)?;

		if let Some(kind) = raw.kind {
			if kind != SERVICE_ACCOUNT_TYPE {
				return Err(CredentialError::UnsupportedType(kind));
			}
		}

		let client_email = required(raw.client_email, "client_email")?;
		let private_key = match raw.private_key {
			Some(key) if !key.expose().trim().is_empty() => key,
			_ => return Err(CredentialError::MissingField("private_key")),
		};
		let private_key_id = required(raw.private_key_id, "private_key_id")?;
		let token_uri_raw = required(raw.token_uri, "token_uri")?;

		let token_uri = Url::parse(&token_uri_raw).map_err(|e| CredentialError::InvalidTokenUri {
			uri: token_uri_raw.clone(),
			reason: e.to_string(),
		})?;
		if token_uri.scheme() != "https" && token_uri.scheme() != "http" {
			return Err(CredentialError::InvalidTokenUri {
				uri: token_uri_raw,
				reason: format!("unsupported scheme '{}'", token_uri.scheme()),
			});
		}

		Ok(Self {
			client_email,
			private_key,
			private_key_id,
			token_uri,
			project_id: raw.project_id,
		})
	}

	pub fn client_email(&self) -> &str {
		&self.client_email
	}

	/// PEM-encoded signing key.
	pub fn private_key(&self) -> &SecretString {
		&self.private_key
	}

	pub fn private_key_id(&self) -> &str {
		&self.private_key_id
	}

	pub fn token_uri(&self) -> &Url {
		&self.token_uri
	}

	pub fn project_id(&self) -> Option<&str> {
		self.project_id.as_deref()
	}
}

/// Credential Loader: fetch `secret_name` from the store and parse it.
#[instrument(skip(store))]
pub async fn load_service_identity(
	store: &dyn SecretStore,
	secret_name: &str,
) -> Result<ServiceIdentity, CredentialError> {
	let blob = store.get_secret(secret_name).await?;
	let identity = ServiceIdentity::from_json(blob.expose())?;
	debug!(
		client_email = %identity.client_email(),
		key_id = %identity.private_key_id(),
		"Loaded service identity"
	);
	Ok(identity)
}
