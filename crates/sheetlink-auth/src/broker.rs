// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Token broker: exchanges a signed assertion for an access token.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use sheetlink_common_secret::SecretString;
use sheetlink_credentials::ServiceIdentity;
use tracing::{debug, error, info, instrument};

use crate::assertion::{sign_assertion, MAX_ASSERTION_LIFETIME};
use crate::error::AuthError;
use crate::scopes::{Operation, ScopePolicy};
use crate::token::AccessToken;

/// Grant type for the signed-assertion exchange.
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Deserialize)]
struct TokenResponse {
	access_token: Option<SecretString>,
	#[serde(default)]
	expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
	error: String,
	#[serde(default)]
	error_description: Option<String>,
}

/// Exchanges service identities for bearer tokens.
///
/// Every call performs exactly one network round trip; nothing is cached
/// between calls.
#[derive(Debug, Clone)]
pub struct TokenBroker {
	http_client: Client,
	scope_policy: ScopePolicy,
	assertion_lifetime: Duration,
}

impl TokenBroker {
	pub fn new(http_client: Client) -> Self {
		Self {
			http_client,
			scope_policy: ScopePolicy::default(),
			assertion_lifetime: MAX_ASSERTION_LIFETIME,
		}
	}

	pub fn with_scope_policy(mut self, policy: ScopePolicy) -> Self {
		self.scope_policy = policy;
		self
	}

	pub fn with_assertion_lifetime(mut self, lifetime: Duration) -> Self {
		self.assertion_lifetime = lifetime;
		self
	}

	pub fn scope_policy(&self) -> ScopePolicy {
		self.scope_policy
	}

	/// Obtain a token for `operation` on behalf of `identity`.
	#[instrument(skip(self, identity), fields(iss = %identity.client_email()))]
	pub async fn fetch_token(
		&self,
		identity: &ServiceIdentity,
		operation: Operation,
	) -> Result<AccessToken, AuthError> {
		let scope = self.scope_policy.scope_claim(operation);
		let assertion = SecretString::new(sign_assertion(identity, &scope, self.assertion_lifetime)?);

		debug!(token_uri = %identity.token_uri(), "Requesting access token");

		let response = self
			.http_client
			.post(identity.token_uri().clone())
			.form(&[
				("grant_type", JWT_BEARER_GRANT),
				("assertion", assertion.expose().as_str()),
			])
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "Token endpoint request failed");
				AuthError::Transport(e)
			})?;

		let status = response.status();
		let body = response.text().await.map_err(AuthError::Transport)?;

		if !status.is_success() {
			let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
				Ok(err) => match err.error_description {
					Some(description) => format!("{}: {}", err.error, description),
					None => err.error,
				},
				Err(_) => body,
			};
			error!(status = status.as_u16(), message = %message, "Token request rejected");
			return Err(AuthError::rejected(status.as_u16(), message));
		}

		let parsed: TokenResponse = serde_json::from_str(&body)
			.map_err(|e| AuthError::InvalidResponse(format!("JSON parse error: {e}")))?;

		let token = parsed
			.access_token
			.filter(|t| !t.is_empty())
			.ok_or_else(|| AuthError::InvalidResponse("missing access_token".to_string()))?;
		let expires_in = Duration::from_secs(parsed.expires_in.unwrap_or(3600));

		info!(expires_in_secs = expires_in.as_secs(), "Obtained access token");

		Ok(AccessToken::new(token, expires_in))
	}
}
