// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Signed assertion generation for the service-account grant.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sheetlink_credentials::ServiceIdentity;
use tracing::{debug, instrument};

use crate::error::AuthError;

/// Longest lifetime the identity provider accepts for an assertion.
pub const MAX_ASSERTION_LIFETIME: Duration = Duration::from_secs(3600);
pub const MIN_ASSERTION_LIFETIME: Duration = Duration::from_secs(60);

/// Assertion claims.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
	/// Service identity email.
	pub iss: String,
	/// Space-separated scopes.
	pub scope: String,
	/// Token endpoint the assertion is addressed to.
	pub aud: String,
	pub iat: u64,
	pub exp: u64,
}

pub fn clamp_lifetime(lifetime: Duration) -> Duration {
	lifetime.clamp(MIN_ASSERTION_LIFETIME, MAX_ASSERTION_LIFETIME)
}

/// Sign an RS256 assertion for `identity` requesting `scope`.
///
/// The header carries the identity's key id; `aud` is the identity's own
/// token endpoint.
#[instrument(skip(identity), fields(iss = %identity.client_email()))]
pub fn sign_assertion(
	identity: &ServiceIdentity,
	scope: &str,
	lifetime: Duration,
) -> Result<String, AuthError> {
	let now = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map_err(|e| AuthError::Signing(format!("System time error: {e}")))?;

	let iat = now.as_secs();
	let exp = iat + clamp_lifetime(lifetime).as_secs();

	let claims = Claims {
		iss: identity.client_email().to_string(),
		scope: scope.to_string(),
		aud: identity.token_uri().to_string(),
		iat,
		exp,
	};

	let encoding_key = EncodingKey::from_rsa_pem(identity.private_key().expose().as_bytes())
		.map_err(|e| AuthError::InvalidKey(e.to_string()))?;

	let mut header = Header::new(Algorithm::RS256);
	header.kid = Some(identity.private_key_id().to_string());

	let token = encode(&header, &claims, &encoding_key).map_err(|e| AuthError::Signing(e.to_string()))?;

	debug!(exp = exp, "Signed token assertion");

	Ok(token)
}
