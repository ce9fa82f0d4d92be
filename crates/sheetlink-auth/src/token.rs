// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bearer token minted by the identity provider.

use std::time::{Duration, Instant};

use sheetlink_common_secret::SecretString;

/// A short-lived bearer token.
///
/// The token value is held in a [`SecretString`]; neither `Debug` nor any
/// serialized form ever contains it.
#[derive(Debug, Clone)]
pub struct AccessToken {
	token: SecretString,
	expires_at: Instant,
}

impl AccessToken {
	pub fn new(token: SecretString, expires_in: Duration) -> Self {
		Self {
			token,
			expires_at: Instant::now() + expires_in,
		}
	}

	pub fn secret(&self) -> &SecretString {
		&self.token
	}

	pub fn expires_at(&self) -> Instant {
		self.expires_at
	}

	pub fn is_expired(&self) -> bool {
		Instant::now() >= self.expires_at
	}
}
