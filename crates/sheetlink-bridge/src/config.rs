// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration for the read and write pipelines.

use std::env;
use std::time::Duration;

use sheetlink_auth::assertion::{clamp_lifetime, MAX_ASSERTION_LIFETIME};
use sheetlink_auth::ScopePolicy;
use sheetlink_sheets::{ValueInputOption, DEFAULT_BASE_URL};
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const ENV_SHEETS_BASE_URL: &str = "SHEETLINK_SHEETS_BASE_URL";
pub const ENV_SCOPE_POLICY: &str = "SHEETLINK_SCOPE_POLICY";
pub const ENV_VALUE_INPUT: &str = "SHEETLINK_VALUE_INPUT";
pub const ENV_ASSERTION_LIFETIME_SECS: &str = "SHEETLINK_ASSERTION_LIFETIME_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "SHEETLINK_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Invalid spreadsheet API base URL '{url}': {reason}")]
	InvalidBaseUrl { url: String, reason: String },

	#[error("Invalid value for {var}: {reason}")]
	InvalidValue { var: &'static str, reason: String },
}

/// Settings shared by both pipelines.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
	/// Spreadsheet API root (validated, parsed)
	sheets_base_url: Url,

	/// Scopes requested per operation
	scope_policy: ScopePolicy,

	/// How written values are interpreted
	value_input: ValueInputOption,

	/// Lifetime of the signed assertion
	assertion_lifetime: Duration,

	/// HTTP timeout for clients built from this config
	request_timeout: Option<Duration>,
}

impl Default for BridgeConfig {
	fn default() -> Self {
		Self::new()
	}
}

impl BridgeConfig {
	/// Validate a base URL.
	///
	/// Requirements:
	/// - Must be a valid URL with a host
	/// - Must use HTTPS, except plain HTTP to a loopback host
	fn validate_base_url(raw: &str) -> Result<Url, ConfigError> {
		let invalid = |reason: String| ConfigError::InvalidBaseUrl {
			url: raw.to_string(),
			reason,
		};

		let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
		let host = url
			.host_str()
			.ok_or_else(|| invalid("must include a host".to_string()))?;
		let loopback = matches!(host, "localhost" | "127.0.0.1" | "::1" | "[::1]");

		match url.scheme() {
			"https" => Ok(url),
			"http" if loopback => Ok(url),
			"http" => Err(invalid("plain http is only allowed for loopback hosts".to_string())),
			other => Err(invalid(format!("must use https, got '{other}'"))),
		}
	}

	/// Defaults: public API, broad scopes, raw writes, one-hour assertions,
	/// no request timeout.
	pub fn new() -> Self {
		Self {
			sheets_base_url: Url::parse(DEFAULT_BASE_URL).expect("default URL is valid"),
			scope_policy: ScopePolicy::default(),
			value_input: ValueInputOption::default(),
			assertion_lifetime: MAX_ASSERTION_LIFETIME,
			request_timeout: None,
		}
	}

	/// Create configuration from environment variables.
	///
	/// Optional environment variables:
	/// - `SHEETLINK_SHEETS_BASE_URL`: API root (must be HTTPS)
	/// - `SHEETLINK_SCOPE_POLICY`: `broad` (default) or `minimal`
	/// - `SHEETLINK_VALUE_INPUT`: `raw` (default) or `user_entered`
	/// - `SHEETLINK_ASSERTION_LIFETIME_SECS`: clamped to 60..=3600
	/// - `SHEETLINK_REQUEST_TIMEOUT_SECS`: HTTP timeout, unset by default
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|var| env::var(var).ok())
	}

	/// Like [`BridgeConfig::from_env`] but reading variables through `lookup`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
		let mut config = Self::new();

		if let Some(raw) = get(ENV_SHEETS_BASE_URL) {
			config.sheets_base_url = Self::validate_base_url(raw.trim())?;
		}

		if let Some(raw) = get(ENV_SCOPE_POLICY) {
			config.scope_policy = raw.parse().map_err(|reason| ConfigError::InvalidValue {
				var: ENV_SCOPE_POLICY,
				reason,
			})?;
		}

		if let Some(raw) = get(ENV_VALUE_INPUT) {
			config.value_input = raw.parse().map_err(|reason| ConfigError::InvalidValue {
				var: ENV_VALUE_INPUT,
				reason,
			})?;
		}

		if let Some(raw) = get(ENV_ASSERTION_LIFETIME_SECS) {
			let secs = parse_secs(ENV_ASSERTION_LIFETIME_SECS, &raw)?;
			config.assertion_lifetime = clamp_lifetime(Duration::from_secs(secs));
		}

		if let Some(raw) = get(ENV_REQUEST_TIMEOUT_SECS) {
			let secs = parse_secs(ENV_REQUEST_TIMEOUT_SECS, &raw)?;
			if secs == 0 {
				return Err(ConfigError::InvalidValue {
					var: ENV_REQUEST_TIMEOUT_SECS,
					reason: "must be greater than zero".to_string(),
				});
			}
			config.request_timeout = Some(Duration::from_secs(secs));
		}

		Ok(config)
	}

	/// Set a custom API root (for testing).
	///
	/// If validation fails, logs a warning and keeps the previous value.
	pub fn with_sheets_base_url(mut self, url: impl Into<String>) -> Self {
		let url_str = url.into();
		match Self::validate_base_url(&url_str) {
			Ok(validated) => self.sheets_base_url = validated,
			Err(e) => {
				warn!(error = %e, url = %url_str, "Invalid sheets base URL, keeping previous value");
			}
		}
		self
	}

	pub fn with_scope_policy(mut self, policy: ScopePolicy) -> Self {
		self.scope_policy = policy;
		self
	}

	pub fn with_value_input(mut self, input: ValueInputOption) -> Self {
		self.value_input = input;
		self
	}

	/// Lifetime is clamped to what the identity provider accepts.
	pub fn with_assertion_lifetime(mut self, lifetime: Duration) -> Self {
		self.assertion_lifetime = clamp_lifetime(lifetime);
		self
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);
		self
	}

	pub fn sheets_base_url(&self) -> &Url {
		&self.sheets_base_url
	}

	pub fn scope_policy(&self) -> ScopePolicy {
		self.scope_policy
	}

	pub fn value_input(&self) -> ValueInputOption {
		self.value_input
	}

	pub fn assertion_lifetime(&self) -> Duration {
		self.assertion_lifetime
	}

	pub fn request_timeout(&self) -> Option<Duration> {
		self.request_timeout
	}
}

fn parse_secs(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
	raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
		var,
		reason: format!("'{raw}' is not a whole number of seconds"),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		move |var| vars.get(var).cloned()
	}

	#[test]
	fn defaults() {
		let config = BridgeConfig::from_lookup(lookup(&[])).unwrap();
		assert_eq!(config.sheets_base_url().as_str(), DEFAULT_BASE_URL);
		assert_eq!(config.scope_policy(), ScopePolicy::Broad);
		assert_eq!(config.value_input(), ValueInputOption::Raw);
		assert_eq!(config.assertion_lifetime(), Duration::from_secs(3600));
		assert!(config.request_timeout().is_none());
	}

	#[test]
	fn reads_all_variables() {
		let config = BridgeConfig::from_lookup(lookup(&[
			(ENV_SHEETS_BASE_URL, "https://sheets.example.com/v4"),
			(ENV_SCOPE_POLICY, "minimal"),
			(ENV_VALUE_INPUT, "user_entered"),
			(ENV_ASSERTION_LIFETIME_SECS, "10"),
			(ENV_REQUEST_TIMEOUT_SECS, "30"),
		]))
		.unwrap();
		assert_eq!(config.sheets_base_url().host_str(), Some("sheets.example.com"));
		assert_eq!(config.scope_policy(), ScopePolicy::Minimal);
		assert_eq!(config.value_input(), ValueInputOption::UserEntered);
		assert_eq!(config.assertion_lifetime(), Duration::from_secs(60));
		assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
	}

	#[test]
	fn rejects_bad_values() {
		for (var, value) in [
			(ENV_SHEETS_BASE_URL, "http://sheets.example.com"),
			(ENV_SHEETS_BASE_URL, "ftp://localhost"),
			(ENV_SHEETS_BASE_URL, "not a url"),
			(ENV_SCOPE_POLICY, "everything"),
			(ENV_VALUE_INPUT, "formatted"),
			(ENV_ASSERTION_LIFETIME_SECS, "-1"),
			(ENV_REQUEST_TIMEOUT_SECS, "0"),
		] {
			assert!(
				BridgeConfig::from_lookup(lookup(&[(var, value)])).is_err(),
				"{var}={value} should be rejected"
			);
		}
	}

	#[test]
	fn loopback_http_is_allowed() {
		for url in ["http://127.0.0.1:8080/v4", "http://localhost/v4", "http://[::1]:9000"] {
			let config = BridgeConfig::new().with_sheets_base_url(url);
			assert_eq!(config.sheets_base_url().scheme(), "http", "{url}");
		}
	}

	#[test]
	fn invalid_builder_url_keeps_previous() {
		let config = BridgeConfig::new().with_sheets_base_url("http://sheets.example.com");
		assert_eq!(config.sheets_base_url().as_str(), DEFAULT_BASE_URL);
	}

	#[test]
	fn builder_clamps_lifetime() {
		let config = BridgeConfig::new().with_assertion_lifetime(Duration::from_secs(86_400));
		assert_eq!(config.assertion_lifetime(), Duration::from_secs(3600));
	}
}
