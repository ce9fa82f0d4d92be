// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client with a consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Builds a client with the sheetlink User-Agent and no request timeout.
///
/// Timeouts are inherited from the transport unless the caller opts in with
/// [`new_client_with_timeout`].
pub fn new_client() -> Result<Client, reqwest::Error> {
	builder().build()
}

/// Client builder pre-populated with the sheetlink User-Agent.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

pub fn new_client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
	builder().timeout(timeout).build()
}

/// `sheetlink/{version}`
pub fn user_agent() -> String {
	format!("sheetlink/{}", env!("CARGO_PKG_VERSION"))
}
