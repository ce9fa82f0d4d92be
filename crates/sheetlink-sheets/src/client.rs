// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Spreadsheet API client implementation.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sheetlink_auth::AccessToken;
use tracing::{debug, error, instrument, trace};
use url::Url;

use crate::error::SheetsError;
use crate::types::{ApiErrorEnvelope, Spreadsheet, UpdateSummary, ValueInputOption, ValueRange};

pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4";

const SPREADSHEET_FIELDS: &str = "spreadsheetId,sheets.properties(sheetId,title,index)";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody<'a> {
	range: &'a str,
	major_dimension: &'static str,
	values: &'a [Vec<Value>],
}

/// Authenticated client for the spreadsheet API.
///
/// Holds one bearer token for the lifetime of a single invocation.
#[derive(Debug, Clone)]
pub struct SheetsClient {
	http_client: Client,
	base_url: Url,
	token: AccessToken,
}

impl SheetsClient {
	/// Creates a client against the public spreadsheet API.
	pub fn new(http_client: Client, token: AccessToken) -> Result<Self, SheetsError> {
		let base_url = Url::parse(DEFAULT_BASE_URL)
			.map_err(|e| SheetsError::InvalidRequest(format!("Invalid base URL: {e}")))?;
		Ok(Self {
			http_client,
			base_url,
			token,
		})
	}

	/// Sets a custom base URL for the API (useful for testing).
	pub fn with_base_url(mut self, base_url: Url) -> Self {
		self.base_url = base_url;
		self
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	fn endpoint(&self, segments: &[&str]) -> Result<Url, SheetsError> {
		let mut url = self.base_url.clone();
		url
			.path_segments_mut()
			.map_err(|_| SheetsError::InvalidRequest(format!("Base URL cannot be a base: {}", self.base_url)))?
			.pop_if_empty()
			.extend(segments);
		Ok(url)
	}

	/// Fetch spreadsheet metadata including the tab list.
	#[instrument(skip(self))]
	pub async fn get_spreadsheet(&self, spreadsheet_id: &str) -> Result<Spreadsheet, SheetsError> {
		let url = self.endpoint(&["spreadsheets", spreadsheet_id])?;
		let request = self
			.http_client
			.get(url)
			.query(&[("fields", SPREADSHEET_FIELDS)]);

		self.send_json(request).await
	}

	/// Fetch every populated cell of `range`, row-major, with typed values.
	#[instrument(skip(self))]
	pub async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange, SheetsError> {
		let url = self.endpoint(&["spreadsheets", spreadsheet_id, "values", range])?;
		let request = self.http_client.get(url).query(&[
			("majorDimension", "ROWS"),
			("valueRenderOption", "UNFORMATTED_VALUE"),
			("dateTimeRenderOption", "FORMATTED_STRING"),
		]);

		self.send_json(request).await
	}

	/// Overwrite cells starting at `range` with `values`.
	#[instrument(skip(self, values), fields(rows = values.len()))]
	pub async fn update_values(
		&self,
		spreadsheet_id: &str,
		range: &str,
		values: &[Vec<Value>],
		input: ValueInputOption,
	) -> Result<UpdateSummary, SheetsError> {
		let url = self.endpoint(&["spreadsheets", spreadsheet_id, "values", range])?;
		let body = UpdateBody {
			range,
			major_dimension: "ROWS",
			values,
		};
		let request = self
			.http_client
			.put(url)
			.query(&[("valueInputOption", input.as_str())])
			.json(&body);

		self.send_json(request).await
	}

	async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SheetsError> {
		let response = request
			.bearer_auth(self.token.secret().expose())
			.send()
			.await
			.map_err(|e| {
				if e.is_timeout() {
					error!("Request timed out");
					return SheetsError::Timeout;
				}
				error!(error = %e, "Network error during spreadsheet API request");
				SheetsError::Network(e)
			})?;

		let status = response.status();
		debug!(status = %status, "Received response from spreadsheet API");

		let body = response.text().await.map_err(|e| {
			error!(error = %e, "Failed to read response body");
			SheetsError::Network(e)
		})?;

		if !status.is_success() {
			let status_code = status.as_u16();
			let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
				.map(|envelope| match envelope.error.status {
					Some(kind) if !kind.is_empty() => format!("{kind}: {}", envelope.error.message),
					_ => envelope.error.message,
				})
				.unwrap_or(body);

			error!(status = status_code, message = %message, "Spreadsheet API error");
			return Err(match status_code {
				401 | 403 => SheetsError::PermissionDenied {
					status: status_code,
					message,
				},
				404 => SheetsError::NotFound(message),
				_ => SheetsError::api_error(status_code, message),
			});
		}

		trace!(bytes = body.len(), "Response body received");

		serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "Failed to parse spreadsheet API response");
			SheetsError::InvalidResponse(format!("JSON parse error: {e}"))
		})
	}
}
