// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#![allow(dead_code)]

use std::sync::{Arc, Mutex, OnceLock};

use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::RsaPrivateKey;
use serde_json::{json, Value};
use sheetlink_bridge::{BridgeConfig, SheetBridge, DEFAULT_SECRET_NAME};
use sheetlink_credentials::MemorySecretStore;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const SPREADSHEET_ID: &str = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms";

/// One 2048-bit key per test binary; generation is slow in debug builds.
pub fn private_key_pem() -> &'static str {
	static KEY: OnceLock<String> = OnceLock::new();
	KEY.get_or_init(|| {
		let mut rng = rand::thread_rng();
		RsaPrivateKey::new(&mut rng, 2048)
			.expect("generate RSA key")
			.to_pkcs8_pem(LineEnding::LF)
			.expect("encode private key")
			.to_string()
	})
}

pub fn identity_json(private_key: &str, server: &MockServer) -> String {
	json!({
		"type": "service_account",
		"project_id": "test-project",
		"private_key_id": "test-key-id",
		"private_key": private_key,
		"client_email": "svc@test-project.iam.gserviceaccount.com",
		"client_id": "1234567890",
		"token_uri": format!("{}/token", server.uri())
	})
	.to_string()
}

pub fn config_for(server: &MockServer) -> BridgeConfig {
	BridgeConfig::new().with_sheets_base_url(format!("{}/v4", server.uri()))
}

/// Bridge whose token endpoint and spreadsheet API are both `server`.
pub fn bridge_for(server: &MockServer) -> SheetBridge {
	bridge_with_key(server, private_key_pem())
}

pub fn bridge_with_key(server: &MockServer, private_key: &str) -> SheetBridge {
	let store = MemorySecretStore::new().with_secret(DEFAULT_SECRET_NAME, identity_json(private_key, server));
	SheetBridge::new(Arc::new(store), reqwest::Client::new(), config_for(server))
}

pub async fn mount_token(server: &MockServer) {
	Mock::given(method("POST"))
		.and(path("/token"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"access_token": "ya29.integration",
			"expires_in": 3599,
			"token_type": "Bearer"
		})))
		.mount(server)
		.await;
}

/// Mount spreadsheet metadata listing `tabs` as (sheet id, title) in order.
pub async fn mount_spreadsheet(server: &MockServer, tabs: &[(i64, &str)]) {
	let sheets: Vec<Value> = tabs
		.iter()
		.enumerate()
		.map(|(index, (sheet_id, title))| {
			json!({"properties": {"sheetId": sheet_id, "title": title, "index": index}})
		})
		.collect();

	Mock::given(method("GET"))
		.and(path(format!("/v4/spreadsheets/{SPREADSHEET_ID}")))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"spreadsheetId": SPREADSHEET_ID,
			"sheets": sheets
		})))
		.mount(server)
		.await;
}

pub async fn mount_values(server: &MockServer, title: &str, values: Value) {
	Mock::given(method("GET"))
		.and(path(format!("/v4/spreadsheets/{SPREADSHEET_ID}/values/'{title}'")))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"range": format!("{title}!A1:Z1000"),
			"majorDimension": "ROWS",
			"values": values
		})))
		.mount(server)
		.await;
}

/// Fail the test if anything reaches the values endpoints.
pub async fn forbid_values_calls(server: &MockServer) {
	Mock::given(path_regex(r"^/v4/spreadsheets/[^/]+/values/"))
		.respond_with(ResponseTemplate::new(500))
		.expect(0)
		.mount(server)
		.await;
}

/// Fail the test if anything reaches the spreadsheet API.
pub async fn forbid_sheet_calls(server: &MockServer) {
	Mock::given(path_regex(r"^/v4/"))
		.respond_with(ResponseTemplate::new(500))
		.expect(0)
		.mount(server)
		.await;
}

/// In-memory tab contents shared by the update and get responders.
///
/// Updates overlay the written rectangle onto the existing cells, leaving
/// everything outside it as it was.
#[derive(Clone, Default)]
pub struct FakeTab {
	cells: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl FakeTab {
	pub fn with_cells(cells: Value) -> Self {
		let cells = serde_json::from_value(cells).expect("grid literal");
		Self {
			cells: Arc::new(Mutex::new(cells)),
		}
	}

	pub fn cells(&self) -> Vec<Vec<Value>> {
		self.cells.lock().unwrap().clone()
	}

	pub async fn mount(&self, server: &MockServer, title: &str) {
		Mock::given(method("GET"))
			.and(path(format!("/v4/spreadsheets/{SPREADSHEET_ID}/values/'{title}'")))
			.respond_with(GetValues(self.clone()))
			.mount(server)
			.await;
		Mock::given(method("PUT"))
			.and(path(format!("/v4/spreadsheets/{SPREADSHEET_ID}/values/'{title}'!A1")))
			.respond_with(UpdateValues(self.clone()))
			.mount(server)
			.await;
	}
}

struct GetValues(FakeTab);

impl Respond for GetValues {
	fn respond(&self, _request: &Request) -> ResponseTemplate {
		ResponseTemplate::new(200).set_body_json(json!({
			"majorDimension": "ROWS",
			"values": self.0.cells()
		}))
	}
}

struct UpdateValues(FakeTab);

impl Respond for UpdateValues {
	fn respond(&self, request: &Request) -> ResponseTemplate {
		let body: Value = match serde_json::from_slice(&request.body) {
			Ok(body) => body,
			Err(_) => return ResponseTemplate::new(400),
		};
		let grid: Vec<Vec<Value>> = match serde_json::from_value(body["values"].clone()) {
			Ok(grid) => grid,
			Err(_) => return ResponseTemplate::new(400),
		};

		let mut cells = self.0.cells.lock().unwrap();
		let mut updated = 0;
		for (r, row) in grid.iter().enumerate() {
			if cells.len() <= r {
				cells.resize(r + 1, Vec::new());
			}
			for (c, value) in row.iter().enumerate() {
				if cells[r].len() <= c {
					cells[r].resize(c + 1, Value::String(String::new()));
				}
				cells[r][c] = value.clone();
				updated += 1;
			}
		}

		ResponseTemplate::new(200).set_body_json(json!({
			"spreadsheetId": SPREADSHEET_ID,
			"updatedRows": grid.len(),
			"updatedCells": updated
		}))
	}
}
