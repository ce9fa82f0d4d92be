// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Caller-facing results of the read and write pipelines.
//!
//! Both pipelines return a value rather than an error. Failures carry a
//! message, a fixed classification tag and the spreadsheet id they concern;
//! they serialize as `[{"error", "error_type", "url"}]` for reads and
//! `{"error", "error_type", "spreadsheet_id"}` for writes.

use std::fmt;

use serde::{Serialize, Serializer};
use sheetlink_sheets::RecordRow;

use crate::error::BridgeError;

/// Classification tag of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
	Credential,
	Auth,
	NotFound,
	Transport,
	Query,
	Unknown,
}

impl FailureKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			FailureKind::Credential => "CredentialError",
			FailureKind::Auth => "AuthError",
			FailureKind::NotFound => "NotFoundError",
			FailureKind::Transport => "TransportError",
			FailureKind::Query => "QueryError",
			FailureKind::Unknown => "Unknown",
		}
	}
}

impl Serialize for FailureKind {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl fmt::Display for FailureKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A captured pipeline failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
	pub error: String,
	pub error_type: FailureKind,
	/// The spreadsheet id the invocation targeted.
	pub context: String,
}

impl Failure {
	pub fn from_error(err: &BridgeError, context: impl Into<String>) -> Self {
		Self {
			error: err.to_string(),
			error_type: err.kind(),
			context: context.into(),
		}
	}
}

#[derive(Serialize)]
struct ReadFailureBody<'a> {
	error: &'a str,
	error_type: FailureKind,
	url: &'a str,
}

#[derive(Serialize)]
struct WriteFailureBody<'a> {
	error: &'a str,
	error_type: FailureKind,
	spreadsheet_id: &'a str,
}

#[derive(Serialize)]
struct WriteSuccessBody {
	status: &'static str,
}

/// Result of a read: the tab's records, or one failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
	Records(Vec<RecordRow>),
	Failed(Failure),
}

impl ReadOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self, ReadOutcome::Records(_))
	}

	pub fn records(&self) -> Option<&[RecordRow]> {
		match self {
			ReadOutcome::Records(records) => Some(records),
			ReadOutcome::Failed(_) => None,
		}
	}

	pub fn failure(&self) -> Option<&Failure> {
		match self {
			ReadOutcome::Records(_) => None,
			ReadOutcome::Failed(failure) => Some(failure),
		}
	}
}

impl Serialize for ReadOutcome {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			ReadOutcome::Records(records) => records.serialize(serializer),
			ReadOutcome::Failed(failure) => serializer.collect_seq(std::iter::once(ReadFailureBody {
				error: &failure.error,
				error_type: failure.error_type,
				url: &failure.context,
			})),
		}
	}
}

/// Result of a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
	Success,
	Failed(Failure),
}

impl WriteOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self, WriteOutcome::Success)
	}

	pub fn failure(&self) -> Option<&Failure> {
		match self {
			WriteOutcome::Success => None,
			WriteOutcome::Failed(failure) => Some(failure),
		}
	}
}

impl Serialize for WriteOutcome {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			WriteOutcome::Success => WriteSuccessBody { status: "success" }.serialize(serializer),
			WriteOutcome::Failed(failure) => WriteFailureBody {
				error: &failure.error,
				error_type: failure.error_type,
				spreadsheet_id: &failure.context,
			}
			.serialize(serializer),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;
	use sheetlink_sheets::{records_from_grid, SheetsError};

	const KINDS: [FailureKind; 6] = [
		FailureKind::Credential,
		FailureKind::Auth,
		FailureKind::NotFound,
		FailureKind::Transport,
		FailureKind::Query,
		FailureKind::Unknown,
	];

	fn failure(kind: FailureKind) -> Failure {
		Failure {
			error: "boom".to_string(),
			error_type: kind,
			context: "S1".to_string(),
		}
	}

	#[test]
	fn kind_tags() {
		let tags: Vec<String> = KINDS
			.iter()
			.map(|k| serde_json::to_value(k).unwrap().as_str().unwrap().to_string())
			.collect();
		assert_eq!(
			tags,
			[
				"CredentialError",
				"AuthError",
				"NotFoundError",
				"TransportError",
				"QueryError",
				"Unknown"
			]
		);
		assert_eq!(FailureKind::NotFound.to_string(), "NotFoundError");
	}

	#[test]
	fn read_records_serialize_as_array() {
		let grid = serde_json::from_value(json!([["id", "name"], [1, "a"]])).unwrap();
		let outcome = ReadOutcome::Records(records_from_grid(grid));
		assert_eq!(
			serde_json::to_value(&outcome).unwrap(),
			json!([{"id": 1, "name": "a"}])
		);
		assert!(outcome.is_success());
	}

	#[test]
	fn read_failure_is_one_element_array() {
		let outcome = ReadOutcome::Failed(failure(FailureKind::NotFound));
		assert_eq!(
			serde_json::to_value(&outcome).unwrap(),
			json!([{"error": "boom", "error_type": "NotFoundError", "url": "S1"}])
		);
		assert!(outcome.records().is_none());
	}

	#[test]
	fn write_shapes() {
		assert_eq!(
			serde_json::to_value(WriteOutcome::Success).unwrap(),
			json!({"status": "success"})
		);
		assert_eq!(
			serde_json::to_value(WriteOutcome::Failed(failure(FailureKind::Query))).unwrap(),
			json!({"error": "boom", "error_type": "QueryError", "spreadsheet_id": "S1"})
		);
	}

	#[test]
	fn failure_from_error() {
		let err = BridgeError::from(SheetsError::tab_not_found("S1", 3));
		let failure = Failure::from_error(&err, "S1");
		assert_eq!(failure.error_type, FailureKind::NotFound);
		assert_eq!(failure.error, "Tab 3 not found in spreadsheet S1");
		assert_eq!(failure.context, "S1");
	}

	proptest! {
		#[test]
		fn failure_body_carries_target_id(
			kind in proptest::sample::select(KINDS.to_vec()),
			id in "[A-Za-z0-9_-]{0,44}",
			error in ".{0,40}",
		) {
			let failure = Failure { error: error.clone(), error_type: kind, context: id.clone() };

			let read = serde_json::to_value(ReadOutcome::Failed(failure.clone())).unwrap();
			prop_assert_eq!(&read[0]["url"], &json!(id));
			prop_assert_eq!(&read[0]["error_type"], &json!(kind.as_str()));
			prop_assert_eq!(&read[0]["error"], &json!(error));

			let write = serde_json::to_value(WriteOutcome::Failed(failure)).unwrap();
			prop_assert_eq!(&write["spreadsheet_id"], &json!(id));
			prop_assert_eq!(&write["error_type"], &json!(kind.as_str()));
		}
	}
}
