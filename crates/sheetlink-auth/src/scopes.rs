// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Authorization scopes requested for each operation.

use std::fmt;
use std::str::FromStr;

pub const SPREADSHEETS: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const SPREADSHEETS_READONLY: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
pub const DRIVE: &str = "https://www.googleapis.com/auth/drive";

const BROAD: &[&str] = &[SPREADSHEETS, DRIVE];
const MINIMAL_READ: &[&str] = &[SPREADSHEETS_READONLY];
const MINIMAL_WRITE: &[&str] = &[SPREADSHEETS];

/// The two caller-facing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	Read,
	Write,
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Operation::Read => f.write_str("read"),
			Operation::Write => f.write_str("write"),
		}
	}
}

/// How scopes are chosen per operation.
///
/// `Broad` requests spreadsheets and drive access for both reads and writes.
/// `Minimal` narrows reads to read-only spreadsheet access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScopePolicy {
	#[default]
	Broad,
	Minimal,
}

impl ScopePolicy {
	pub fn scopes(&self, operation: Operation) -> &'static [&'static str] {
		match (self, operation) {
			(ScopePolicy::Broad, _) => BROAD,
			(ScopePolicy::Minimal, Operation::Read) => MINIMAL_READ,
			(ScopePolicy::Minimal, Operation::Write) => MINIMAL_WRITE,
		}
	}

	/// Space-separated scope claim.
	pub fn scope_claim(&self, operation: Operation) -> String {
		self.scopes(operation).join(" ")
	}
}

impl FromStr for ScopePolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"broad" => Ok(ScopePolicy::Broad),
			"minimal" => Ok(ScopePolicy::Minimal),
			other => Err(format!(
				"unknown scope policy '{other}', expected 'broad' or 'minimal'"
			)),
		}
	}
}
