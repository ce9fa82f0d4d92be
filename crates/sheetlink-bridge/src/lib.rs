// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Read and write pipelines between a SQL engine and a spreadsheet tab.
//!
//! [`SheetBridge::read`] returns a tab's rows as header-keyed records;
//! [`SheetBridge::write`] runs a query and writes its result to the tab's
//! top-left corner. Both return an outcome value instead of an error, so the
//! caller always gets either data or a tagged failure.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use sheetlink_bridge::{BridgeConfig, SheetBridge};
//! use sheetlink_credentials::EnvSecretStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let bridge = SheetBridge::new(
//! 	Arc::new(EnvSecretStore::new()),
//! 	reqwest::Client::new(),
//! 	BridgeConfig::from_env()?,
//! );
//! let outcome = bridge.read("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms", 0).await;
//! println!("{}", serde_json::to_string(&outcome)?);
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod outcome;

pub use bridge::{SheetBridge, DEFAULT_SECRET_NAME};
pub use config::{BridgeConfig, ConfigError};
pub use engine::{MemoryQueryEngine, QueryEngine, QueryError, ResultSet};
pub use error::BridgeError;
pub use outcome::{Failure, FailureKind, ReadOutcome, WriteOutcome};
