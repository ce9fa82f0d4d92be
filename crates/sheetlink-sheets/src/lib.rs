// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Spreadsheet API access for sheetlink.
//!
//! - [`SheetsClient`]: authenticated HTTP client for the values and metadata
//!   endpoints
//! - [`locate_tab`]: resolves a tab by its immutable id
//! - [`read_records`]: tab contents as header-keyed [`RecordRow`]s
//! - [`write_grid`]: a [`ResultGrid`] written at the tab origin

pub mod client;
pub mod error;
pub mod locator;
pub mod read;
pub mod types;
pub mod values;
pub mod write;

pub use client::{SheetsClient, DEFAULT_BASE_URL};
pub use error::SheetsError;
pub use locator::{find_tab, locate_tab, TabHandle};
pub use read::{read_records, records_from_grid, RecordRow};
pub use types::{cell_range, tab_range, Spreadsheet, TabProperties, UpdateSummary, ValueInputOption, ValueRange};
pub use values::{CellValue, Scalar};
pub use write::{write_grid, ResultGrid};
