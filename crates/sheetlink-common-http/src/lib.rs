// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for sheetlink.
//!
//! Every outbound call (token endpoint and spreadsheet API) goes through a
//! client built here so both carry the same User-Agent. Callers that embed
//! sheetlink can still inject any `reqwest::Client` of their own.

mod client;

pub use client::{builder, new_client, new_client_with_timeout, user_agent};
