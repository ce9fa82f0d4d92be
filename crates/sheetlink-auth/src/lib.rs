// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Token broker for sheetlink.
//!
//! Turns a [`ServiceIdentity`](sheetlink_credentials::ServiceIdentity) into a
//! bearer [`AccessToken`] by signing an RS256 assertion with the identity's
//! key and exchanging it at the identity's token endpoint. One attempt per
//! call, no caching.

pub mod assertion;
pub mod broker;
pub mod error;
pub mod scopes;
pub mod token;

pub use broker::{TokenBroker, JWT_BEARER_GRANT};
pub use error::AuthError;
pub use scopes::{Operation, ScopePolicy};
pub use token::AccessToken;
