// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret store access and service identity loading for sheetlink.
//!
//! - [`SecretStore`]: the secret store collaborator (`get_secret(name)`)
//! - [`EnvSecretStore`], [`FileSecretStore`], [`MemorySecretStore`]: backends
//! - [`load_service_identity`]: the credential loader, blob to [`ServiceIdentity`]
//! - [`escape_credential_json`]: compacts a key file for storage
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetlink_credentials::{load_service_identity, EnvSecretStore};
//!
//! # tokio_test::block_on(async {
//! let store = EnvSecretStore::new();
//! let identity = load_service_identity(&store, "gsheets_credentials").await?;
//! println!("authenticating as {}", identity.client_email());
//! # Ok::<(), sheetlink_credentials::CredentialError>(())
//! # });
//! ```

mod error;
mod escape;
mod identity;
mod store;

pub use error::{CredentialError, EscapeError, SecretStoreError};
pub use escape::{escape_credential_file, escape_credential_json};
pub use identity::{load_service_identity, ServiceIdentity};
pub use store::{EnvSecretStore, FileSecretStore, MemorySecretStore, SecretStore, DEFAULT_ENV_PREFIX};
