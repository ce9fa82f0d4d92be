// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! sheetlink - move rows between a SQL database and a spreadsheet tab.
//!
//! `read` prints a tab's records as a JSON array, `write` runs a query and
//! writes its result to the tab's top-left corner, and `escape-credential`
//! compacts a service-account key file for storage in a secret store. The
//! outcome JSON goes to stdout, logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sheetlink_bridge::{BridgeConfig, SheetBridge, DEFAULT_SECRET_NAME};
use sheetlink_credentials::{escape_credential_file, EnvSecretStore, FileSecretStore, SecretStore};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod sqlite;

use sqlite::SqliteQueryEngine;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
	Pretty,
	Compact,
	Json,
}

/// sheetlink - SQL to spreadsheet data shuttle
#[derive(Parser, Debug)]
#[command(name = "sheetlink", version, about, long_about = None)]
struct Args {
	/// Name of the secret holding the service-account key
	#[arg(long, global = true, env = "SHEETLINK_SECRET_NAME", default_value = DEFAULT_SECRET_NAME)]
	secret_name: String,

	/// Read secrets from files in this directory instead of the environment
	#[arg(long, global = true, env = "SHEETLINK_SECRETS_DIR")]
	secrets_dir: Option<PathBuf>,

	/// Log level (RUST_LOG takes precedence)
	#[arg(long, global = true, value_enum, default_value = "info")]
	log_level: LogLevel,

	/// Log output format
	#[arg(long, global = true, value_enum, default_value = "pretty")]
	log_format: LogFormat,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print every record of a tab as JSON
	Read {
		/// Spreadsheet identifier
		#[arg(long)]
		spreadsheet_id: String,
		/// Immutable tab identifier (not its position)
		#[arg(long, default_value_t = 0)]
		tab_id: i64,
	},
	/// Run a query and write its result to the top-left of a tab
	Write {
		/// SQL query whose result is written
		#[arg(long)]
		query: String,
		/// SQLite database URL, e.g. sqlite:./warehouse.db
		#[arg(long, env = "SHEETLINK_DATABASE_URL")]
		database: String,
		/// Spreadsheet identifier
		#[arg(long)]
		spreadsheet_id: String,
		/// Immutable tab identifier (not its position)
		#[arg(long, default_value_t = 0)]
		tab_id: i64,
	},
	/// Compact a service-account key file for storage in a secret store
	EscapeCredential {
		/// Path to the key file
		file: PathBuf,
	},
}

fn log_level_to_tracing(level: LogLevel) -> tracing::Level {
	match level {
		LogLevel::Trace => tracing::Level::TRACE,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Error => tracing::Level::ERROR,
	}
}

fn init_tracing(level: LogLevel, format: LogFormat) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("sheetlink={}", log_level_to_tracing(level))));

	match format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn secret_store(secrets_dir: Option<PathBuf>) -> Arc<dyn SecretStore> {
	match secrets_dir {
		Some(dir) => Arc::new(FileSecretStore::new(dir)),
		None => Arc::new(EnvSecretStore::new()),
	}
}

fn build_bridge(secret_name: String, secrets_dir: Option<PathBuf>) -> Result<SheetBridge> {
	let config = BridgeConfig::from_env().context("Invalid sheetlink configuration")?;

	let http_client = match config.request_timeout() {
		Some(timeout) => sheetlink_common_http::new_client_with_timeout(timeout),
		None => sheetlink_common_http::new_client(),
	}
	.context("Failed to build HTTP client")?;

	debug!(config = ?config, "bridge configured");
	Ok(SheetBridge::new(secret_store(secrets_dir), http_client, config).with_secret_name(secret_name))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string(value)?);
	Ok(())
}

fn exit_code(success: bool) -> ExitCode {
	if success {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	}
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let Args {
		secret_name,
		secrets_dir,
		log_level,
		log_format,
		command,
	} = Args::parse();

	init_tracing(log_level, log_format);

	match command {
		Command::Read {
			spreadsheet_id,
			tab_id,
		} => {
			let bridge = build_bridge(secret_name, secrets_dir)?;
			let outcome = bridge.read(&spreadsheet_id, tab_id).await;
			print_json(&outcome)?;
			Ok(exit_code(outcome.is_success()))
		}
		Command::Write {
			query,
			database,
			spreadsheet_id,
			tab_id,
		} => {
			let bridge = build_bridge(secret_name, secrets_dir)?;
			let engine = SqliteQueryEngine::connect(&database)
				.await
				.with_context(|| format!("Failed to open database {database}"))?;
			let outcome = bridge.write(&query, &engine, &spreadsheet_id, tab_id).await;
			print_json(&outcome)?;
			Ok(exit_code(outcome.is_success()))
		}
		Command::EscapeCredential { file } => {
			let escaped = escape_credential_file(&file)?;
			info!(path = %file.display(), "credential compacted");
			println!("{escaped}");
			Ok(ExitCode::SUCCESS)
		}
	}
}
