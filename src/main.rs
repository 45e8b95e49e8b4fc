//! Binary entry point for notekeep.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use notekeep::config::ServiceConfig;
use notekeep::observability;
use notekeep::services::NoteService;
use notekeep::storage::{SqliteGateway, StoreConfig, schema};
use notekeep::{http, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Notekeep - a small HTTP CRUD service for notes.
#[derive(Parser)]
#[command(name = "notekeep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, env = "NOTEKEEP_PORT")]
        port: Option<u16>,

        /// Path to the SQLite database.
        #[arg(short, long, env = "NOTEKEEP_DB_PATH")]
        db: Option<PathBuf>,
    },

    /// Create the database schema.
    Init {
        /// Path to the SQLite database.
        #[arg(short, long, env = "NOTEKEEP_DB_PATH")]
        db: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    observability::init(config.log_format, cli.verbose);

    let result = match cli.command {
        Commands::Serve { port, db } => cmd_serve(config, port, db).await,
        Commands::Init { db } => cmd_init(config, db).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Loads configuration: file (when given), then environment overrides.
/// CLI flags are applied per command and win over both.
fn load_config(cli: &Cli) -> Result<ServiceConfig> {
    let config = match &cli.config {
        Some(path) => ServiceConfig::load_from_file(path)?,
        None => ServiceConfig::new(),
    };
    Ok(config.apply_env())
}

/// Runs the HTTP server.
async fn cmd_serve(
    mut config: ServiceConfig,
    port: Option<u16>,
    db: Option<PathBuf>,
) -> Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(db) = db {
        config.db_path = db;
    }

    let gateway = SqliteGateway::new(StoreConfig::new(&config.db_path));
    schema::initialize(&gateway).await?;
    let service = Arc::new(NoteService::new(gateway));

    http::serve(config.bind_addr()?, service).await
}

/// Creates the database schema.
async fn cmd_init(mut config: ServiceConfig, db: Option<PathBuf>) -> Result<()> {
    if let Some(db) = db {
        config.db_path = db;
    }

    let gateway = SqliteGateway::new(StoreConfig::new(&config.db_path));
    schema::initialize(&gateway).await
}
