//! # EcoCart CLI Library
//!
//! Core library for the `ecocart` binary. `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! ecocart_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap arguments, subcommand dispatch
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Loaded catalog
//! │   ├── cart.rs     ◄─── Cart session (lock, save, observers)
//! │   └── config.rs   ◄─── Paths and storage key
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Browse, search, compare
//! │   └── cart.rs     ◄─── Cart manipulation
//! ├── render.rs       ◄─── Plain-text output
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use ecocart_db::{Database, DbConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::{ApiError, ErrorCode};
use state::{CartState, CatalogState, ConfigState};

/// Everything a command may need, built once per invocation.
#[derive(Debug)]
pub struct App {
    pub config: ConfigState,
    pub catalog: CatalogState,
    pub cart: CartState,
    db: Database,
}

impl App {
    /// Opens storage and loads the catalog.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │                       Application Startup                               │
    /// │                                                                         │
    /// │  1. Load Catalog ─────────────────────────────────────────────────────► │
    /// │     • Read catalog_path, validate records and ids                       │
    /// │                                                                         │
    /// │  2. Connect to Database ──────────────────────────────────────────────► │
    /// │     • Create the data directory if needed                               │
    /// │     • SQLite with WAL mode, run pending migrations                      │
    /// │                                                                         │
    /// │  3. Restore Cart ─────────────────────────────────────────────────────► │
    /// │     • Read the blob under storage_key                                   │
    /// │     • Unreadable blob: warn and start empty                             │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn start(config: ConfigState) -> Result<App, ApiError> {
        let catalog = CatalogState::load(&config.catalog_path).await?;

        if let Some(dir) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                ApiError::new(
                    ErrorCode::DatabaseError,
                    format!("Cannot create {}: {}", dir.display(), e),
                )
            })?;
        }

        let db = Database::new(DbConfig::new(&config.db_path)).await?;
        info!(db_path = %config.db_path.display(), "Database ready");

        Ok(App::new(config, catalog, db).await)
    }

    /// Assembles an app from already-open parts and restores the cart.
    pub async fn new(config: ConfigState, catalog: CatalogState, db: Database) -> App {
        let cart = CartState::load(db.carts_with_key(config.storage_key.as_str())).await;
        App {
            config,
            catalog,
            cart,
            db,
        }
    }

    /// Closes the connection pool.
    pub async fn shutdown(self) {
        self.db.close().await;
    }
}

/// Runs the `ecocart` binary.
///
/// Output goes to stdout, logs and errors to stderr. Exit status 1 on any
/// command error.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    let config = ConfigState::from_env().with_overrides(
        cli.db.clone(),
        cli.catalog.clone(),
        cli.storage_key.clone(),
    );
    debug!(?config, "Configuration resolved");

    match execute(config, cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            if json {
                match serde_json::to_string(&err) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("error: {}", err),
                }
            } else {
                eprintln!("error: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}

async fn execute(config: ConfigState, cli: Cli) -> Result<String, ApiError> {
    let app = App::start(config).await?;
    let result = cli::dispatch(&app, cli.command, cli.json).await;
    app.shutdown().await;
    result
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - Default: warnings only
/// - `-v`: info for the ecocart crates
/// - `-vv`: debug for the ecocart crates, info for sqlx
/// - `RUST_LOG` overrides all of the above
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,ecocart=info",
        _ => "warn,ecocart=debug,sqlx=info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
