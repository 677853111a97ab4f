//! vita - vitamin and hemoglobin tracker on the command line
//!
//! Every invocation loads the persisted store, dispatches the actions for
//! one command, prints the result and flushes persistence before exiting.
//!
//! ```bash
//! vita login abc123 --expires-in 3600000
//! vita consume
//! vita hb 11.8
//! vita status
//! ```

mod commands;
mod lists;
mod logger;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use vita_config::{FileStorage, KeyValueStorage, StoreConfig};
use vita_store::domain_models::StatusFilter;
use vita_store::state::Theme;
use vita_store::{LoggingMiddleware, SanitizeMiddleware, Store};

/// Track supplement consumption, hemoglobin readings and reports.
#[derive(Parser)]
#[command(name = "vita")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./.vita.toml, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding persisted state.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log every dispatched action.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show consumption, hemoglobin, reports and session summary.
    Status,

    /// Record one supplement tablet.
    Consume,

    /// Set the consumption target.
    Target {
        /// Number of tablets.
        count: u32,
    },

    /// Record a hemoglobin reading in g/dL.
    Hb {
        value: f64,
    },

    /// Start a session.
    Login {
        /// Access token.
        token: String,

        /// Token lifetime in milliseconds.
        #[arg(long)]
        expires_in: Option<i64>,

        /// Keep the session across restarts.
        #[arg(long)]
        remember: bool,
    },

    /// End the session and clear private data.
    Logout,

    /// Report management commands.
    #[command(subcommand)]
    Report(ReportCommands),

    /// Add a notification.
    Notify {
        title: String,

        #[arg(short, long, default_value = "")]
        message: String,
    },

    /// List notifications.
    Notifications {
        /// Only unread notifications.
        #[arg(long)]
        unread: bool,
    },

    /// Mark a notification as read, or `all`.
    Read {
        id: String,
    },

    /// Set the color theme.
    Theme {
        theme: Theme,
    },

    /// Set the display language (e.g. `id`, `en`).
    Language {
        code: String,
    },

    /// Dispatch an arbitrary action by identifier.
    Dispatch {
        /// Action identifier, e.g. USER_INCREMENT_CONSUMPTION.
        action_type: String,

        /// JSON payload.
        payload: Option<String>,
    },

    /// Return every slice to its initial state.
    Reset,
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Submit a new report.
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long)]
        category: Option<String>,
    },

    /// List reports.
    List {
        #[arg(short, long, value_enum, default_value = "all")]
        status: StatusArg,

        #[arg(short, long, default_value = "1")]
        page: usize,

        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Delete a report by id.
    Delete {
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    All,
    Pending,
    Approved,
    Rejected,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => StatusFilter::All,
            StatusArg::Pending => StatusFilter::Pending,
            StatusArg::Approved => StatusFilter::Approved,
            StatusArg::Rejected => StatusFilter::Rejected,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let mut config = StoreConfig::load(cli.config.as_deref());
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    let data_dir = config.resolve_data_dir()?;
    log::debug!("Using data directory {:?}", data_dir);

    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(data_dir));
    let mut store = Store::builder()
        .config(config)
        .shared_storage(Arc::clone(&storage))
        .middleware(LoggingMiddleware::new())
        .middleware(SanitizeMiddleware::new())
        .build()
        .await;
    lists::hydrate(&mut store, storage.as_ref()).await;

    let result = commands::run(cli.command, &mut store, cli.json);

    if let Err(e) = lists::save(&store, storage.as_ref()).await {
        log::error!("{:#}", e);
    }
    store.shutdown().await;
    result
}
