use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use shared::error::ApiError;
use table_controller::{
    DefaultMessages, HttpRowFetcher, InMemoryTableStore, MissingRowFetcher, RowFetcher,
    TableController, TableError, TableSnapshot, TableStore,
};
use tracing::info;

mod commands;
mod config;

use commands::Command;
use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "patch-table", about = "Drive a patch dashboard table from the command line")]
struct Args {
    /// JSON file holding query params, metadata, rows and selection
    #[arg(long, default_value = "table-state.json")]
    state: PathBuf,
    /// TOML settings; defaults to ./patch-table.toml when present
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let store = Arc::new(InMemoryTableStore::new(read_state(&args.state)?));
    let fetcher: Arc<dyn RowFetcher> = match &settings.api_base_url {
        Some(base_url) => Arc::new(HttpRowFetcher::new(
            base_url,
            settings.collection_path.clone(),
        )?),
        None => Arc::new(MissingRowFetcher),
    };
    let controller = TableController::new(
        store.clone(),
        fetcher,
        Arc::new(DefaultMessages),
        settings.controller_options(),
    );

    let output = match commands::run(args.command, &controller).await {
        Ok(output) => output,
        Err(err) => {
            if let Some(table_err) = err.downcast_ref::<TableError>() {
                println!("{}", serde_json::to_string_pretty(&ApiError::from(table_err))?);
            }
            return Err(err);
        }
    };

    write_state(&args.state, &store.snapshot())?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_state(path: &Path) -> Result<TableSnapshot> {
    if !path.exists() {
        info!(path = %path.display(), "no state file yet; starting from defaults");
        return Ok(TableSnapshot::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read state '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("malformed state '{}'", path.display()))
}

fn write_state(path: &Path, snapshot: &TableSnapshot) -> Result<()> {
    let raw = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, raw).with_context(|| format!("failed to write state '{}'", path.display()))
}
