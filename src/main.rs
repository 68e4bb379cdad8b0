mod analytics;
mod config;
mod error;
mod form;
mod logging;
mod models;
mod preferences;
mod repository;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};

use config::{AppDirs, Config};
use repository::TransactionRepository;
use store::SqliteStore;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let dirs = AppDirs::locate()?;
    let config = Config::load(&dirs.config_file)?;
    logging::init(&dirs.log_path())?;

    let db_path = dirs.db_path(&config);
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open store: {}", db_path.display()))?;
    let mut repo = TransactionRepository::load(Box::new(store));
    tracing::info!(
        db = %db_path.display(),
        records = repo.len(),
        version = env!("CARGO_PKG_VERSION"),
        "roxbudget started"
    );

    match args.len() {
        1 => run::as_tui(&mut repo, &config),
        2.. => run::as_cli(&args, &mut repo, &config),
        _ => {
            eprintln!("Usage: roxbudget [command]");
            Ok(())
        }
    }
}
