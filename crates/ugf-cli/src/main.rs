// ugf entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Load config
// 3. Initialize tracing (log to file, not terminal)
// 4. Open the save database and league data
// 5. Run one command against the session

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ugf_cli::commands::{self, Cli};
use ugf_cli::config::{self, LoggingConfig};
use ugf_core::league::LeagueDb;
use ugf_core::store::SqliteStore;
use ugf_core::SaveSession;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let config = config::load_config(cli.config.as_deref(), &cwd)
        .context("failed to load configuration")?;

    init_tracing(&config.logging)?;

    let db_path = cli.db.clone().unwrap_or_else(|| config.storage.db_path.clone());
    ensure_parent_dir(&db_path)?;
    let store = SqliteStore::open(&db_path).context("failed to open save database")?;
    info!("Save database opened at {}", db_path.display());

    let league = match &config.league.data_path {
        Some(path) => LeagueDb::load(path).context("failed to load league data")?,
        None => LeagueDb::default(),
    };

    let mut session = SaveSession::open(store);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &mut session, &league, &mut out)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all(&logging.dir)
        .with_context(|| format!("failed to create log directory {}", logging.dir.display()))?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(logging.dir.join("ugf.log"))
        .context("failed to open log file")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
