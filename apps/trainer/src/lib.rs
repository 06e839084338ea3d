pub mod cli;
pub mod commands;
pub mod db;
pub mod state;

use anyhow::Context;
use clap::Parser;
use db::SqliteRepository;
use state::AppState;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the database file.
pub const DB_ENV: &str = "WOORDTRAINER_DB";

/// Resolve the database file: explicit flag, then `WOORDTRAINER_DB`,
/// then the per-user data directory.
pub fn get_db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(DB_ENV).map(PathBuf::from))
        .unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("woordtrainer")
                .join("woordtrainer.db")
        })
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_tracing();

    let db_path = get_db_path(args.db.clone());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let repository = SqliteRepository::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    tracing::debug!(path = %db_path.display(), "opened database");

    let state = AppState::new(repository);
    cli::execute(args.command, &state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_defaults() {
        let path = get_db_path(Some(PathBuf::from("/tmp/words.db")));
        assert_eq!(path, PathBuf::from("/tmp/words.db"));
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        if std::env::var_os(DB_ENV).is_none() {
            let path = get_db_path(None);
            assert!(path.ends_with("woordtrainer/woordtrainer.db"));
        }
    }
}
