use std::future::Future;
use std::io::BufReader;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use vocab_core::theme::system_prefers_dark;
use vocab_core::{FileStore, MemoryStore, PersistentStore};
use vocab_definer::Definer;

mod cli;
mod commands;
mod controller;
mod events;
mod profile;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::controller::AppController;
use self::profile::ProfileDirs;
use self::state::{AppState, build_definer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with definitions on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let dirs = ProfileDirs::from_platform()?;
    dirs.init_user_config()?;
    let config = dirs.load_user_profile(&cli.profile)?;

    let store = if cli.ephemeral {
        tracing::info!("Ephemeral session, nothing will be saved");
        PersistentStore::new(Arc::new(MemoryStore::new()))
    } else {
        let data_dir = cli
            .data_dir
            .clone()
            .unwrap_or_else(|| dirs.data_dir(&cli.profile, &config));
        tracing::info!("Using data directory {}", data_dir.display());
        PersistentStore::new(Arc::new(FileStore::open(data_dir)?))
    };

    let definer = build_definer(&config.definer)?;
    if definer.metadata().requires_api_key && !config.definer.has_api_key() {
        tracing::warn!("GEMINI_API_KEY is not set, lookups will fail");
    }
    let state = Arc::new(AppState::new(config, store, definer, system_prefers_dark()));

    if let Some(command) = cli.command {
        return commands::run_command(state, command).await;
    }

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    run(state, shutdown).await
}

pub async fn run(state: Arc<AppState>, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let ui_queue = state.config.read().await.event_queue;
    let controller = AppController::new(state, ui_queue);

    let input = ui::spawn_line_reader(BufReader::new(std::io::stdin()))?;
    let mut tasks = controller.spawn_tasks(input);

    // A clean close lets both loops finish on their own; anything else cancels the rest
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested");
                break;
            }
            result = tasks.join_next() => match result {
                None => break,
                Some(Ok(Ok(()))) => tracing::debug!("Task finished"),
                Some(Ok(Err(e))) => {
                    tracing::error!("Task failed: {e}");
                    break;
                }
                Some(Err(e)) => {
                    tracing::error!("Task panicked: {e}");
                    break;
                }
            },
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::warn!("Task exited with error during shutdown: {e}");
        }
    }

    Ok(())
}
