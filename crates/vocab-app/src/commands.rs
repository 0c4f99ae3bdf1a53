use std::sync::Arc;

use console::Term;
use vocab_core::LookupError;
use vocab_core::preprocess::{DefaultPreprocessor, Preprocessor};
use vocab_types::{AppEvent, LookupOutcome};

use crate::cli::Commands;
use crate::state::AppState;
use crate::ui::render::Renderer;

/// Run one subcommand and print what it produced
pub async fn run_command(state: Arc<AppState>, command: Commands) -> anyhow::Result<()> {
    let events = command_events(state.clone(), command).await?;

    let ui_config = state.config.read().await.ui.clone();
    let dark = state.dictionary.read().await.is_dark();
    let mut renderer = Renderer::new(ui_config, dark);

    let term = Term::stdout();
    for event in events {
        if let Some(output) = renderer.render(event) {
            term.write_line(&output)?;
        }
    }

    Ok(())
}

/// Same state transitions as the interactive loop, collected instead of streamed
pub async fn command_events(
    state: Arc<AppState>,
    command: Commands,
) -> anyhow::Result<Vec<AppEvent>> {
    match command {
        Commands::Define { word } => define(state, &word.join(" ")).await,
        Commands::History { clear } => {
            let mut dictionary = state.dictionary.write().await;
            if clear {
                dictionary.clear_history()?;
                tracing::info!("Cleared search history");
            }
            Ok(vec![AppEvent::ShowHistory(dictionary.history().to_vec())])
        }
        Commands::Bookmarks { clear } => {
            let mut dictionary = state.dictionary.write().await;
            if clear {
                dictionary.clear_bookmarks()?;
                tracing::info!("Cleared bookmarks");
            }
            Ok(vec![AppEvent::ShowBookmarks(dictionary.bookmarks().to_vec())])
        }
        Commands::Bookmark { word } => {
            let word = DefaultPreprocessor.process(&word.join(" "));
            if word.is_empty() {
                anyhow::bail!("Nothing to bookmark");
            }

            let bookmarked = state.dictionary.write().await.toggle_bookmark_word(&word)?;
            Ok(vec![AppEvent::CurrentWord {
                word: Some(word),
                bookmarked,
            }])
        }
        Commands::Theme { toggle } => {
            let mut dictionary = state.dictionary.write().await;
            if toggle {
                let theme = dictionary.toggle_theme()?;
                return Ok(vec![AppEvent::ThemeChanged {
                    dark_mode: theme.is_dark(),
                }]);
            }

            let mode = if dictionary.is_dark() { "dark" } else { "light" };
            Ok(vec![AppEvent::Notice(format!("Theme: {mode}"))])
        }
    }
}

async fn define(state: Arc<AppState>, text: &str) -> anyhow::Result<Vec<AppEvent>> {
    let ticket = match state.dictionary.write().await.begin_lookup(text) {
        Ok(ticket) => ticket,
        Err(LookupError::EmptyInput) => anyhow::bail!("Nothing to look up"),
        Err(e) => return Err(e.into()),
    };

    let outcome = match state.definer.define(&ticket.word).await {
        Ok(definition) => LookupOutcome::Definition(definition.text),
        Err(e) => {
            tracing::warn!("Lookup for '{}' failed: {}", ticket.word, e);
            LookupOutcome::Failed(e.to_string())
        }
    };

    let mut dictionary = state.dictionary.write().await;
    dictionary.finish_lookup(&ticket, outcome)?;

    Ok(dictionary
        .display_result()
        .map(AppEvent::ShowResult)
        .into_iter()
        .collect())
}
