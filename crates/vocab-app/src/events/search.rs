use std::sync::Arc;

use kanal::AsyncSender;
use vocab_core::LookupError;
use vocab_core::lookup::Completion;
use vocab_types::{AppEvent, LookupOutcome, LookupTicket};

use crate::events::report_store_error;
use crate::state::AppState;

pub async fn handle_search(
    state: Arc<AppState>,
    text: &str,
    self_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let ticket = {
        let mut dictionary = state.dictionary.write().await;
        match dictionary.begin_lookup(text) {
            Ok(ticket) => ticket,
            Err(LookupError::EmptyInput) => {
                tracing::debug!("Ignoring empty search");
                return Ok(());
            }
            Err(LookupError::Busy { word }) => {
                tracing::debug!("Rejected search while '{word}' is loading");
                app_to_ui_tx
                    .send(AppEvent::Notice(format!(
                        "Still looking up '{word}', please wait"
                    )))
                    .await?;
                return Ok(());
            }
        }
    };

    app_to_ui_tx
        .send(AppEvent::LookupStarted {
            word: ticket.word.clone(),
        })
        .await?;

    // The request runs off-loop so the UI keeps responding while it loads.
    // It gets its own task so a panicking definer still resolves the lookup.
    let definer = state.definer.clone();
    let tx = self_tx.clone();
    tokio::spawn(async move {
        let word = ticket.word.clone();
        let request = tokio::spawn(async move { definer.define(&word).await });

        let outcome = match request.await {
            Ok(Ok(definition)) => LookupOutcome::Definition(definition.text),
            Ok(Err(e)) => LookupOutcome::Failed(e.to_string()),
            Err(e) => LookupOutcome::Failed(format!("Lookup task failed: {e}")),
        };

        if let Err(e) = tx.send(AppEvent::LookupFinished { ticket, outcome }).await {
            tracing::error!("Failed to deliver lookup result: {}", e);
        }
    });

    Ok(())
}

pub async fn handle_search_current(
    state: Arc<AppState>,
    self_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let current = state
        .dictionary
        .read()
        .await
        .current_word()
        .map(str::to_string);

    match current {
        Some(word) => handle_search(state, &word, self_tx, app_to_ui_tx).await,
        None => {
            app_to_ui_tx
                .send(AppEvent::Notice("Type a word to search".to_string()))
                .await?;
            Ok(())
        }
    }
}

pub async fn handle_lookup_finished(
    state: Arc<AppState>,
    ticket: LookupTicket,
    outcome: LookupOutcome,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (completion, display) = {
        let mut dictionary = state.dictionary.write().await;
        let completion = dictionary.finish_lookup(&ticket, outcome);
        (completion, dictionary.display_result())
    };

    match completion {
        Ok(Completion::Stale) => return Ok(()),
        Ok(Completion::Succeeded { word }) => tracing::info!("Looked up '{word}'"),
        Ok(Completion::Failed { word }) => tracing::info!("Lookup for '{word}' failed"),
        Err(e) => report_store_error(app_to_ui_tx, "search history", e).await?,
    }

    if let Some(display) = display {
        app_to_ui_tx.send(AppEvent::ShowResult(display)).await?;
    }

    Ok(())
}
