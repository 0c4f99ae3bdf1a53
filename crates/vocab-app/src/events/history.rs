use std::sync::Arc;

use kanal::AsyncSender;
use vocab_types::AppEvent;

use crate::events::report_store_error;
use crate::state::AppState;

pub async fn handle_show_history(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let history = state.dictionary.read().await.history().to_vec();
    app_to_ui_tx.send(AppEvent::ShowHistory(history)).await?;
    Ok(())
}

/// Picking an entry only fills in the word; searching it is a separate step
pub async fn handle_history_selection(
    state: Arc<AppState>,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let selected = {
        let mut dictionary = state.dictionary.write().await;
        let word = dictionary.select_history(index).map(str::to_string);
        word.map(|word| {
            let bookmarked = dictionary.is_bookmarked(&word);
            (word, bookmarked)
        })
    };

    let event = match selected {
        Some((word, bookmarked)) => AppEvent::CurrentWord {
            word: Some(word),
            bookmarked,
        },
        None => AppEvent::Notice(format!("No history entry #{}", index + 1)),
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}

pub async fn handle_history_clear(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let cleared = state.dictionary.write().await.clear_history();
    if let Err(e) = cleared {
        report_store_error(app_to_ui_tx, "search history", e).await?;
    }

    tracing::info!("Cleared search history");
    app_to_ui_tx.send(AppEvent::ShowHistory(Vec::new())).await?;
    Ok(())
}
