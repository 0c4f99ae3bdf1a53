use std::sync::Arc;

use kanal::AsyncSender;
use vocab_types::AppEvent;

use crate::events::report_store_error;
use crate::state::AppState;

pub async fn handle_bookmark_toggle(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (toggled, word, bookmarked) = {
        let mut dictionary = state.dictionary.write().await;
        let toggled = dictionary.toggle_bookmark();
        (
            toggled,
            dictionary.current_word().map(str::to_string),
            dictionary.is_current_bookmarked(),
        )
    };

    match toggled {
        Ok(None) => {
            app_to_ui_tx
                .send(AppEvent::Notice("Search or pick a word first".to_string()))
                .await?;
            return Ok(());
        }
        Ok(Some(_)) => {}
        Err(e) => report_store_error(app_to_ui_tx, "bookmarks", e).await?,
    }

    app_to_ui_tx
        .send(AppEvent::CurrentWord { word, bookmarked })
        .await?;
    Ok(())
}

pub async fn handle_show_bookmarks(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let bookmarks = state.dictionary.read().await.bookmarks().to_vec();
    app_to_ui_tx.send(AppEvent::ShowBookmarks(bookmarks)).await?;
    Ok(())
}

pub async fn handle_bookmark_selection(
    state: Arc<AppState>,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let selected = {
        let mut dictionary = state.dictionary.write().await;
        dictionary.select_bookmark(index).map(str::to_string)
    };

    let event = match selected {
        Some(word) => AppEvent::CurrentWord {
            word: Some(word),
            bookmarked: true,
        },
        None => AppEvent::Notice(format!("No bookmark #{}", index + 1)),
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}

pub async fn handle_bookmark_clear(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let cleared = state.dictionary.write().await.clear_bookmarks();
    if let Err(e) = cleared {
        report_store_error(app_to_ui_tx, "bookmarks", e).await?;
    }

    tracing::info!("Cleared bookmarks");
    app_to_ui_tx.send(AppEvent::ShowBookmarks(Vec::new())).await?;
    Ok(())
}
