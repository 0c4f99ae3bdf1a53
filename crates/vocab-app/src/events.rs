use std::ops::ControlFlow;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use vocab_core::StoreError;
use vocab_types::{AppEvent, UiEvent};

use crate::state::AppState;

pub mod bookmarks;
pub mod history;
pub mod search;
pub mod theme;

use bookmarks::{
    handle_bookmark_clear, handle_bookmark_selection, handle_bookmark_toggle, handle_show_bookmarks,
};
use history::{handle_history_clear, handle_history_selection, handle_show_history};
use search::{handle_lookup_finished, handle_search, handle_search_current};
use theme::handle_theme_toggle;

/// App's main loop. The only place dictionary state is mutated.
///
/// `self_tx` feeds lookup completions from spawned tasks back into this loop.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    self_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let dark_mode = state.dictionary.read().await.is_dark();
    app_to_ui_tx
        .send(AppEvent::BackendReady { dark_mode })
        .await?;

    tracing::debug!("[EVENT_LOOP] Waiting for events");
    let mut closing = false;
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("[EVENT_LOOP] Cancelled");
                return Ok(());
            }
            event = ui_to_app_rx.recv() => event?,
        };

        // Once closing, only the in-flight lookup is still applied
        if closing && matches!(event, AppEvent::UiEvent(_)) {
            continue;
        }

        tracing::trace!("[EVENT_LOOP] {:?}", event);
        if handle_events(state.clone(), &self_tx, &app_to_ui_tx, event)
            .await?
            .is_break()
        {
            tracing::debug!("[EVENT_LOOP] Close requested");
            closing = true;
        }

        if closing {
            if state.dictionary.read().await.is_loading() {
                tracing::debug!("[EVENT_LOOP] Waiting for the pending lookup before closing");
                continue;
            }
            break;
        }
    }

    app_to_ui_tx.send(AppEvent::Closed).await?;
    Ok(())
}

async fn handle_events(
    state: Arc<AppState>,
    self_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<ControlFlow<()>> {
    match event {
        AppEvent::UiEvent(ui_event) => match ui_event {
            UiEvent::SearchText(text) => {
                handle_search(state, &text, self_tx, app_to_ui_tx).await?;
            }
            UiEvent::SearchCurrent => {
                handle_search_current(state, self_tx, app_to_ui_tx).await?;
            }
            UiEvent::ToggleBookmark => handle_bookmark_toggle(state, app_to_ui_tx).await?,
            UiEvent::ShowBookmarks => handle_show_bookmarks(state, app_to_ui_tx).await?,
            UiEvent::SelectBookmark(index) => {
                handle_bookmark_selection(state, index, app_to_ui_tx).await?;
            }
            UiEvent::ClearBookmarks => handle_bookmark_clear(state, app_to_ui_tx).await?,
            UiEvent::ShowHistory => handle_show_history(state, app_to_ui_tx).await?,
            UiEvent::SelectHistory(index) => {
                handle_history_selection(state, index, app_to_ui_tx).await?;
            }
            UiEvent::ClearHistory => handle_history_clear(state, app_to_ui_tx).await?,
            UiEvent::ToggleTheme => handle_theme_toggle(state, app_to_ui_tx).await?,
            UiEvent::Close => return Ok(ControlFlow::Break(())),
        },
        AppEvent::LookupFinished { ticket, outcome } => {
            handle_lookup_finished(state, ticket, outcome, app_to_ui_tx).await?;
        }
        AppEvent::BackendReady { .. }
        | AppEvent::LookupStarted { .. }
        | AppEvent::ShowResult(_)
        | AppEvent::ShowHistory(_)
        | AppEvent::ShowBookmarks(_)
        | AppEvent::CurrentWord { .. }
        | AppEvent::ThemeChanged { .. }
        | AppEvent::Notice(_)
        | AppEvent::Closed => {
            // UI-only events, ignore in backend
        }
    }

    Ok(ControlFlow::Continue(()))
}

/// Failed writes keep the in-memory change; tell the user it was not saved
pub(crate) async fn report_store_error(
    app_to_ui_tx: &AsyncSender<AppEvent>,
    what: &str,
    error: StoreError,
) -> anyhow::Result<()> {
    tracing::error!("Failed to save {what}: {error}");
    app_to_ui_tx
        .send(AppEvent::Notice(format!(
            "Could not save {what}, the change only lasts for this session"
        )))
        .await?;
    Ok(())
}
