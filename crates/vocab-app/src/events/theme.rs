use std::sync::Arc;

use kanal::AsyncSender;
use vocab_types::AppEvent;

use crate::events::report_store_error;
use crate::state::AppState;

pub async fn handle_theme_toggle(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (toggled, dark_mode) = {
        let mut dictionary = state.dictionary.write().await;
        let toggled = dictionary.toggle_theme();
        (toggled, dictionary.is_dark())
    };

    if let Err(e) = toggled {
        report_store_error(app_to_ui_tx, "theme preference", e).await?;
    }

    app_to_ui_tx
        .send(AppEvent::ThemeChanged { dark_mode })
        .await?;
    Ok(())
}
