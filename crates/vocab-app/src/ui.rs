use std::io::BufRead;
use std::sync::Arc;

use console::Term;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use vocab_config::Config;
use vocab_types::{AppEvent, UiEvent};

pub mod command;
pub mod render;

use command::{Command, parse_command};
use render::Renderer;

/// Read lines on a dedicated thread; blocking stdin reads must not hold up runtime shutdown
pub fn spawn_line_reader<R>(reader: R) -> std::io::Result<AsyncReceiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = kanal::bounded(16);

    std::thread::Builder::new()
        .name("vocab-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
            tracing::debug!("Input reader finished");
        })?;

    Ok(rx.to_async())
}

pub async fn ui_loop(
    input: AsyncReceiver<String>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let ui_config = config.read().await.ui.clone();
    let mut renderer = Renderer::new(ui_config, false);
    let term = Term::stdout();
    // After a close request input is no longer read, output is still rendered until `Closed`
    let mut closing = false;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else { break };
                if matches!(event, AppEvent::Closed) {
                    break;
                }
                if let Some(output) = renderer.render(event) {
                    term.write_line(&output)?;
                    if !closing {
                        term.write_str(&renderer.prompt())?;
                    }
                }
            }
            line = input.recv(), if !closing => {
                // End of input behaves like /quit
                let command = match line {
                    Ok(line) => parse_command(&line),
                    Err(_) => Ok(Some(Command::Event(UiEvent::Close))),
                };

                match command {
                    Ok(Some(Command::Help)) => {
                        term.write_line(&renderer.help())?;
                        term.write_str(&renderer.prompt())?;
                    }
                    Ok(Some(Command::Event(event))) => {
                        closing = event == UiEvent::Close;
                        ui_to_app_tx.send(AppEvent::UiEvent(event)).await?;
                    }
                    Ok(None) => term.write_str(&renderer.prompt())?,
                    Err(message) => {
                        term.write_line(&renderer.notice(&message))?;
                        term.write_str(&renderer.prompt())?;
                    }
                }
            }
        }
    }

    tracing::debug!("UI loop stopped");
    Ok(())
}
