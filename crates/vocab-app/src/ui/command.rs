use vocab_types::UiEvent;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Help,
}

/// Parse one input line. Blank lines are `Ok(None)`; anything not starting
/// with `/` is a search.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix('/') else {
        return Ok(Some(Command::Event(UiEvent::SearchText(line.to_string()))));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let event = match name {
        "help" | "?" => return Ok(Some(Command::Help)),
        "search" | "s" => UiEvent::SearchCurrent,
        "bookmark" | "star" => UiEvent::ToggleBookmark,
        "bookmarks" | "b" => UiEvent::ShowBookmarks,
        "history" | "h" => UiEvent::ShowHistory,
        "clear-history" => UiEvent::ClearHistory,
        "clear-bookmarks" => UiEvent::ClearBookmarks,
        "theme" => UiEvent::ToggleTheme,
        "open" => UiEvent::SelectHistory(list_index(arg, "open")?),
        "pick" => UiEvent::SelectBookmark(list_index(arg, "pick")?),
        "quit" | "exit" | "q" => UiEvent::Close,
        other => return Err(format!("Unknown command '/{other}', try /help")),
    };

    Ok(Some(Command::Event(event)))
}

/// Lists are shown 1-based
fn list_index(arg: Option<&str>, command: &str) -> Result<usize, String> {
    arg.and_then(|n| n.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map(|n| n - 1)
        .ok_or_else(|| format!("Expected a list number, e.g. /{command} 2"))
}
