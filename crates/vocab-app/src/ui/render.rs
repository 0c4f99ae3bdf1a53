use chrono::Local;
use console::Style;
use vocab_config::ui::UiConfig;
use vocab_types::{AppEvent, Bookmark, DisplayResult};

const RULE_WIDTH: usize = 40;

/// Colours for one theme
pub struct Palette {
    pub accent: Style,
    pub heading: Style,
    pub strong: Style,
    pub muted: Style,
    pub error: Style,
    pub star: Style,
}

impl Palette {
    pub fn new(dark: bool) -> Self {
        if dark {
            Self {
                accent: Style::new().cyan().bright(),
                heading: Style::new().cyan().bright().bold(),
                strong: Style::new().white().bright().bold(),
                muted: Style::new().white().dim(),
                error: Style::new().red().bright(),
                star: Style::new().yellow().bright(),
            }
        } else {
            Self {
                accent: Style::new().blue(),
                heading: Style::new().blue().bold(),
                strong: Style::new().black().bold(),
                muted: Style::new().black().dim(),
                error: Style::new().red(),
                star: Style::new().yellow(),
            }
        }
    }
}

/// Turns app events into terminal text
pub struct Renderer {
    palette: Palette,
    config: UiConfig,
}

impl Renderer {
    pub fn new(config: UiConfig, dark: bool) -> Self {
        Self {
            palette: Palette::new(dark),
            config,
        }
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.palette = Palette::new(dark);
    }

    pub fn render(&mut self, event: AppEvent) -> Option<String> {
        match event {
            AppEvent::BackendReady { dark_mode } => {
                self.set_dark(dark_mode);
                Some(format!(
                    "{} {}",
                    self.palette.heading.apply_to("VOCAB"),
                    self.palette.muted.apply_to("type a word to look it up, /help for commands")
                ))
            }
            AppEvent::LookupStarted { word } => Some(
                self.palette
                    .muted
                    .apply_to(format!("Looking up '{word}'..."))
                    .to_string(),
            ),
            AppEvent::ShowResult(result) => Some(self.result(&result)),
            AppEvent::ShowHistory(words) => Some(self.history(&words)),
            AppEvent::ShowBookmarks(bookmarks) => Some(self.bookmarks(&bookmarks)),
            AppEvent::CurrentWord {
                word: Some(word),
                bookmarked,
            } => Some(format!(
                "{} {} {}",
                self.star(bookmarked),
                self.palette.strong.apply_to(&word),
                self.palette.muted.apply_to("(/search to look it up, /bookmark to toggle)")
            )),
            AppEvent::CurrentWord { word: None, .. } => None,
            AppEvent::ThemeChanged { dark_mode } => {
                self.set_dark(dark_mode);
                let mode = if dark_mode { "dark" } else { "light" };
                Some(self.notice(&format!("Switched to {mode} mode")))
            }
            AppEvent::Notice(message) => Some(self.notice(&message)),
            AppEvent::UiEvent(_) | AppEvent::LookupFinished { .. } | AppEvent::Closed => None,
        }
    }

    pub fn notice(&self, message: &str) -> String {
        self.palette.muted.apply_to(message).to_string()
    }

    pub fn prompt(&self) -> String {
        format!("{} ", self.palette.accent.apply_to(">"))
    }

    pub fn help(&self) -> String {
        let rows = [
            ("<word>", "look up a word"),
            ("/search", "look up the selected word"),
            ("/bookmark", "bookmark or unbookmark the current word"),
            ("/bookmarks", "list bookmarks"),
            ("/pick <n>", "select bookmark n"),
            ("/clear-bookmarks", "remove all bookmarks"),
            ("/history", "list recent searches"),
            ("/open <n>", "select history entry n"),
            ("/clear-history", "forget recent searches"),
            ("/theme", "switch between dark and light"),
            ("/quit", "exit"),
        ];

        rows.iter()
            .map(|(command, description)| {
                format!(
                    "  {:<18} {}",
                    self.palette.accent.apply_to(command),
                    self.palette.muted.apply_to(description)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn result(&self, result: &DisplayResult) -> String {
        let header = format!(
            "{} {}",
            self.palette.heading.apply_to(&result.word),
            self.star(result.bookmarked)
        );
        let rule = self.palette.accent.apply_to("─".repeat(RULE_WIDTH));

        let body = if result.is_error {
            self.palette.error.apply_to(&result.text).to_string()
        } else if self.config.render_markdown {
            render_markdown(&result.text, &self.palette)
        } else {
            result.text.clone()
        };

        format!("{rule}\n{header}\n{rule}\n{body}\n{rule}")
    }

    fn history(&self, words: &[String]) -> String {
        let title = self.palette.heading.apply_to("Search History");
        if words.is_empty() {
            return format!("{title}\n  {}", self.notice("No search history yet"));
        }

        let rows = words
            .iter()
            .take(self.config.max_list_items)
            .enumerate()
            .map(|(i, word)| format!("  {:>2}. {}", i + 1, word))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{title}\n{rows}")
    }

    fn bookmarks(&self, bookmarks: &[Bookmark]) -> String {
        let title = self.palette.heading.apply_to("Bookmarks");
        if bookmarks.is_empty() {
            return format!("{title}\n  {}", self.notice("No bookmarks yet"));
        }

        let rows = bookmarks
            .iter()
            .take(self.config.max_list_items)
            .enumerate()
            .map(|(i, bookmark)| {
                let date = bookmark.date.with_timezone(&Local).format("%Y-%m-%d");
                format!(
                    "  {:>2}. {} {}  {}",
                    i + 1,
                    self.star(true),
                    bookmark.word,
                    self.palette.muted.apply_to(date)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("{title}\n{rows}")
    }

    fn star(&self, bookmarked: bool) -> String {
        if bookmarked {
            self.palette.star.apply_to("★").to_string()
        } else {
            self.palette.muted.apply_to("☆").to_string()
        }
    }
}

/// Minimal markdown for terminal output: headings, bullets, rules, bold and code spans
pub fn render_markdown(text: &str, palette: &Palette) -> String {
    text.lines()
        .map(|line| render_line(line, palette))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(line: &str, palette: &Palette) -> String {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];

    if matches!(trimmed.trim_end(), "---" | "***" | "___") {
        return palette.muted.apply_to("─".repeat(RULE_WIDTH)).to_string();
    }

    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
        let title = trimmed[hashes..].trim().replace("**", "");
        return palette.heading.apply_to(title).to_string();
    }

    for bullet in ["* ", "- ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(bullet) {
            return format!(
                "{indent}{} {}",
                palette.accent.apply_to("•"),
                render_inline(rest, palette)
            );
        }
    }

    format!("{indent}{}", render_inline(trimmed, palette))
}

fn render_inline(text: &str, palette: &Palette) -> String {
    let bold = text.split("**").collect::<Vec<_>>();
    // Unbalanced markers are printed as typed
    if bold.len() % 2 == 0 {
        return render_code(text, palette);
    }

    bold.iter()
        .enumerate()
        .map(|(i, segment)| {
            if i % 2 == 1 {
                palette.strong.apply_to(*segment).to_string()
            } else {
                render_code(segment, palette)
            }
        })
        .collect()
}

fn render_code(text: &str, palette: &Palette) -> String {
    let spans = text.split('`').collect::<Vec<_>>();
    if spans.len() % 2 == 0 {
        return text.to_string();
    }

    spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            if i % 2 == 1 {
                palette.accent.apply_to(*span).to_string()
            } else {
                span.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn plain() -> Palette {
        console::set_colors_enabled(false);
        Palette::new(false)
    }

    fn renderer() -> Renderer {
        console::set_colors_enabled(false);
        Renderer::new(UiConfig::default(), false)
    }

    #[test]
    fn strips_markdown_markers() {
        let text = "## Meanings\n* **Noun**: a round fruit\n  - `ˈæp.əl`\n---\nPlain *text*";
        let rendered = render_markdown(text, &plain());

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Meanings");
        assert_eq!(lines[1], "• Noun: a round fruit");
        assert_eq!(lines[2], "  • ˈæp.əl");
        assert_eq!(lines[3], "─".repeat(RULE_WIDTH));
        assert_eq!(lines[4], "Plain *text*");
    }

    #[test]
    fn unbalanced_markers_are_kept() {
        assert_eq!(render_markdown("**oops", &plain()), "**oops");
        assert_eq!(render_markdown("`code", &plain()), "`code");
        assert_eq!(render_markdown("#hashtag", &plain()), "#hashtag");
    }

    #[test]
    fn result_shows_word_star_and_error_text() {
        let output = renderer()
            .render(AppEvent::ShowResult(DisplayResult {
                word: "xyzzy".to_string(),
                text: "Error fetching data. Please try again.".to_string(),
                is_error: true,
                bookmarked: false,
            }))
            .unwrap();

        assert!(output.contains("xyzzy ☆"));
        assert!(output.contains("Error fetching data. Please try again."));
    }

    #[test]
    fn raw_mode_skips_markdown() {
        console::set_colors_enabled(false);
        let config = UiConfig {
            render_markdown: false,
            ..UiConfig::default()
        };
        let output = Renderer::new(config, true)
            .render(AppEvent::ShowResult(DisplayResult {
                word: "apple".to_string(),
                text: "## apple".to_string(),
                is_error: false,
                bookmarked: true,
            }))
            .unwrap();

        assert!(output.contains("apple ★"));
        assert!(output.contains("## apple"));
    }

    #[test]
    fn lists_are_numbered_and_capped() {
        console::set_colors_enabled(false);
        let config = UiConfig {
            max_list_items: 2,
            ..UiConfig::default()
        };
        let mut renderer = Renderer::new(config, false);

        let words = vec!["apple".to_string(), "banana".to_string(), "cherry".to_string()];
        let output = renderer.render(AppEvent::ShowHistory(words)).unwrap();

        assert!(output.starts_with("Search History"));
        assert!(output.contains(" 1. apple"));
        assert!(output.contains(" 2. banana"));
        assert!(!output.contains("cherry"));
    }

    #[test]
    fn empty_lists_say_so() {
        let mut renderer = renderer();

        let history = renderer.render(AppEvent::ShowHistory(Vec::new())).unwrap();
        assert!(history.contains("No search history yet"));

        let bookmarks = renderer.render(AppEvent::ShowBookmarks(Vec::new())).unwrap();
        assert!(bookmarks.contains("No bookmarks yet"));
    }

    #[test]
    fn bookmarks_show_dates() {
        let date = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let expected = date.with_timezone(&Local).format("%Y-%m-%d").to_string();

        let output = renderer()
            .render(AppEvent::ShowBookmarks(vec![Bookmark::new("apple", date)]))
            .unwrap();

        assert!(output.contains("1. ★ apple"));
        assert!(output.contains(&expected));
    }

    #[test]
    fn backend_only_events_render_nothing() {
        let mut renderer = renderer();
        assert!(
            renderer
                .render(AppEvent::CurrentWord {
                    word: None,
                    bookmarked: false
                })
                .is_none()
        );
        assert!(
            renderer
                .render(AppEvent::UiEvent(vocab_types::UiEvent::Close))
                .is_none()
        );
    }
}
