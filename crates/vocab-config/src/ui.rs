use serde::{Deserialize, Serialize};

fn default_render_markdown() -> bool {
    true
}

fn default_max_list_items() -> usize {
    10
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Render result markdown, or print the raw text when false
    #[serde(default = "default_render_markdown")]
    pub render_markdown: bool,
    /// Rows shown in the history and bookmark lists
    #[serde(default = "default_max_list_items")]
    pub max_list_items: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            render_markdown: default_render_markdown(),
            max_list_items: default_max_list_items(),
        }
    }
}
