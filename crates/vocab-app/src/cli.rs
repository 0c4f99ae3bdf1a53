use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::profile::MAIN_PROFILE;

#[derive(Parser, Debug)]
#[command(author, version, about = "Look up words, keep a history and bookmark favourites")]
pub struct Cli {
    /// Profile to load settings and data from
    #[arg(long, global = true, default_value = MAIN_PROFILE)]
    pub profile: String,

    /// Keep history, bookmarks and theme in this directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory, nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Look up a word once and print the definition
    Define {
        #[arg(required = true)]
        word: Vec<String>,
    },
    /// Show recent searches
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Show bookmarks
    Bookmarks {
        #[arg(long)]
        clear: bool,
    },
    /// Bookmark a word, or remove it if already bookmarked
    Bookmark {
        #[arg(required = true)]
        word: Vec<String>,
    },
    /// Show the current theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_starts_interactive_mode() {
        let cli = Cli::try_parse_from(["vocab"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.profile, "main");
        assert!(!cli.ephemeral);
    }

    #[test]
    fn multi_word_terms_are_collected() {
        let cli = Cli::try_parse_from(["vocab", "define", "ice", "cream"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Define {
                word: vec!["ice".to_string(), "cream".to_string()]
            })
        );
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli =
            Cli::try_parse_from(["vocab", "history", "--clear", "--profile", "work", "--ephemeral"])
                .unwrap();
        assert_eq!(cli.command, Some(Commands::History { clear: true }));
        assert_eq!(cli.profile, "work");
        assert!(cli.ephemeral);
    }

    #[test]
    fn define_needs_a_word() {
        assert!(Cli::try_parse_from(["vocab", "define"]).is_err());
    }
}
