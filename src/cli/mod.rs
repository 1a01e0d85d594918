pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "brainr")]
#[command(about = "Swipe through random Wikipedia articles in your terminal", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/brainr/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preference database to use instead of the default data directory
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the article feed (default)
    Browse,
    /// Print articles from the feed without opening the TUI
    Feed {
        /// Number of articles to print
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Show or change topic interests
    Topics {
        #[command(subcommand)]
        action: TopicsAction,
    },
    /// Manage saved articles
    Bookmarks {
        #[command(subcommand)]
        action: BookmarksAction,
    },
    /// List liked articles
    Liked,
    /// Show or change the color theme
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeArg>,
    },
    /// Pick topics and finish first-run setup
    Onboard {
        /// Topics to follow, e.g. --topics Science History
        #[arg(long, num_args = 1..)]
        topics: Vec<String>,
    },
    /// Search article titles and text
    Search {
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Delete all stored preferences
    Reset,
}

#[derive(Subcommand)]
pub enum TopicsAction {
    /// List the topic catalog, marking followed topics
    List,
    /// Replace followed topics
    Set {
        #[arg(required = true)]
        topics: Vec<String>,
    },
    /// Follow no topics (random articles)
    Clear,
}

#[derive(Subcommand)]
pub enum BookmarksAction {
    /// List saved articles
    List,
    /// Remove a saved article by id
    Remove { id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
    Toggle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_browse() {
        let cli = Cli::try_parse_from(["brainr"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_paths_after_subcommand() {
        let cli = Cli::try_parse_from(["brainr", "liked", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert!(matches!(cli.command, Some(Commands::Liked)));
    }

    #[test]
    fn test_onboard_topics() {
        let cli =
            Cli::try_parse_from(["brainr", "onboard", "--topics", "Science", "Music"]).unwrap();
        match cli.command {
            Some(Commands::Onboard { topics }) => assert_eq!(topics, vec!["Science", "Music"]),
            _ => panic!("expected onboard"),
        }
    }

    #[test]
    fn test_theme_values() {
        let cli = Cli::try_parse_from(["brainr", "theme", "toggle"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                mode: Some(ThemeArg::Toggle)
            })
        ));
        assert!(Cli::try_parse_from(["brainr", "theme", "sepia"]).is_err());
    }

    #[test]
    fn test_topics_set_requires_a_topic() {
        assert!(Cli::try_parse_from(["brainr", "topics", "set"]).is_err());
    }
}
