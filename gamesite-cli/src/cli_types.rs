//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gamesite")]
#[command(about = "Maintain a static HTML game catalog site", long_about = None)]
pub(crate) struct Cli {
    /// Site root containing index.html and the games folder (defaults to the
    /// configured root, then the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Site config file (defaults to <root>/gamesite.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Shared flag for commands that write files.
#[derive(Args, Clone, Copy)]
pub(crate) struct DryRunArg {
    /// Show what would change without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Arguments for commands that may pick replacements at random.
#[derive(Args, Clone, Copy)]
pub(crate) struct ReplaceArgs {
    #[command(flatten)]
    pub write: DryRunArg,

    /// Seed for the random fallback (makes runs reproducible)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Repair broken featured and card links, then refresh the filter script
    Repair {
        #[command(flatten)]
        args: ReplaceArgs,
    },

    /// Remove cards whose game page is missing, then refresh the filter script
    Prune {
        #[command(flatten)]
        write: DryRunArg,
    },

    /// Repair the Featured Games block only
    Featured {
        #[command(flatten)]
        args: ReplaceArgs,
    },

    /// Set each card's category and label from its link
    Categories {
        #[command(flatten)]
        write: DryRunArg,
    },

    /// Remove the Popular Games section from the index
    RemovePopular {
        #[command(flatten)]
        write: DryRunArg,
    },

    /// Move game pages into the category folders they belong in
    Reorganize {
        #[command(flatten)]
        write: DryRunArg,

        /// Scraped game list (defaults to <root>/game_textarea_links.txt)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Fix "Back to Home" links inside every game page
    HomeLinks {
        #[command(flatten)]
        write: DryRunArg,
    },

    /// Print the category the classifier picks for each slug
    Classify {
        /// Game slugs or file names
        #[arg(required = true)]
        slugs: Vec<String>,
    },

    /// List the game pages found under the games folder
    Catalog,

    /// Manage the saved default site root
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective configuration and where it comes from
    Show,

    /// Remember a default site root
    SetRoot {
        /// Path to the site root
        path: PathBuf,
    },

    /// Forget the saved default site root
    ClearRoot,

    /// Print the settings file path
    Path,
}
