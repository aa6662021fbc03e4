pub(crate) mod catalog;
pub(crate) mod categories;
pub(crate) mod classify;
pub(crate) mod config;
pub(crate) mod pages;
pub(crate) mod reorganize;
pub(crate) mod repair;

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamesite_lib::IndexWrite;

/// Report what happened to the index file.
pub(crate) fn log_index_outcome(outcome: IndexWrite, path: &Path) {
    match outcome {
        IndexWrite::Written => log::info!(
            "  {} Wrote {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            path.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        IndexWrite::WouldWrite => log::info!(
            "  {} {} would be updated",
            "~".if_supports_color(Stdout, |t| t.yellow()),
            path.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        IndexWrite::Unchanged => log::info!(
            "  {} {} already up to date",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            path.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
    }
}

/// Print per-file failures collected by a pass.
pub(crate) fn log_file_errors(errors: &[(PathBuf, String)]) {
    for (path, msg) in errors {
        log::warn!(
            "  {} {}: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            path.display().if_supports_color(Stdout, |t| t.dimmed()),
            msg,
        );
    }
}
