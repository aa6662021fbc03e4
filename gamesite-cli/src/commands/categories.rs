use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamesite_lib::{Site, remove_popular_section, sync_card_categories};

use crate::CliError;
use crate::commands::log_index_outcome;

/// Run the categories command.
pub(crate) fn run_categories(site: &Site, dry_run: bool) -> Result<(), CliError> {
    log::info!(
        "Syncing card categories in: {}",
        site.index_path()
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    crate::log_dry_run(dry_run);
    crate::log_blank();

    let games_dir = site.config().games_dir.clone();
    let (outcome, report) =
        site.edit_index(dry_run, |doc| Ok(sync_card_categories(&doc, &games_dir)))?;

    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} {} cards updated",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.updated,
    );
    log::info!(
        "  {} {} already correct",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.unchanged,
    );
    if report.skipped > 0 {
        log::warn!(
            "  {} {} cards link outside {}/",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            report.skipped,
            games_dir,
        );
    }
    crate::log_blank();
    log_index_outcome(outcome, &site.index_path());
    Ok(())
}

/// Run the remove-popular command.
pub(crate) fn run_remove_popular(site: &Site, dry_run: bool) -> Result<(), CliError> {
    crate::log_dry_run(dry_run);
    let (outcome, removed) = site.edit_index(dry_run, |doc| Ok(remove_popular_section(&doc)))?;

    if removed {
        log::info!(
            "  {} Popular Games section removed",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  {}",
            "No Popular Games section found".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log_index_outcome(outcome, &site.index_path());
    Ok(())
}
