use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamesite_lib::{Site, fix_all_home_links};

use crate::CliError;
use crate::commands::log_file_errors;

/// Run the home-links command.
pub(crate) fn run_home_links(site: &Site, dry_run: bool) -> Result<(), CliError> {
    let catalog = site.build_catalog();
    log::info!(
        "Fixing home links in {} pages under: {}",
        catalog.len(),
        site.games_root()
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    crate::log_dry_run(dry_run);
    crate::log_blank();

    let summary = fix_all_home_links(&catalog, dry_run);
    for path in &summary.fixed {
        let shown = path.strip_prefix(site.root()).unwrap_or(path);
        log::info!(
            "  {} {}",
            "\u{1F527}".if_supports_color(Stdout, |t| t.green()),
            shown.display(),
        );
    }

    crate::log_blank();
    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    let verb = if dry_run { "would be fixed" } else { "fixed" };
    log::info!(
        "  {} {} of {} pages {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.fixed.len(),
        summary.scanned,
        verb,
    );
    log_file_errors(&summary.errors);
    Ok(())
}
