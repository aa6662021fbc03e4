use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamesite_lib::{Category, Site};

/// List catalogued pages grouped by category folder.
pub(crate) fn run_catalog(site: &Site) {
    let catalog = site.build_catalog();
    if catalog.is_empty() {
        log::warn!(
            "No game pages found under {}",
            site.games_root().display(),
        );
        return;
    }

    for folder in catalog.categories() {
        let known = folder.parse::<Category>().is_ok_and(|c| c.short_name() == folder);
        let count = catalog.in_category(folder).count();
        let heading = format!("{} ({})", folder, count);
        if known {
            log::info!("{}", heading.if_supports_color(Stdout, |t| t.bold()));
        } else {
            log::warn!(
                "{} {}",
                heading.if_supports_color(Stdout, |t| t.bold()),
                "unknown category".if_supports_color(Stdout, |t| t.yellow()),
            );
        }
        for entry in catalog.in_category(folder) {
            log::info!(
                "  {} {}",
                entry.key.slug,
                catalog.href_for(&entry.key).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    crate::log_blank();
    log::info!(
        "{} game pages in {} categories",
        catalog.len(),
        catalog.categories().len(),
    );
}
