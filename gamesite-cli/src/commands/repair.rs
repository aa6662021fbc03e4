use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamesite_lib::{
    BrokenLinkPolicy, RepairReport, ScriptChange, Site, refresh_filter_script, repair,
    repair_featured,
};

use crate::CliError;
use crate::commands::log_index_outcome;

/// Run the repair command: featured slots, then cards, then the filter script.
pub(crate) fn run_repair(site: &Site, dry_run: bool, seed: Option<u64>) -> Result<(), CliError> {
    run_index_repair(site, dry_run, seed, BrokenLinkPolicy::Repair)
}

/// Run the prune command: drop cards whose page is missing.
pub(crate) fn run_prune(site: &Site, dry_run: bool) -> Result<(), CliError> {
    run_index_repair(site, dry_run, None, BrokenLinkPolicy::Prune)
}

fn run_index_repair(
    site: &Site,
    dry_run: bool,
    seed: Option<u64>,
    policy: BrokenLinkPolicy,
) -> Result<(), CliError> {
    let catalog = site.build_catalog();
    log_header(site, catalog.len(), dry_run);

    let mut rng = crate::make_rng(seed);
    let page_size = site.config().page_size;
    let (outcome, (report, script)) = site.edit_index(dry_run, |doc| {
        let (doc, report) = repair(&doc, &catalog, policy, &mut rng);
        let (doc, script) = refresh_filter_script(&doc, page_size);
        Ok((doc, (report, script)))
    })?;

    print_repair_report(&report);
    match script {
        ScriptChange::Unchanged => {}
        ScriptChange::Replaced => log::info!(
            "  {} Filter script refreshed (page size {})",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            page_size,
        ),
        ScriptChange::Inserted => log::info!(
            "  {} Filter script added (page size {})",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            page_size,
        ),
    }
    crate::log_blank();
    log_index_outcome(outcome, &site.index_path());
    Ok(())
}

/// Run the featured command: Featured Games block only.
pub(crate) fn run_featured(site: &Site, dry_run: bool, seed: Option<u64>) -> Result<(), CliError> {
    let catalog = site.build_catalog();
    log_header(site, catalog.len(), dry_run);

    let mut rng = crate::make_rng(seed);
    let (outcome, report) =
        site.edit_index(dry_run, |doc| Ok(repair_featured(&doc, &catalog, &mut rng)))?;

    print_repair_report(&report);
    crate::log_blank();
    log_index_outcome(outcome, &site.index_path());
    Ok(())
}

fn log_header(site: &Site, pages: usize, dry_run: bool) {
    log::info!(
        "Checking links in: {}",
        site.index_path()
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "{}",
        format!("{} game pages on disk", pages).if_supports_color(Stdout, |t| t.dimmed()),
    );
    crate::log_dry_run(dry_run);
    crate::log_blank();
}

/// Print each action of a repair pass, then the totals.
pub(crate) fn print_repair_report(report: &RepairReport) {
    for fix in &report.repaired {
        log::info!(
            "  {} {} {} {} [{}, {}]",
            "\u{1F527}".if_supports_color(Stdout, |t| t.green()),
            fix.old_href.if_supports_color(Stdout, |t| t.bold()),
            "\u{2192}".if_supports_color(Stdout, |t| t.green()),
            fix.replacement.new_href,
            fix.location,
            fix.replacement
                .tier
                .description()
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    for card in &report.removed {
        log::info!(
            "  {} {} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.yellow()),
            card.href.if_supports_color(Stdout, |t| t.bold()),
            format!("(removed: {})", card.title.as_deref().unwrap_or("untitled"))
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    for href in &report.unrepairable {
        log::warn!(
            "  {} {} (no replacement available)",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            href,
        );
    }

    crate::log_blank();
    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} {} links valid",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.valid,
    );
    if !report.repaired.is_empty() {
        log::info!(
            "  {} {} links repaired",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            report.repaired.len(),
        );
    }
    if !report.removed.is_empty() {
        log::info!(
            "  {} {} cards removed",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            report.removed.len(),
        );
    }
    if !report.unrepairable.is_empty() {
        log::warn!(
            "  {} {} links could not be repaired",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            report.unrepairable.len(),
        );
    }
}
