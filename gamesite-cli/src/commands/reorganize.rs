use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamesite_lib::manifest::DEFAULT_MANIFEST_FILE;
use gamesite_lib::{
    CategorySource, Manifest, ReorganizePlan, Site, execute_reorganize, plan_reorganize,
    rewrite_legacy_links,
};

use crate::CliError;
use crate::commands::{log_file_errors, log_index_outcome};

/// Run the reorganize command: plan, print, execute, then fix legacy links
/// in the index.
pub(crate) fn run_reorganize(
    site: &Site,
    dry_run: bool,
    manifest_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let games_root = site.games_root();
    log::info!(
        "Reorganizing game pages under: {}",
        games_root.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    crate::log_dry_run(dry_run);

    let manifest = load_manifest(site.root(), manifest_path)?;
    let classifier = site.config().classifier.build();
    let catalog = site.build_catalog();
    crate::log_blank();

    let plan = plan_reorganize(site.root(), &games_root, &catalog, &manifest, &classifier);
    print_plan(&plan, &games_root);

    if !dry_run && !plan.actions.is_empty() {
        let summary = execute_reorganize(&plan, &games_root);
        crate::log_blank();
        log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
        for dir in &summary.created_dirs {
            log::info!(
                "  {} created {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                dir.display(),
            );
        }
        log::info!(
            "  {} {} moved, {} copied",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            summary.moved,
            summary.copied,
        );
        log_file_errors(&summary.errors);
    }

    crate::log_blank();
    let games_dir = site.config().games_dir.clone();
    let extension = site.config().page_extension.clone();
    let (outcome, links) = site.edit_index_text(dry_run, |html| {
        rewrite_legacy_links(html, &games_dir, &extension)
    })?;
    if links > 0 {
        log::info!(
            "  {} {} legacy links pointed into {}/",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            links,
            games_dir,
        );
    }
    log_index_outcome(outcome, &site.index_path());
    Ok(())
}

/// An explicit manifest must exist; the default one is optional.
fn load_manifest(root: &Path, explicit: Option<PathBuf>) -> Result<Manifest, CliError> {
    let path = match explicit {
        Some(p) => p,
        None => {
            let default = root.join(DEFAULT_MANIFEST_FILE);
            if !default.is_file() {
                log::info!(
                    "{}",
                    format!("No {}, classifying by file name only", DEFAULT_MANIFEST_FILE)
                        .if_supports_color(Stdout, |t| t.dimmed()),
                );
                return Ok(Manifest::default());
            }
            default
        }
    };
    let manifest = Manifest::load(&path)?;
    if manifest.is_empty() {
        return Err(CliError::other(format!(
            "no game entries found in {}",
            path.display()
        )));
    }
    log::info!(
        "{}",
        format!("{} games in {}", manifest.len(), path.display())
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(manifest)
}

fn print_plan(plan: &ReorganizePlan, games_root: &Path) {
    for action in &plan.actions {
        let target = action.target.strip_prefix(games_root).unwrap_or(&action.target);
        let reason = match action.decided_by {
            CategorySource::Manifest => "manifest",
            CategorySource::FolderName => "folder name",
            CategorySource::Classifier => "file name",
        };
        log::info!(
            "  {} {} {} {} [{}]",
            action.kind.if_supports_color(Stdout, |t| t.bold()),
            action.source.display(),
            "\u{2192}".if_supports_color(Stdout, |t| t.green()),
            target.display(),
            reason.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if !plan.already_placed.is_empty() {
        log::info!(
            "  {} {} already in place",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            plan.already_placed.len(),
        );
    }
    for (source, target) in &plan.conflicts {
        log::warn!(
            "  {} {} (target {} exists)",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            source.display(),
            target.display(),
        );
    }
    log_file_errors(&plan.errors);
    if plan.actions.is_empty() {
        log::info!(
            "  {}",
            "Nothing to move".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
