//! Moving game pages into the category folder they belong in.
//!
//! Works in two phases like the rest of the tools: [`plan_reorganize`]
//! inspects the disk and decides what to do without touching anything, then
//! [`execute_reorganize`] carries the plan out. A dry run is just a plan
//! that is printed instead of executed.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use gamesite_core::util::normalize_slug;
use gamesite_core::{Category, Classifier, classify_legacy_dir};
use regex::{Captures, Regex};
use walkdir::WalkDir;

use crate::catalog::{Catalog, has_extension};
use crate::error::SiteError;
use crate::manifest::Manifest;

/// Whether an action relocates or duplicates the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// A catalogued page in the wrong category folder.
    Move,
    /// A page outside the games folder. Copied, since other pages may still
    /// link to the old location.
    Copy,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Move => write!(f, "move"),
            ActionKind::Copy => write!(f, "copy"),
        }
    }
}

/// How the target category was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    Manifest,
    FolderName,
    Classifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub kind: ActionKind,
    pub source: PathBuf,
    pub target: PathBuf,
    pub category: Category,
    pub decided_by: CategorySource,
}

/// The result of planning a reorganize pass.
#[derive(Debug, Default)]
pub struct ReorganizePlan {
    pub actions: Vec<PlannedAction>,
    /// Pages already in the right place.
    pub already_placed: Vec<PathBuf>,
    /// `(source, target)` pairs where the target is taken.
    pub conflicts: Vec<(PathBuf, PathBuf)>,
    pub errors: Vec<(PathBuf, String)>,
}

impl ReorganizePlan {
    pub fn moves(&self) -> impl Iterator<Item = &PlannedAction> {
        self.actions.iter().filter(|a| a.kind == ActionKind::Move)
    }

    pub fn copies(&self) -> impl Iterator<Item = &PlannedAction> {
        self.actions.iter().filter(|a| a.kind == ActionKind::Copy)
    }
}

/// Summary of an executed plan.
#[derive(Debug, Default)]
pub struct ReorganizeSummary {
    pub moved: usize,
    pub copied: usize,
    pub created_dirs: Vec<PathBuf>,
    pub errors: Vec<(PathBuf, String)>,
}

/// Create a folder for every known category under `games_root`. Returns the
/// folders that did not exist before.
pub fn ensure_category_dirs(games_root: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut created = Vec::new();
    for category in Category::all() {
        let dir = games_root.join(category.short_name());
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|e| SiteError::file(&dir, e))?;
            log::debug!("Created {}", dir.display());
            created.push(dir);
        }
    }
    Ok(created)
}

/// The category a legacy folder name stands for. Old `shooter` folders held
/// the same games as `action`, so they are filed there.
fn folder_category(folder: &str) -> Option<Category> {
    match folder.parse::<Category>().ok()? {
        Category::Shooter => Some(Category::Action),
        category => Some(category),
    }
}

/// Decide where every game page should live.
///
/// Catalogued pages whose manifest category differs from their folder are
/// moved. Pages elsewhere under `site_root` (outside hidden folders and the
/// games folder, and not at the top level of the site) are copied into
/// `games/<category>/<slug>.<ext>` unless a page with that slug is already
/// catalogued. The category comes from the manifest, else from the parent
/// folder's name when it names a category, else from the classifier.
pub fn plan_reorganize(
    site_root: &Path,
    games_root: &Path,
    catalog: &Catalog,
    manifest: &Manifest,
    classifier: &Classifier,
) -> ReorganizePlan {
    let mut plan = ReorganizePlan::default();
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let extension = catalog.extension();

    for entry in catalog.entries() {
        let Some(scraped) = manifest.get(&entry.key.slug) else {
            plan.already_placed.push(entry.file_path.clone());
            continue;
        };
        let category = classifier.classify(&scraped.game_name);
        if category.short_name() == entry.key.category {
            plan.already_placed.push(entry.file_path.clone());
            continue;
        }
        let target = games_root
            .join(category.short_name())
            .join(format!("{}.{}", entry.key.slug, extension));
        push_action(
            &mut plan,
            &mut claimed,
            PlannedAction {
                kind: ActionKind::Move,
                source: entry.file_path.clone(),
                target,
                category,
                decided_by: CategorySource::Manifest,
            },
        );
    }

    let catalogued: HashSet<&str> = catalog.entries().map(|e| e.key.slug.as_str()).collect();
    let games_dir = games_root.file_name();

    let walker = WalkDir::new(site_root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let hidden = e.file_name().to_str().is_some_and(|n| n.starts_with('.'));
            let is_games = e.depth() == 1 && Some(e.file_name()) == games_dir;
            !hidden && !is_games
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                plan.errors.push((path, e.to_string()));
                continue;
            }
        };
        // top-level files are the site's own pages (index, about, ...)
        if entry.depth() < 2
            || !entry.file_type().is_file()
            || !has_extension(entry.path(), extension)
        {
            continue;
        }
        let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) else {
            plan.errors
                .push((entry.path().to_path_buf(), "non-UTF-8 file name".to_string()));
            continue;
        };
        let slug = normalize_slug(stem);
        if catalogued.contains(slug.as_str()) {
            plan.already_placed.push(entry.path().to_path_buf());
            continue;
        }

        let folder = entry
            .path()
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let (category, decided_by) = match manifest.get(&slug) {
            Some(scraped) => (
                classifier.classify(&scraped.game_name),
                CategorySource::Manifest,
            ),
            None => match folder_category(folder) {
                Some(category) => (category, CategorySource::FolderName),
                None => (classifier.classify(&slug), CategorySource::Classifier),
            },
        };
        let target = games_root
            .join(category.short_name())
            .join(format!("{slug}.{extension}"));
        push_action(
            &mut plan,
            &mut claimed,
            PlannedAction {
                kind: ActionKind::Copy,
                source: entry.path().to_path_buf(),
                target,
                category,
                decided_by,
            },
        );
    }

    plan
}

fn push_action(plan: &mut ReorganizePlan, claimed: &mut HashSet<PathBuf>, action: PlannedAction) {
    if action.target.exists() || !claimed.insert(action.target.clone()) {
        log::debug!(
            "Target taken, not planning {} of {}",
            action.kind,
            action.source.display()
        );
        plan.conflicts.push((action.source, action.target));
        return;
    }
    plan.actions.push(action);
}

/// Carry out a plan. Category folders are created first; a failing action
/// is recorded and the rest still run.
pub fn execute_reorganize(plan: &ReorganizePlan, games_root: &Path) -> ReorganizeSummary {
    let mut summary = ReorganizeSummary::default();

    match ensure_category_dirs(games_root) {
        Ok(created) => summary.created_dirs = created,
        Err(e) => summary.errors.push((games_root.to_path_buf(), e.to_string())),
    }

    for action in &plan.actions {
        if let Some(parent) = action.target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                summary.errors.push((action.source.clone(), e.to_string()));
                continue;
            }
        }
        let result = match action.kind {
            ActionKind::Move => fs::rename(&action.source, &action.target),
            ActionKind::Copy => fs::copy(&action.source, &action.target).map(|_| ()),
        };
        match result {
            Ok(()) => {
                log::info!(
                    "{} {} -> {}",
                    action.kind,
                    action.source.display(),
                    action.target.display()
                );
                match action.kind {
                    ActionKind::Move => summary.moved += 1,
                    ActionKind::Copy => summary.copied += 1,
                }
            }
            Err(e) => {
                log::warn!("Failed to {} {}: {}", action.kind, action.source.display(), e);
                summary.errors.push((action.source.clone(), e.to_string()));
            }
        }
    }

    summary
}

/// Point links into legacy capitalized folders (`href="Action Games/x.html"`)
/// at the games tree. Returns the new text and the number of links changed.
pub fn rewrite_legacy_links(
    html: &str,
    games_dir: &str,
    extension: &str,
) -> Result<(String, usize), SiteError> {
    let pattern = format!(
        r#"href="([A-Z][^"]+)/([^"/]+\.{})""#,
        regex::escape(extension)
    );
    let re = Regex::new(&pattern)?;
    let mut count = 0;
    let out = re.replace_all(html, |caps: &Captures<'_>| {
        let dir = &caps[1];
        let file = &caps[2];
        let stem = file
            .strip_suffix(&format!(".{extension}"))
            .unwrap_or(file);
        let category = classify_legacy_dir(dir);
        count += 1;
        format!(
            r#"href="{games_dir}/{}/{}.{extension}""#,
            category.short_name(),
            normalize_slug(stem)
        )
    });
    Ok((out.into_owned(), count))
}

#[cfg(test)]
#[path = "tests/reorganize_tests.rs"]
mod tests;
