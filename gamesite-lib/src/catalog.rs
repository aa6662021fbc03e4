//! Catalog index of the game pages present on disk.
//!
//! The layout is `games/<category>/<slug>.html`. The catalog is a snapshot
//! taken once per run; nothing re-checks the disk afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gamesite_core::GameKey;
use walkdir::WalkDir;

/// One discovered game page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: GameKey,
    pub file_path: PathBuf,
}

/// Sorted map of every game page under the games folder.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<GameKey, CatalogEntry>,
    /// Name of the games folder, used to render and parse hrefs.
    games_dir: String,
    /// Page extension without the dot.
    extension: String,
}

impl Catalog {
    pub fn new(games_dir: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            entries: BTreeMap::new(),
            games_dir: games_dir.into(),
            extension: extension.into(),
        }
    }

    /// Add an entry. A later insert for the same key replaces the earlier one.
    pub fn insert(&mut self, key: GameKey, file_path: PathBuf) {
        self.entries.insert(key.clone(), CatalogEntry { key, file_path });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &GameKey) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &GameKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in sorted key order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Entries of one category, in sorted key order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CatalogEntry> {
        self.entries
            .values()
            .filter(move |e| e.key.category == category)
    }

    /// Distinct category folder names, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut cats: Vec<&str> = self.entries.keys().map(|k| k.category.as_str()).collect();
        cats.dedup();
        cats
    }

    pub fn games_dir(&self) -> &str {
        &self.games_dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The site-relative href for a key: `games/<category>/<slug>.html`.
    pub fn href_for(&self, key: &GameKey) -> String {
        format!(
            "{}/{}/{}.{}",
            self.games_dir, key.category, key.slug, self.extension
        )
    }

    /// Parse an href of the form `games/<category>/<slug>.<ext>` into a key.
    ///
    /// A leading `./` and any query string or fragment are ignored. Returns
    /// `None` for hrefs of any other shape.
    pub fn key_for_href(&self, href: &str) -> Option<GameKey> {
        let mut parts = href_path(href).split('/');
        let (dir, category, file) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || dir != self.games_dir || category.is_empty() {
            return None;
        }
        let slug = file.strip_suffix(&format!(".{}", self.extension))?;
        if slug.is_empty() {
            return None;
        }
        Some(GameKey::new(category, slug))
    }

    /// The catalog entry an href points at, if the page exists.
    pub fn resolve_href(&self, href: &str) -> Option<&CatalogEntry> {
        self.key_for_href(href).and_then(|k| self.entries.get(&k))
    }
}

/// The path part of an href: query string, fragment and a leading `./` removed.
pub(crate) fn href_path(href: &str) -> &str {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.strip_prefix("./").unwrap_or(path)
}

/// Scan `games_root` and build the catalog.
///
/// Only files sitting directly in a category folder count. Files at the
/// root of the games folder have no category and are skipped, as are files
/// nested deeper (their href would not match the site layout). A missing
/// root yields an empty catalog.
pub fn build_catalog(games_root: &Path, extension: &str) -> Catalog {
    let games_dir = games_root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("games")
        .to_string();
    let mut catalog = Catalog::new(games_dir, extension);

    if !games_root.is_dir() {
        log::warn!("Games folder not found: {}", games_root.display());
        return catalog;
    }

    for entry in WalkDir::new(games_root).min_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
            continue;
        }
        match entry.depth() {
            2 => {}
            1 => {
                log::debug!(
                    "Skipping {}: not inside a category folder",
                    entry.path().display()
                );
                continue;
            }
            _ => {
                log::debug!(
                    "Skipping {}: nested below a category folder",
                    entry.path().display()
                );
                continue;
            }
        }

        let category = entry
            .path()
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str());
        let slug = entry.path().file_stem().and_then(|s| s.to_str());
        match (category, slug) {
            (Some(category), Some(slug)) => {
                catalog.insert(GameKey::new(category, slug), entry.into_path());
            }
            _ => log::warn!("Skipping non-UTF-8 path: {}", entry.path().display()),
        }
    }

    log::debug!("Catalogued {} game pages", catalog.len());
    catalog
}

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
