//! Parser for the scraped game link list.
//!
//! The scraper writes one block per game:
//!
//! ```text
//! Game page: https://html5games.com/Game/Zombie-Rush/1a2b3c
//!
//! Textarea link: https://html5.gamedistribution.com/1a2b3c/
//! ```
//!
//! Labels vary between scraper versions, so only the `label: value` shape
//! and the `/Game/<Name>/` path segment are relied on.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use gamesite_core::util::normalize_slug;
use regex::Regex;

use crate::error::SiteError;

/// Default manifest file name, looked up in the site root.
pub const DEFAULT_MANIFEST_FILE: &str = "game_textarea_links.txt";

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[^:\r\n]*:[ \t]*(https?://[^\s/]+/Game/([^/\s]+)/[^\r\n]*)(?:\r?\n)+[^:\r\n]*:[ \t]*([^\r\n]+)",
    )
    .expect("static pattern")
});

/// One scraped game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub page_url: String,
    /// Name as it appears in the page URL (`Zombie-Rush`).
    pub game_name: String,
    /// Normalized file stem (`zombie_rush`).
    pub slug: String,
    pub embed_url: String,
}

/// Scraped games keyed by slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let text = fs::read_to_string(path).map_err(|e| SiteError::file(path, e))?;
        Ok(parse_manifest(&text))
    }

    pub fn get(&self, slug: &str) -> Option<&ManifestEntry> {
        self.entries.get(slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.values()
    }
}

/// Extract every game block from `text`. A later block for the same slug
/// replaces an earlier one.
pub fn parse_manifest(text: &str) -> Manifest {
    let mut entries = BTreeMap::new();
    for caps in BLOCK_RE.captures_iter(text) {
        let game_name = caps[2].to_string();
        let slug = normalize_slug(&game_name);
        let entry = ManifestEntry {
            page_url: caps[1].trim_end().to_string(),
            slug: slug.clone(),
            game_name,
            embed_url: caps[3].trim().to_string(),
        };
        if entries.insert(slug, entry).is_some() {
            log::debug!("Duplicate manifest entry for {}", &caps[2]);
        }
    }
    Manifest { entries }
}
