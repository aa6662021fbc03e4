//! Replacement selection for links whose target page no longer exists.
//!
//! Three tiers, first success wins:
//!
//! 1. **Name match**: the normalized display name contains a catalog slug,
//!    or a slug contains the normalized name.
//! 2. **Same category**: the first catalog entry in the category named by
//!    the broken href.
//! 3. **Random**: a uniform pick over the whole catalog, from the injected
//!    random source.
//!
//! Tiers 1 and 2 scan the catalog in sorted key order, so they pick the same
//! entry on every run for the same catalog.

use gamesite_core::GameKey;
use gamesite_core::util::{normalize_display_name, slug_to_title};
use rand::Rng;

use crate::catalog::{Catalog, CatalogEntry, href_path};

/// A page link whose target file does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenReference {
    pub declared_href: String,
    /// Second `/`-separated segment of the href path (`games/<category>/...`).
    pub declared_category: Option<String>,
    pub display_name: String,
}

impl BrokenReference {
    pub fn new(href: impl Into<String>, display_name: impl Into<String>) -> Self {
        let declared_href = href.into();
        let declared_category = href_path(&declared_href)
            .split('/')
            .nth(1)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            declared_href,
            declared_category,
            display_name: display_name.into(),
        }
    }
}

/// Which tier produced a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    NameMatch,
    SameCategory,
    Random,
}

impl MatchTier {
    pub fn description(&self) -> &'static str {
        match self {
            MatchTier::NameMatch => "similar name",
            MatchTier::SameCategory => "same category",
            MatchTier::Random => "random pick",
        }
    }
}

/// Outcome of repairing one broken reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub replacement_key: GameKey,
    pub new_href: String,
    pub new_title: String,
    pub tier: MatchTier,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("no replacement candidates: the catalog is empty")]
    NoCandidates,
}

/// Picks replacements from a catalog.
pub struct Reconciler<'a> {
    catalog: &'a Catalog,
}

impl<'a> Reconciler<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Select a replacement for `broken`.
    ///
    /// Fails only when the catalog is empty.
    pub fn reconcile<R: Rng + ?Sized>(
        &self,
        broken: &BrokenReference,
        rng: &mut R,
    ) -> Result<Reconciliation, ReconcileError> {
        if self.catalog.is_empty() {
            return Err(ReconcileError::NoCandidates);
        }

        if let Some(entry) = self.name_match(&broken.display_name) {
            return Ok(self.result(entry, MatchTier::NameMatch));
        }

        if let Some(category) = broken.declared_category.as_deref() {
            if let Some(entry) = self.catalog.in_category(category).next() {
                return Ok(self.result(entry, MatchTier::SameCategory));
            }
        }

        let index = rng.random_range(0..self.catalog.len());
        let entry = self
            .catalog
            .entries()
            .nth(index)
            .ok_or(ReconcileError::NoCandidates)?;
        Ok(self.result(entry, MatchTier::Random))
    }

    /// Tier 1: substring match in either direction.
    fn name_match(&self, display_name: &str) -> Option<&'a CatalogEntry> {
        let normalized = normalize_display_name(display_name);
        if normalized.is_empty() {
            return None;
        }
        self.catalog.entries().find(|entry| {
            let slug = entry.key.slug.as_str();
            normalized.contains(slug) || slug.contains(normalized.as_str())
        })
    }

    fn result(&self, entry: &CatalogEntry, tier: MatchTier) -> Reconciliation {
        Reconciliation {
            replacement_key: entry.key.clone(),
            new_href: self.catalog.href_for(&entry.key),
            new_title: slug_to_title(&entry.key.slug),
            tier,
        }
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
