//! Pure rewrite passes over a [`Document`].
//!
//! Each pass takes a document and returns a new one plus a report of what it
//! did. Nothing here touches the filesystem; the catalog is the only view of
//! the disk a pass gets.

use gamesite_core::Category;
use gamesite_core::util::title_case;
use rand::Rng;

use crate::catalog::Catalog;
use crate::document::{Document, InlineScript, Section};
use crate::filter_script::filter_script_body;
use crate::reconcile::{BrokenReference, ReconcileError, Reconciler, Reconciliation};

/// What to do with a game card whose page is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrokenLinkPolicy {
    /// Point the card at a replacement; remove it only when nothing can
    /// replace it.
    #[default]
    Repair,
    /// Remove every broken card.
    Prune,
}

/// Where a repaired link lives on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkLocation {
    Featured,
    Card,
}

impl std::fmt::Display for LinkLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkLocation::Featured => write!(f, "featured"),
            LinkLocation::Card => write!(f, "card"),
        }
    }
}

/// One link pointed at a new page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRepair {
    pub location: LinkLocation,
    pub old_href: String,
    pub old_title: Option<String>,
    pub replacement: Reconciliation,
}

/// A card dropped from the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedCard {
    pub href: String,
    pub title: Option<String>,
}

/// Outcome of a repair or prune pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Links that already resolved.
    pub valid: usize,
    pub repaired: Vec<LinkRepair>,
    pub removed: Vec<RemovedCard>,
    /// Featured links left broken because no replacement exists.
    pub unrepairable: Vec<String>,
}

impl RepairReport {
    /// Whether the pass changed the document.
    pub fn has_changes(&self) -> bool {
        !self.repaired.is_empty() || !self.removed.is_empty()
    }

    fn merge(&mut self, other: RepairReport) {
        self.valid += other.valid;
        self.repaired.extend(other.repaired);
        self.removed.extend(other.removed);
        self.unrepairable.extend(other.unrepairable);
    }
}

/// Repair featured slots, then game cards.
///
/// Links that resolve in the catalog are never touched. Under
/// [`BrokenLinkPolicy::Repair`] each broken link goes through the
/// [`Reconciler`]; a card is removed only when the catalog is empty.
/// Featured slots are never removed. Under [`BrokenLinkPolicy::Prune`]
/// featured slots are left alone and every broken card is removed.
pub fn repair<R: Rng + ?Sized>(
    doc: &Document,
    catalog: &Catalog,
    policy: BrokenLinkPolicy,
    rng: &mut R,
) -> (Document, RepairReport) {
    let mut report = RepairReport::default();
    let doc = match policy {
        BrokenLinkPolicy::Repair => {
            let (doc, featured) = repair_featured(doc, catalog, rng);
            report.merge(featured);
            doc
        }
        BrokenLinkPolicy::Prune => doc.clone(),
    };

    let reconciler = Reconciler::new(catalog);
    let mut sections = Vec::with_capacity(doc.sections().len());
    for section in doc.into_sections() {
        let Section::Card(card) = section else {
            sections.push(section);
            continue;
        };
        let Some(href) = card.link().map(str::to_string) else {
            log::debug!("Card without a link left as is");
            sections.push(Section::Card(card));
            continue;
        };
        if catalog.resolve_href(&href).is_some() {
            report.valid += 1;
            sections.push(Section::Card(card));
            continue;
        }

        let title = card.title().map(str::to_string);
        if policy == BrokenLinkPolicy::Prune {
            log::info!("Removing card with missing page: {}", href);
            report.removed.push(RemovedCard { href, title });
            continue;
        }

        let display_name = title.clone().unwrap_or_else(|| href.clone());
        let broken = BrokenReference::new(href.clone(), display_name);
        match reconciler.reconcile(&broken, rng) {
            Ok(replacement) => {
                log::info!(
                    "Card {} -> {} ({})",
                    href,
                    replacement.new_href,
                    replacement.tier.description()
                );
                let card = card.with_link(&replacement.new_href, &replacement.new_title);
                report.repaired.push(LinkRepair {
                    location: LinkLocation::Card,
                    old_href: href,
                    old_title: title,
                    replacement,
                });
                sections.push(Section::Card(card));
            }
            Err(ReconcileError::NoCandidates) => {
                log::warn!("No replacement for {}, removing card", href);
                report.removed.push(RemovedCard { href, title });
            }
        }
    }

    (Document::from_sections(sections), report)
}

/// Repair the Featured Games slots only.
pub fn repair_featured<R: Rng + ?Sized>(
    doc: &Document,
    catalog: &Catalog,
    rng: &mut R,
) -> (Document, RepairReport) {
    let reconciler = Reconciler::new(catalog);
    let mut report = RepairReport::default();

    let sections = doc
        .sections()
        .iter()
        .map(|section| {
            let Section::Featured(slot) = section else {
                return section.clone();
            };
            let Some(href) = slot.link() else {
                return section.clone();
            };
            if catalog.resolve_href(href).is_some() {
                report.valid += 1;
                return section.clone();
            }

            let display_name = slot.title().unwrap_or(href);
            let broken = BrokenReference::new(href, display_name);
            match reconciler.reconcile(&broken, &mut *rng) {
                Ok(replacement) => {
                    log::info!(
                        "Featured {} -> {} ({})",
                        href,
                        replacement.new_href,
                        replacement.tier.description()
                    );
                    let updated = slot.with_link(&replacement.new_href, &replacement.new_title);
                    report.repaired.push(LinkRepair {
                        location: LinkLocation::Featured,
                        old_href: href.to_string(),
                        old_title: slot.title().map(str::to_string),
                        replacement,
                    });
                    Section::Featured(updated)
                }
                Err(ReconcileError::NoCandidates) => {
                    log::warn!("No replacement for featured link {}", href);
                    report.unrepairable.push(href.to_string());
                    section.clone()
                }
            }
        })
        .collect();

    (Document::from_sections(sections), report)
}

/// Label shown on a card for a category folder name.
pub fn category_label(folder: &str) -> String {
    match folder.parse::<Category>() {
        Ok(category) if category.short_name() == folder => category.display_name().to_string(),
        _ => title_case(folder),
    }
}

/// Category folder named by an href: the segment after `<games_dir>/`.
fn href_category<'a>(href: &'a str, games_dir: &str) -> Option<&'a str> {
    let prefix = format!("{games_dir}/");
    let start = href.find(&prefix)? + prefix.len();
    let rest = &href[start..];
    let end = rest.find('/')?;
    Some(&rest[..end]).filter(|c| !c.is_empty())
}

/// Result of [`sync_card_categories`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySyncReport {
    pub updated: usize,
    pub unchanged: usize,
    /// Cards whose link names no category folder.
    pub skipped: usize,
}

/// Set every card's `data-category` and label from the category folder in
/// its href.
pub fn sync_card_categories(doc: &Document, games_dir: &str) -> (Document, CategorySyncReport) {
    let mut report = CategorySyncReport::default();
    let sections = doc
        .sections()
        .iter()
        .map(|section| {
            let Section::Card(card) = section else {
                return section.clone();
            };
            let Some(category) = card.link().and_then(|h| href_category(h, games_dir)) else {
                report.skipped += 1;
                return section.clone();
            };
            let updated = card.with_category(category, &category_label(category));
            if updated.markup() == card.markup() {
                report.unchanged += 1;
            } else {
                log::debug!(
                    "Card {} now in category {}",
                    card.title().unwrap_or_default(),
                    category
                );
                report.updated += 1;
            }
            Section::Card(updated)
        })
        .collect();
    (Document::from_sections(sections), report)
}

/// What [`refresh_filter_script`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptChange {
    Unchanged,
    Replaced,
    Inserted,
}

/// Replace the filter script body with the canonical one, or insert a new
/// script before the closing `</body>` when the page has none.
pub fn refresh_filter_script(doc: &Document, page_size: usize) -> (Document, ScriptChange) {
    let body = filter_script_body(page_size);

    if let Some(script) = doc.filter_script() {
        if script.body == body {
            return (doc.clone(), ScriptChange::Unchanged);
        }
        let sections = doc
            .sections()
            .iter()
            .map(|section| match section {
                Section::FilterScript(script) => Section::FilterScript(InlineScript {
                    body: body.clone(),
                    ..script.clone()
                }),
                other => other.clone(),
            })
            .collect();
        return (Document::from_sections(sections), ScriptChange::Replaced);
    }

    let mut sections = doc.sections().to_vec();
    let script = Section::FilterScript(InlineScript::new(body));
    let body_close = sections.iter().enumerate().rev().find_map(|(i, s)| match s {
        Section::Markup(m) => m
            .to_ascii_lowercase()
            .rfind("</body")
            .map(|at| (i, m[..at].to_string(), m[at..].to_string())),
        _ => None,
    });
    match body_close {
        Some((i, before, after)) => {
            sections.splice(
                i..=i,
                [Section::Markup(before), script, Section::Markup(after)],
            );
        }
        None => sections.push(script),
    }
    (Document::from_sections(sections), ScriptChange::Inserted)
}

/// Drop the Popular Games section. Returns whether one was found.
pub fn remove_popular_section(doc: &Document) -> (Document, bool) {
    let mut removed = false;
    let sections = doc
        .sections()
        .iter()
        .filter(|s| {
            let popular = matches!(s, Section::PopularGames(_));
            removed |= popular;
            !popular
        })
        .cloned()
        .collect();
    (Document::from_sections(sections), removed)
}

#[cfg(test)]
#[path = "tests/rewrite_tests.rs"]
mod tests;
