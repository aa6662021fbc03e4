//! Maintenance operations for a static game-catalog site.
//!
//! The site is an `index.html` plus a `games/<category>/<slug>.html` tree.
//! Everything here reads the disk once into a [`Catalog`], rewrites the index
//! through the [`Document`] model with pure functions from [`rewrite`], and
//! writes files back under a lock.

pub mod catalog;
pub mod document;
pub mod error;
pub mod filter_script;
mod html;
pub mod lock;
pub mod manifest;
pub mod pages;
pub mod reconcile;
pub mod reorganize;
pub mod rewrite;
pub mod settings;
pub mod site;

pub use catalog::{Catalog, CatalogEntry, build_catalog};
pub use document::{Document, FeaturedSlot, GameCard, InlineScript, Section};
pub use error::SiteError;
pub use manifest::{Manifest, ManifestEntry, parse_manifest};
pub use pages::{HomeLinkSummary, fix_all_home_links, fix_home_links};
pub use reconcile::{BrokenReference, MatchTier, ReconcileError, Reconciler, Reconciliation};
pub use reorganize::{
    ActionKind, CategorySource, PlannedAction, ReorganizePlan, ReorganizeSummary,
    execute_reorganize, plan_reorganize, rewrite_legacy_links,
};
pub use rewrite::{
    BrokenLinkPolicy, CategorySyncReport, LinkLocation, RepairReport, ScriptChange, repair,
    repair_featured, refresh_filter_script, remove_popular_section, sync_card_categories,
};
pub use settings::SiteConfig;
pub use site::{IndexWrite, Site};

// Re-export core types so consumers only need this crate.
pub use gamesite_core::{Category, Classifier, GameKey, classify, classify_legacy_dir, util};
