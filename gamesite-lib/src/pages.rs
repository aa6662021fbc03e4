//! Navigation fixes inside the game pages themselves.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::SiteError;
use crate::lock::{WriteLock, write_atomic};

const HOME_LINK: &str = r#"<a href="index.html""#;
const HOME_LINK_FIXED: &str = r#"<a href="../../index.html""#;

/// Point home links at the site root. Game pages sit two folders deep, so a
/// bare `index.html` resolves to a page that does not exist.
pub fn fix_home_links(page: &str) -> Cow<'_, str> {
    if page.contains(HOME_LINK) {
        Cow::Owned(page.replace(HOME_LINK, HOME_LINK_FIXED))
    } else {
        Cow::Borrowed(page)
    }
}

#[derive(Debug, Default)]
pub struct HomeLinkSummary {
    pub scanned: usize,
    /// Pages that were (or, in a dry run, would be) rewritten.
    pub fixed: Vec<PathBuf>,
    pub errors: Vec<(PathBuf, String)>,
}

/// Apply [`fix_home_links`] to every catalogued page. Only changed pages
/// are written; a page that fails is recorded and the rest still run.
pub fn fix_all_home_links(catalog: &Catalog, dry_run: bool) -> HomeLinkSummary {
    let mut summary = HomeLinkSummary::default();

    for entry in catalog.entries() {
        let path = &entry.file_path;
        summary.scanned += 1;
        match fix_page(path, dry_run) {
            Ok(true) => summary.fixed.push(path.clone()),
            Ok(false) => {}
            Err(e) => {
                log::warn!("{}", e);
                summary.errors.push((path.clone(), e.to_string()));
            }
        }
    }

    summary
}

/// Fix one page. Outside a dry run the page is locked before it is read and
/// stays locked until the new contents are in place.
fn fix_page(path: &Path, dry_run: bool) -> Result<bool, SiteError> {
    let _lock = if dry_run {
        None
    } else {
        Some(WriteLock::acquire(path)?)
    };
    let page = fs::read_to_string(path).map_err(|e| SiteError::file(path, e))?;
    let Cow::Owned(fixed) = fix_home_links(&page) else {
        return Ok(false);
    };
    if !dry_run {
        write_atomic(path, &fixed).map_err(|e| SiteError::file(path, e))?;
        log::debug!("Fixed home links in {}", path.display());
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;

    #[test]
    fn rewrites_bare_index_links() {
        let page = r#"<nav><a href="index.html">Home</a></nav>
<a href="index.html" class="text-gray-400 hover:text-game-accent">Back to Home</a>"#;
        let fixed = fix_home_links(page);
        assert_eq!(
            fixed,
            r#"<nav><a href="../../index.html">Home</a></nav>
<a href="../../index.html" class="text-gray-400 hover:text-game-accent">Back to Home</a>"#
        );
    }

    #[test]
    fn fix_is_idempotent() {
        let once = fix_home_links(r#"<a href="index.html">Home</a>"#).into_owned();
        assert!(matches!(fix_home_links(&once), Cow::Borrowed(_)));
    }

    #[test]
    fn other_links_untouched() {
        let page = r#"<a href="about/index.html">About</a><a class="x" href="index.html">Home</a>"#;
        assert!(matches!(fix_home_links(page), Cow::Borrowed(_)));
    }

    #[test]
    fn fixes_every_catalogued_page() {
        let dir = tempfile::tempdir().unwrap();
        let games = dir.path().join("games");
        fs::create_dir_all(games.join("action")).unwrap();
        fs::create_dir_all(games.join("idle")).unwrap();
        let broken = games.join("action/zombie_rush.html");
        let fine = games.join("idle/cookie_tycoon.html");
        fs::write(&broken, r#"<a href="index.html">Home</a>"#).unwrap();
        fs::write(&fine, r#"<a href="../../index.html">Home</a>"#).unwrap();

        let catalog = build_catalog(&games, "html");

        let dry = fix_all_home_links(&catalog, true);
        assert_eq!(dry.fixed, vec![broken.clone()]);
        assert!(fs::read_to_string(&broken).unwrap().contains(r#""index.html""#));

        let summary = fix_all_home_links(&catalog, false);
        assert_eq!(summary.scanned, 2);
        assert_eq!(summary.fixed, vec![broken.clone()]);
        assert!(summary.errors.is_empty());
        assert_eq!(
            fs::read_to_string(&broken).unwrap(),
            r#"<a href="../../index.html">Home</a>"#
        );
        assert!(!games.join("action/zombie_rush.html.lock").exists());
    }

    #[test]
    fn locked_page_is_reported_and_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let games = dir.path().join("games");
        fs::create_dir_all(games.join("action")).unwrap();
        let page = games.join("action/zombie_rush.html");
        fs::write(&page, r#"<a href="index.html">Home</a>"#).unwrap();
        let catalog = build_catalog(&games, "html");

        let held = WriteLock::acquire(&page).unwrap();
        let summary = fix_all_home_links(&catalog, false);
        assert_eq!(summary.scanned, 1);
        assert!(summary.fixed.is_empty());
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors[0].1.contains("locked"));
        assert_eq!(
            fs::read_to_string(&page).unwrap(),
            r#"<a href="index.html">Home</a>"#
        );

        drop(held);
        let summary = fix_all_home_links(&catalog, false);
        assert_eq!(summary.fixed, vec![page.clone()]);
    }

    #[test]
    fn unreadable_page_is_reported() {
        let mut catalog = Catalog::new("games", "html");
        catalog.insert(
            gamesite_core::GameKey::new("action", "ghost"),
            PathBuf::from("/nonexistent/games/action/ghost.html"),
        );
        let summary = fix_all_home_links(&catalog, false);
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.fixed.is_empty());
    }
}
