//! A site on disk: root folder plus its configuration.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, build_catalog};
use crate::document::Document;
use crate::error::SiteError;
use crate::lock::{WriteLock, write_atomic};
use crate::settings::SiteConfig;

/// Outcome of [`Site::edit_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWrite {
    /// The edit produced identical markup; nothing written.
    Unchanged,
    /// Changes found but not written (dry run).
    WouldWrite,
    Written,
}

#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
    config: SiteConfig,
}

impl Site {
    pub fn new(root: impl Into<PathBuf>, config: SiteConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Open the site at `root`, loading `gamesite.toml` (or `explicit`).
    pub fn open(root: impl Into<PathBuf>, explicit_config: Option<&Path>) -> Result<Self, SiteError> {
        let root = root.into();
        let config = SiteConfig::load(&root, explicit_config)?;
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.config.index_file)
    }

    pub fn games_root(&self) -> PathBuf {
        self.root.join(&self.config.games_dir)
    }

    pub fn build_catalog(&self) -> Catalog {
        build_catalog(&self.games_root(), &self.config.page_extension)
    }

    /// Read, transform and write back the index page under its lock.
    ///
    /// `edit` gets the parsed document and returns the new one plus any
    /// value the caller wants back (usually a report). The file is written
    /// only when the rendered markup differs and `dry_run` is off.
    pub fn edit_index<T>(
        &self,
        dry_run: bool,
        edit: impl FnOnce(Document) -> Result<(Document, T), SiteError>,
    ) -> Result<(IndexWrite, T), SiteError> {
        let path = self.index_path();
        let _lock = WriteLock::acquire(&path)?;

        let original = fs::read_to_string(&path).map_err(|e| SiteError::file(&path, e))?;
        let (doc, value) = edit(Document::parse(&original))?;
        let rendered = doc.render();

        let outcome = if rendered == original {
            IndexWrite::Unchanged
        } else if dry_run {
            IndexWrite::WouldWrite
        } else {
            write_atomic(&path, &rendered).map_err(|e| SiteError::file(&path, e))?;
            log::debug!("Wrote {}", path.display());
            IndexWrite::Written
        };
        Ok((outcome, value))
    }

    /// Like [`Site::edit_index`] for passes that work on the raw text.
    pub fn edit_index_text<T>(
        &self,
        dry_run: bool,
        edit: impl FnOnce(&str) -> Result<(String, T), SiteError>,
    ) -> Result<(IndexWrite, T), SiteError> {
        let path = self.index_path();
        let _lock = WriteLock::acquire(&path)?;

        let original = fs::read_to_string(&path).map_err(|e| SiteError::file(&path, e))?;
        let (rendered, value) = edit(&original)?;

        let outcome = if rendered == original {
            IndexWrite::Unchanged
        } else if dry_run {
            IndexWrite::WouldWrite
        } else {
            write_atomic(&path, &rendered).map_err(|e| SiteError::file(&path, e))?;
            IndexWrite::Written
        };
        Ok((outcome, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::remove_popular_section;

    const PAGE: &str = r#"<body><section class="py-8 bg-gray-900"><h2>Popular Games</h2></section><p>x</p></body>"#;

    fn site_with_index(contents: &str) -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), contents).unwrap();
        let site = Site::new(dir.path(), SiteConfig::default());
        (dir, site)
    }

    #[test]
    fn paths_follow_config() {
        let config = SiteConfig {
            games_dir: "play".to_string(),
            index_file: "home.html".to_string(),
            ..SiteConfig::default()
        };
        let site = Site::new("/srv/site", config);
        assert_eq!(site.index_path(), PathBuf::from("/srv/site/home.html"));
        assert_eq!(site.games_root(), PathBuf::from("/srv/site/play"));
    }

    #[test]
    fn edit_index_writes_changes_and_releases_lock() {
        let (dir, site) = site_with_index(PAGE);
        let (outcome, removed) = site
            .edit_index(false, |doc| Ok(remove_popular_section(&doc)))
            .unwrap();
        assert!(removed);
        assert_eq!(outcome, IndexWrite::Written);
        assert_eq!(
            fs::read_to_string(dir.path().join("index.html")).unwrap(),
            "<body><p>x</p></body>"
        );
        assert!(!dir.path().join("index.html.lock").exists());
        assert!(!dir.path().join("index.html.tmp").exists());
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let (dir, site) = site_with_index(PAGE);
        let (outcome, _) = site
            .edit_index(true, |doc| Ok(remove_popular_section(&doc)))
            .unwrap();
        assert_eq!(outcome, IndexWrite::WouldWrite);
        assert_eq!(fs::read_to_string(dir.path().join("index.html")).unwrap(), PAGE);
    }

    #[test]
    fn unchanged_document_is_not_written() {
        let (_dir, site) = site_with_index("<p>plain</p>");
        let (outcome, ()) = site.edit_index(false, |doc| Ok((doc, ()))).unwrap();
        assert_eq!(outcome, IndexWrite::Unchanged);
    }

    #[test]
    fn held_lock_fails_fast() {
        let (dir, site) = site_with_index(PAGE);
        let _held = WriteLock::acquire(&dir.path().join("index.html")).unwrap();
        let result = site.edit_index(false, |doc| Ok((doc, ())));
        assert!(matches!(result, Err(SiteError::Locked(_))));
    }

    #[test]
    fn missing_index_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path(), SiteConfig::default());
        let result = site.edit_index(false, |doc| Ok((doc, ())));
        assert!(matches!(result, Err(SiteError::File { .. })));
        assert!(!dir.path().join("index.html.lock").exists());
    }
}
