//! Site configuration and shared user settings.
//!
//! Two files are involved:
//!
//! - `gamesite.toml` in the site root (or a path given on the command line)
//!   describes the site layout and policy constants. Every field is
//!   optional; a missing file means all defaults.
//! - `~/.config/gamesite/settings.toml` remembers the default site root so
//!   the tools can be run from anywhere.

use std::io;
use std::path::{Path, PathBuf};

use gamesite_core::{Category, Classifier, KeywordRule, SecondaryRule};
use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// File name of the per-site config, looked up in the site root.
pub const SITE_CONFIG_FILE: &str = "gamesite.toml";

/// Cards revealed per category before "Load More" is needed.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Layout and policy settings for one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Folder holding `<category>/<slug>.<ext>` game pages, relative to the root.
    pub games_dir: String,
    /// The catalog page rewritten by the index commands.
    pub index_file: String,
    /// Extension of game page files, without the dot.
    pub page_extension: String,
    /// Cards revealed per category by the filter script.
    pub page_size: usize,
    pub classifier: ClassifierConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            games_dir: "games".to_string(),
            index_file: "index.html".to_string(),
            page_extension: "html".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Optional overrides for the keyword classifier.
///
/// `keywords` and `secondary` replace the built-in tables entirely when
/// present; their order is the match priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub default: Option<Category>,
    pub keywords: Option<Vec<KeywordRule>>,
    pub secondary: Option<Vec<SecondaryRule>>,
}

impl ClassifierConfig {
    pub fn build(&self) -> Classifier {
        if self.default.is_none() && self.keywords.is_none() && self.secondary.is_none() {
            return Classifier::builtin();
        }
        let builtin = Classifier::builtin();
        let default = self.default.unwrap_or(builtin.default_category());
        let keywords = self
            .keywords
            .clone()
            .unwrap_or_else(|| builtin.keywords().to_vec());
        let secondary = self
            .secondary
            .clone()
            .unwrap_or_else(|| builtin.secondary().to_vec());
        Classifier::with_rules(keywords, secondary, default)
    }
}

impl SiteConfig {
    /// Load the site config.
    ///
    /// An explicit path must exist. Without one, `<root>/gamesite.toml` is
    /// used when present, otherwise defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, SiteError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = root.join(SITE_CONFIG_FILE);
                if !candidate.is_file() {
                    log::debug!("No {} in {}, using defaults", SITE_CONFIG_FILE, root.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };
        let contents =
            std::fs::read_to_string(&path).map_err(|e| SiteError::file(&path, e))?;
        let config = Self::parse(&contents)
            .map_err(|e| SiteError::config(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded site config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a config document.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(contents).map_err(|e| e.to_string())?;
        if config.page_size == 0 {
            return Err("page_size must be at least 1".to_string());
        }
        if config.games_dir.is_empty() || config.games_dir.contains('/') {
            return Err(format!(
                "games_dir must be a single folder name, got '{}'",
                config.games_dir
            ));
        }
        let ext = config.page_extension.trim_start_matches('.');
        if ext.is_empty() {
            return Err("page_extension must not be empty".to_string());
        }
        Ok(Self {
            page_extension: ext.to_string(),
            ..config
        })
    }
}

/// Canonical path to the shared settings file: `~/.config/gamesite/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gamesite").join("settings.toml")
}

/// Resolve the site root using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `site.root` in `settings.toml`
/// 3. Current working directory
pub fn resolve_site_root(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_site_root() {
        return p;
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Read `site.root` from `settings.toml`, if set.
fn load_site_root() -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let root = doc.get("site")?.get("root")?.as_str()?;
    if root.is_empty() {
        None
    } else {
        Some(PathBuf::from(root))
    }
}

/// Save (or clear) the default site root in `settings.toml`.
///
/// Other tables in the file are preserved.
pub fn save_site_root(path: Option<&Path>) -> io::Result<()> {
    save_site_root_to(&settings_path(), path)
}

fn save_site_root_to(settings: &Path, path: Option<&Path>) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let site = table
        .entry("site")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let site_table = site
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[site] is not a table"))?;

    match path {
        Some(p) => {
            site_table.insert(
                "root".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            site_table.remove("root");
        }
    }

    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    crate::lock::write_atomic(settings, &serialized)
}

/// Load the settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}
