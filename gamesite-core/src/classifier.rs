//! Filename-based category classification.
//!
//! Used when a game file has no authoritative category (scraped manifests
//! without a genre, stray pages outside the `games/` tree). Matching is a
//! first-hit substring search over an ordered keyword table, so the table
//! order is the priority order: `tower_defense_king` is a strategy game
//! because `tower` appears before any other matching keyword.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::Category;

/// Built-in keyword table, in priority order.
const KEYWORDS: &[(&str, Category)] = &[
    // action
    ("rush", Category::Action),
    ("fury", Category::Action),
    ("jump", Category::Action),
    ("run", Category::Action),
    ("ninja", Category::Action),
    ("fight", Category::Action),
    ("battle", Category::Action),
    ("adventure", Category::Adventure),
    ("hero", Category::Action),
    ("warrior", Category::Action),
    // puzzle
    ("puzzle", Category::Puzzle),
    ("match", Category::Puzzle),
    ("connect", Category::Puzzle),
    ("bubble", Category::Puzzle),
    ("jigsaw", Category::Puzzle),
    ("mahjong", Category::Puzzle),
    ("card", Category::Puzzle),
    ("chess", Category::Puzzle),
    ("solitaire", Category::Puzzle),
    ("word", Category::Puzzle),
    ("quiz", Category::Puzzle),
    ("tangram", Category::Puzzle),
    // shooter
    ("shoot", Category::Shooter),
    ("gun", Category::Shooter),
    ("sniper", Category::Shooter),
    ("missile", Category::Shooter),
    ("archery", Category::Shooter),
    ("arrow", Category::Shooter),
    // multiplayer
    ("multi", Category::Multiplayer),
    ("vs", Category::Multiplayer),
    ("duel", Category::Multiplayer),
    ("team", Category::Multiplayer),
    ("hockey", Category::Multiplayer),
    // sports and racing
    ("sport", Category::Sports),
    ("soccer", Category::Sports),
    ("football", Category::Sports),
    ("basketball", Category::Sports),
    ("racing", Category::Sports),
    ("car", Category::Sports),
    ("bike", Category::Sports),
    ("moto", Category::Sports),
    ("billiard", Category::Sports),
    ("tennis", Category::Sports),
    // strategy
    ("strategy", Category::Strategy),
    ("tower", Category::Strategy),
    ("defense", Category::Strategy),
    ("kingdom", Category::Strategy),
    ("castle", Category::Strategy),
    ("war", Category::Strategy),
    // idle
    ("idle", Category::Idle),
    ("click", Category::Idle),
    ("tycoon", Category::Idle),
    ("manage", Category::Idle),
    ("build", Category::Idle),
];

/// Fallback word groups, tried in order after the keyword table misses.
const SECONDARY: &[(&[&str], Category)] = &[
    (&["3d", "surfer", "escape"], Category::Action),
    (
        &["princess", "makeup", "dress", "fashion", "hair", "girl"],
        Category::Adventure,
    ),
    (&["dog", "cat", "pet", "animal"], Category::Adventure),
];

const DEFAULT_CATEGORY: Category = Category::Action;

static BUILTIN: LazyLock<Classifier> = LazyLock::new(Classifier::builtin);

/// One entry of the keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub category: Category,
}

/// A group of words mapping to one category, checked after the keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryRule {
    pub words: Vec<String>,
    pub category: Category,
}

/// Ordered keyword classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    keywords: Vec<KeywordRule>,
    secondary: Vec<SecondaryRule>,
    default: Category,
}

impl Classifier {
    /// The classifier with the built-in keyword table.
    pub fn builtin() -> Self {
        Self {
            keywords: KEYWORDS
                .iter()
                .map(|&(keyword, category)| KeywordRule {
                    keyword: keyword.to_string(),
                    category,
                })
                .collect(),
            secondary: SECONDARY
                .iter()
                .map(|&(words, category)| SecondaryRule {
                    words: words.iter().map(|w| w.to_string()).collect(),
                    category,
                })
                .collect(),
            default: DEFAULT_CATEGORY,
        }
    }

    /// Build a classifier from explicit rules. Keywords are lower-cased so
    /// they compare against the lower-cased slug.
    pub fn with_rules(
        keywords: Vec<KeywordRule>,
        secondary: Vec<SecondaryRule>,
        default: Category,
    ) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|r| KeywordRule {
                    keyword: r.keyword.to_lowercase(),
                    category: r.category,
                })
                .collect(),
            secondary: secondary
                .into_iter()
                .map(|r| SecondaryRule {
                    words: r.words.iter().map(|w| w.to_lowercase()).collect(),
                    category: r.category,
                })
                .collect(),
            default,
        }
    }

    pub fn keywords(&self) -> &[KeywordRule] {
        &self.keywords
    }

    pub fn secondary(&self) -> &[SecondaryRule] {
        &self.secondary
    }

    pub fn default_category(&self) -> Category {
        self.default
    }

    /// Assign a category to a slug. Total: always returns a category.
    pub fn classify(&self, slug: &str) -> Category {
        let lower = slug.to_lowercase();

        if let Some(rule) = self
            .keywords
            .iter()
            .find(|r| !r.keyword.is_empty() && lower.contains(&r.keyword))
        {
            return rule.category;
        }

        self.secondary
            .iter()
            .find(|r| r.words.iter().any(|w| !w.is_empty() && lower.contains(w.as_str())))
            .map(|r| r.category)
            .unwrap_or(self.default)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Classify a slug with the built-in table.
pub fn classify(slug: &str) -> Category {
    BUILTIN.classify(slug)
}

/// Map a legacy capitalized folder name (`"Sports Games"`, `"RPG"`) to a
/// category. Checks are case-sensitive substring tests, in this order.
pub fn classify_legacy_dir(dir_name: &str) -> Category {
    let has = |needle: &str| dir_name.contains(needle);
    if has("Action") || has("Shooter") {
        Category::Action
    } else if has("Puzzle") {
        Category::Puzzle
    } else if has("Strategy") || has("Defense") {
        Category::Strategy
    } else if has("Adventure") || has("RPG") {
        Category::Adventure
    } else if has("Sports") || has("Racing") {
        Category::Sports
    } else if has("Multiplayer") {
        Category::Multiplayer
    } else if has("Idle") {
        Category::Idle
    } else {
        Category::Action
    }
}

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod tests;
