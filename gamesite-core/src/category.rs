use serde::{Deserialize, Serialize};

/// Game categories used for the `games/<category>/` folders.
///
/// The set is closed: every classifier decision resolves to one of these,
/// and the folder names on disk are the `short_name()` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Action,
    Puzzle,
    Strategy,
    Adventure,
    Sports,
    Multiplayer,
    Idle,
    Shooter,
}

/// All category variants in folder-creation order.
const ALL_CATEGORIES: &[Category] = &[
    Category::Action,
    Category::Puzzle,
    Category::Strategy,
    Category::Adventure,
    Category::Sports,
    Category::Multiplayer,
    Category::Idle,
    Category::Shooter,
];

impl Category {
    /// Folder name and `data-category` value.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Puzzle => "puzzle",
            Self::Strategy => "strategy",
            Self::Adventure => "adventure",
            Self::Sports => "sports",
            Self::Multiplayer => "multiplayer",
            Self::Idle => "idle",
            Self::Shooter => "shooter",
        }
    }

    /// Label shown on game cards and in the sidebar.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Puzzle => "Puzzle",
            Self::Strategy => "Strategy & Defense",
            Self::Adventure => "Adventure & RPG",
            Self::Sports => "Sports & Racing",
            Self::Multiplayer => "Multiplayer",
            Self::Idle => "Idle",
            Self::Shooter => "Shooter",
        }
    }

    /// Accepted spellings, checked case-insensitively. The short name is first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Action => &["action", "arcade", "jump & run"],
            Self::Puzzle => &["puzzle", "match 3", "bubble shooter", "quiz", "cards"],
            Self::Strategy => &["strategy", "defense"],
            Self::Adventure => &["adventure", "rpg", "girls"],
            Self::Sports => &["sports", "sport", "racing"],
            Self::Multiplayer => &["multiplayer"],
            Self::Idle => &["idle"],
            Self::Shooter => &["shooter"],
        }
    }

    pub fn all() -> &'static [Category] {
        ALL_CATEGORIES
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Error returned when a string cannot be parsed into a `Category`.
#[derive(Debug, Clone)]
pub struct CategoryParseError(pub String);

impl std::fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown category: '{}'", self.0)
    }
}

impl std::error::Error for CategoryParseError {}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    /// Parse a category from its short name or any alias (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.aliases().iter().any(|alias| *alias == lower))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}
