use std::fmt;
use std::str::FromStr;

/// Stable identifier of one game page: `games/<category>/<slug>.html`.
///
/// Ordering is by category, then slug. Catalog iteration follows this order,
/// so every "first match wins" rule that scans the catalog is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameKey {
    pub category: String,
    pub slug: String,
}

impl GameKey {
    pub fn new(category: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            slug: slug.into(),
        }
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.slug)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid game key '{0}': expected <category>/<slug>")]
pub struct KeyParseError(pub String);

impl FromStr for GameKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((category, slug))
                if !category.is_empty() && !slug.is_empty() && !slug.contains('/') =>
            {
                Ok(Self::new(category, slug))
            }
            _ => Err(KeyParseError(s.to_string())),
        }
    }
}
