//! Document model of the site's `index.html`.
//!
//! The page is split into an ordered list of [`Section`]s. The parts the
//! maintenance passes care about (game cards, featured slots, the filter
//! script, the Popular Games block) get their own variants; everything else
//! is kept as opaque [`Section::Markup`]. Concatenating the sections gives
//! back the exact input, so a pass that changes nothing writes nothing.

use std::borrow::Cow;
use std::ops::Range;

use crate::html::{Dom, Edit, Element, apply_edits};

/// Id of the element whose direct children are the game cards.
pub const GAMES_CONTAINER_ID: &str = "games-container";
/// Class marking a game card.
pub const CARD_CLASS: &str = "bg-game-card";
/// Classes of the category label span inside a card.
pub const LABEL_CLASSES: &[&str] = &["absolute", "top-2", "right-2"];
/// Classes of the section holding the featured games.
pub const FEATURED_SECTION_CLASSES: &[&str] = &["py-6", "bg-game-card"];
pub const FEATURED_SLOT_CLASS: &str = "featured-game";
pub const FEATURED_OVERLAY_CLASS: &str = "featured-overlay";
/// Classes of the Popular Games section.
pub const POPULAR_SECTION_CLASSES: &[&str] = &["py-8", "bg-gray-900"];
pub const POPULAR_HEADING: &str = "Popular Games";

/// Markers identifying the category filter script.
const FILTER_SCRIPT_MARKERS: &[&str] = &["category-link", "filterGamesByCategory"];

/// One contiguous part of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Markup the tools never interpret.
    Markup(String),
    Card(GameCard),
    Featured(FeaturedSlot),
    FilterScript(InlineScript),
    /// The Popular Games `<section>`, kept verbatim.
    PopularGames(String),
}

impl Section {
    pub fn markup(&self) -> Cow<'_, str> {
        match self {
            Section::Markup(s) | Section::PopularGames(s) => Cow::Borrowed(s),
            Section::Card(card) => Cow::Borrowed(card.markup()),
            Section::Featured(slot) => Cow::Borrowed(slot.markup()),
            Section::FilterScript(script) => Cow::Owned(script.markup()),
        }
    }
}

/// A parsed `index.html`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Split `html` into sections. Never fails: a page without any of the
    /// known parts becomes a single markup section.
    pub fn parse(html: &str) -> Self {
        let dom = Dom::parse(html);
        let mut spans: Vec<(Range<usize>, Section)> = Vec::new();

        if let Some(container) = dom.find(|e| e.attr_value("id") == Some(GAMES_CONTAINER_ID)) {
            for card in dom.children(container) {
                let el = dom.get(card);
                if el.name == "div" && el.has_class(CARD_CLASS) {
                    let markup = dom.outer(card);
                    spans.push((el.range.clone(), Section::Card(GameCard::from_markup(markup))));
                }
            }
        }

        if let Some(featured) =
            dom.find(|e| e.name == "section" && e.has_classes(FEATURED_SECTION_CLASSES))
        {
            for slot in dom.find_all_within(featured, |e| {
                e.name == "div" && e.has_class(FEATURED_SLOT_CLASS)
            }) {
                let markup = dom.outer(slot);
                spans.push((
                    dom.get(slot).range.clone(),
                    Section::Featured(FeaturedSlot::from_markup(markup)),
                ));
            }
        }

        let popular = dom.find_all(|e| e.name == "section" && e.has_classes(POPULAR_SECTION_CLASSES));
        if let Some(section) = popular.into_iter().find(|&s| {
            dom.find_all_within(s, |e| e.name == "h2")
                .into_iter()
                .any(|h2| dom.text(h2) == POPULAR_HEADING)
        }) {
            spans.push((
                dom.get(section).range.clone(),
                Section::PopularGames(dom.outer(section).to_string()),
            ));
        }

        // Scripts inside a card, slot or the Popular section are not the page's filter script.
        let script = dom
            .find_all(|e| is_filter_script(&dom, e))
            .into_iter()
            .find(|&s| {
                let range = &dom.get(s).range;
                !spans
                    .iter()
                    .any(|(taken, _)| range.start < taken.end && taken.start < range.end)
            });
        if let Some(script) = script {
            let el = dom.get(script);
            spans.push((
                el.range.clone(),
                Section::FilterScript(InlineScript {
                    open_tag: html[el.open_tag.clone()].to_string(),
                    body: html[el.inner.clone()].to_string(),
                    close_tag: html[el.inner.end..el.range.end].to_string(),
                }),
            ));
        }

        Self::from_spans(html, spans)
    }

    fn from_spans(html: &str, mut spans: Vec<(Range<usize>, Section)>) -> Self {
        spans.sort_by_key(|(range, _)| (range.start, range.end));

        let mut sections = Vec::new();
        let mut cursor = 0;
        for (range, section) in spans {
            if range.start < cursor {
                log::debug!("Ignoring nested section at byte {}", range.start);
                continue;
            }
            if range.start > cursor {
                sections.push(Section::Markup(html[cursor..range.start].to_string()));
            }
            sections.push(section);
            cursor = range.end;
        }
        if cursor < html.len() {
            sections.push(Section::Markup(html[cursor..].to_string()));
        }
        Self { sections }
    }

    /// Reassemble the page.
    pub fn render(&self) -> String {
        self.sections.iter().map(Section::markup).collect()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    pub fn cards(&self) -> impl Iterator<Item = &GameCard> {
        self.sections.iter().filter_map(|s| match s {
            Section::Card(card) => Some(card),
            _ => None,
        })
    }

    pub fn featured(&self) -> impl Iterator<Item = &FeaturedSlot> {
        self.sections.iter().filter_map(|s| match s {
            Section::Featured(slot) => Some(slot),
            _ => None,
        })
    }

    pub fn filter_script(&self) -> Option<&InlineScript> {
        self.sections.iter().find_map(|s| match s {
            Section::FilterScript(script) => Some(script),
            _ => None,
        })
    }

    pub fn has_popular_section(&self) -> bool {
        self.sections
            .iter()
            .any(|s| matches!(s, Section::PopularGames(_)))
    }
}

fn is_filter_script(dom: &Dom<'_>, element: &Element) -> bool {
    if element.name != "script" || element.attr("src").is_some() {
        return false;
    }
    let body = &dom.src()[element.inner.clone()];
    FILTER_SCRIPT_MARKERS.iter().any(|m| body.contains(m))
}

/// A game card `<div>` from the games grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCard {
    markup: String,
    link: Option<String>,
    title: Option<String>,
    category: Option<String>,
    label: Option<String>,
}

impl GameCard {
    pub fn from_markup(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let dom = Dom::parse(&markup);
        let link = dom
            .find(|e| e.name == "a")
            .and_then(|a| dom.attr(a, "href"));
        let title = dom.find(|e| e.name == "h3").map(|h| dom.text(h));
        let category = dom.find(|_| true).and_then(|root| dom.attr(root, "data-category"));
        let label = dom
            .find(|e| e.name == "span" && e.has_classes(LABEL_CLASSES))
            .map(|s| dom.text(s));
        Self {
            link,
            title,
            category,
            label,
            markup,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Href of the card's first anchor.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The `data-category` attribute.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Text of the category label badge.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Point the card at `href`, updating every anchor that shared the old
    /// link, and set the title.
    pub fn with_link(&self, href: &str, title: &str) -> Self {
        let dom = Dom::parse(&self.markup);
        let mut edits = relink_edits(&dom, self.link.as_deref(), href);
        if let Some(h3) = dom.find(|e| e.name == "h3") {
            if dom.text(h3) != title {
                edits.push(dom.set_text(h3, title));
            }
        }
        Self::from_markup(apply_edits(&self.markup, edits))
    }

    /// Set `data-category` and the label text. Parts already correct are
    /// left byte-for-byte alone.
    pub fn with_category(&self, category: &str, label: &str) -> Self {
        let dom = Dom::parse(&self.markup);
        let mut edits = Vec::new();
        if let Some(root) = dom.find(|_| true) {
            if dom.attr(root, "data-category").as_deref() != Some(category) {
                edits.push(dom.set_attr(root, "data-category", category));
            }
        }
        if let Some(span) = dom.find(|e| e.name == "span" && e.has_classes(LABEL_CLASSES)) {
            if dom.text(span) != label {
                edits.push(dom.set_text(span, label));
            }
        }
        if edits.is_empty() {
            return self.clone();
        }
        Self::from_markup(apply_edits(&self.markup, edits))
    }
}

/// A `div.featured-game` slot in the Featured Games block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedSlot {
    markup: String,
    link: Option<String>,
    title: Option<String>,
    image_alt: Option<String>,
}

impl FeaturedSlot {
    pub fn from_markup(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let dom = Dom::parse(&markup);
        let link = play_anchor(&dom).and_then(|a| dom.attr(a, "href"));
        let title = dom.find(|e| e.name == "h3").map(|h| dom.text(h));
        let image_alt = dom
            .find(|e| e.name == "img")
            .and_then(|img| dom.attr(img, "alt"));
        Self {
            link,
            title,
            image_alt,
            markup,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Href of the play anchor.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn image_alt(&self) -> Option<&str> {
        self.image_alt.as_deref()
    }

    /// Point the slot at `href` and set its title and image alt text.
    pub fn with_link(&self, href: &str, title: &str) -> Self {
        let dom = Dom::parse(&self.markup);
        let mut edits = relink_edits(&dom, self.link.as_deref(), href);
        if let Some(h3) = dom.find(|e| e.name == "h3") {
            if dom.text(h3) != title {
                edits.push(dom.set_text(h3, title));
            }
        }
        if let Some(img) = dom.find(|e| e.name == "img") {
            if dom.attr(img, "alt").as_deref() != Some(title) {
                edits.push(dom.set_attr(img, "alt", title));
            }
        }
        Self::from_markup(apply_edits(&self.markup, edits))
    }
}

/// First anchor inside the overlay, else the first anchor of the slot.
fn play_anchor(dom: &Dom<'_>) -> Option<usize> {
    dom.find(|e| e.has_class(FEATURED_OVERLAY_CLASS))
        .and_then(|overlay| dom.find_within(overlay, |e| e.name == "a"))
        .or_else(|| dom.find(|e| e.name == "a"))
}

/// Edits retargeting every anchor whose href is `old`.
fn relink_edits(dom: &Dom<'_>, old: Option<&str>, new: &str) -> Vec<Edit> {
    let Some(old) = old else {
        return Vec::new();
    };
    dom.find_all(|e| e.name == "a")
        .into_iter()
        .filter(|&a| dom.attr(a, "href").as_deref() == Some(old))
        .map(|a| dom.set_attr(a, "href", new))
        .collect()
}

/// An inline `<script>` element split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineScript {
    pub open_tag: String,
    pub body: String,
    pub close_tag: String,
}

impl InlineScript {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            open_tag: "<script>".to_string(),
            body: body.into(),
            close_tag: "</script>".to_string(),
        }
    }

    pub fn markup(&self) -> String {
        format!("{}{}{}", self.open_tag, self.body, self.close_tag)
    }
}

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod tests;
