//! Span-preserving HTML element locator.
//!
//! The site tools only ever touch a handful of attributes and text nodes, and
//! everything else in the page must survive byte-for-byte. Instead of a full
//! parse/serialize round trip, this module finds elements and records their
//! byte ranges in the source; rewrites are expressed as [`Edit`]s applied to
//! the original text.
//!
//! Handles comments, raw-text elements (`script`, `style`, `textarea`), void
//! elements, quoted attribute values containing `>`, and unclosed elements
//! (closed implicitly by their parent's end tag).

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!--|<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*?)(/?)>"#)
        .expect("static pattern")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("static pattern")
});

static STRIP_TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static pattern"));

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

/// One attribute of an opening tag. Ranges are absolute byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attr {
    /// Lower-cased attribute name.
    pub name: String,
    /// Raw (still entity-encoded) value; `None` for boolean attributes.
    pub value: Option<String>,
    /// Whole `name="value"` text.
    pub range: Range<usize>,
    /// Value text inside the quotes.
    pub value_range: Option<Range<usize>>,
}

/// A located element. All ranges are absolute byte offsets into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    /// Lower-cased tag name.
    pub name: String,
    /// From `<` of the opening tag to after `>` of the closing tag.
    pub range: Range<usize>,
    /// The opening tag itself.
    pub open_tag: Range<usize>,
    /// Content between the tags (empty for void elements).
    pub inner: Range<usize>,
    pub attrs: Vec<Attr>,
    pub parent: Option<usize>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&Attr> {
        self.attrs.iter().find(|a| a.name == name)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(|a| a.value.as_deref())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr_value("class")
            .map(|v| v.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn has_classes(&self, classes: &[&str]) -> bool {
        classes.iter().all(|c| self.has_class(c))
    }

    /// Whether the opening tag ends with `/>`.
    fn self_closed(&self, src: &str) -> bool {
        src[self.open_tag.clone()].ends_with("/>")
    }
}

/// Elements of a document, in source order.
#[derive(Debug, Clone)]
pub(crate) struct Dom<'a> {
    src: &'a str,
    elements: Vec<Element>,
}

impl<'a> Dom<'a> {
    pub fn parse(src: &'a str) -> Self {
        Self {
            src,
            elements: locate_elements(src),
        }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn get(&self, index: usize) -> &Element {
        &self.elements[index]
    }

    /// Indices of elements matching `pred`, in source order.
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<usize> {
        (0..self.elements.len())
            .filter(|&i| pred(&self.elements[i]))
            .collect()
    }

    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<usize> {
        (0..self.elements.len()).find(|&i| pred(&self.elements[i]))
    }

    /// Direct children of `parent`.
    pub fn children(&self, parent: usize) -> Vec<usize> {
        self.find_all(|e| e.parent == Some(parent))
    }

    pub fn is_descendant(&self, index: usize, ancestor: usize) -> bool {
        let mut current = self.elements[index].parent;
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.elements[p].parent;
        }
        false
    }

    /// First descendant of `ancestor` matching `pred`.
    pub fn find_within(&self, ancestor: usize, pred: impl Fn(&Element) -> bool) -> Option<usize> {
        (ancestor + 1..self.elements.len())
            .find(|&i| self.is_descendant(i, ancestor) && pred(&self.elements[i]))
    }

    /// All descendants of `ancestor` matching `pred`.
    pub fn find_all_within(
        &self,
        ancestor: usize,
        pred: impl Fn(&Element) -> bool,
    ) -> Vec<usize> {
        (ancestor + 1..self.elements.len())
            .filter(|&i| self.is_descendant(i, ancestor) && pred(&self.elements[i]))
            .collect()
    }

    /// Source text of the whole element.
    pub fn outer(&self, index: usize) -> &'a str {
        &self.src[self.elements[index].range.clone()]
    }

    /// Raw content between the tags.
    pub fn inner(&self, index: usize) -> &'a str {
        &self.src[self.elements[index].inner.clone()]
    }

    /// Text content: tags stripped, entities decoded, trimmed.
    pub fn text(&self, index: usize) -> String {
        let stripped = STRIP_TAGS_RE.replace_all(self.inner(index), "");
        decode_entities(stripped.trim())
    }

    /// Decoded value of an attribute.
    pub fn attr(&self, index: usize, name: &str) -> Option<String> {
        self.elements[index].attr_value(name).map(decode_entities)
    }

    /// Edit that sets (or adds) an attribute on an element's opening tag.
    pub fn set_attr(&self, index: usize, name: &str, value: &str) -> Edit {
        let element = &self.elements[index];
        let escaped = escape_attr(value);
        match element.attr(name) {
            Some(Attr {
                value_range: Some(range),
                ..
            }) => Edit::replace(range.clone(), escaped),
            Some(attr) => Edit::replace(attr.range.clone(), format!("{name}=\"{escaped}\"")),
            None => {
                let close_len = if element.self_closed(self.src) { 2 } else { 1 };
                let at = element.open_tag.end - close_len;
                Edit::insert(at, format!(" {name}=\"{escaped}\""))
            }
        }
    }

    /// Edit that replaces an element's content with escaped text.
    pub fn set_text(&self, index: usize, text: &str) -> Edit {
        Edit::replace(self.elements[index].inner.clone(), escape_text(text))
    }
}

/// A replacement of one byte range of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }
}

/// Apply non-overlapping edits to `src`. Overlapping edits after the first
/// are dropped.
pub(crate) fn apply_edits(src: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| (e.range.start, e.range.end));
    let mut out = String::with_capacity(src.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.range.start < cursor {
            log::debug!("Dropping overlapping edit at {}", edit.range.start);
            continue;
        }
        out.push_str(&src[cursor..edit.range.start]);
        out.push_str(&edit.text);
        cursor = edit.range.end;
    }
    out.push_str(&src[cursor..]);
    out
}

fn locate_elements(src: &str) -> Vec<Element> {
    // ASCII lower-casing keeps byte offsets intact
    let lower = src.to_ascii_lowercase();
    let mut elements: Vec<Element> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut pos = 0;

    while pos < src.len() {
        let Some(caps) = TAG_RE.captures_at(src, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };

        if whole.as_str() == "<!--" {
            match src[whole.end()..].find("-->") {
                Some(off) => {
                    pos = whole.end() + off + 3;
                    continue;
                }
                None => break,
            }
        }

        let closing = caps.get(1).is_some_and(|g| !g.as_str().is_empty());
        let name = caps
            .get(2)
            .map(|g| g.as_str().to_ascii_lowercase())
            .unwrap_or_default();

        if closing {
            if let Some(depth) = stack.iter().rposition(|&i| elements[i].name == name) {
                for &i in &stack[depth + 1..] {
                    elements[i].inner.end = whole.start();
                    elements[i].range.end = whole.start();
                }
                let i = stack[depth];
                elements[i].inner.end = whole.start();
                elements[i].range.end = whole.end();
                stack.truncate(depth);
            }
            pos = whole.end();
            continue;
        }

        let attrs = caps
            .get(3)
            .map(|g| parse_attrs(g.as_str(), g.start()))
            .unwrap_or_default();
        let self_closing = caps.get(4).is_some_and(|g| !g.as_str().is_empty())
            || VOID_ELEMENTS.contains(&name.as_str());
        let index = elements.len();
        elements.push(Element {
            name: name.clone(),
            range: whole.start()..whole.end(),
            open_tag: whole.start()..whole.end(),
            inner: whole.end()..whole.end(),
            attrs,
            parent: stack.last().copied(),
        });
        pos = whole.end();

        if self_closing {
            continue;
        }

        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            let needle = format!("</{name}");
            let (inner_end, end) = match lower[whole.end()..].find(&needle) {
                Some(off) => {
                    let close_start = whole.end() + off;
                    let close_end = src[close_start..]
                        .find('>')
                        .map(|e| close_start + e + 1)
                        .unwrap_or(src.len());
                    (close_start, close_end)
                }
                None => (src.len(), src.len()),
            };
            elements[index].inner.end = inner_end;
            elements[index].range.end = end;
            pos = end;
            continue;
        }

        stack.push(index);
    }

    for &i in &stack {
        elements[i].inner.end = src.len();
        elements[i].range.end = src.len();
    }

    elements
}

fn parse_attrs(text: &str, offset: usize) -> Vec<Attr> {
    ATTR_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4));
            Some(Attr {
                name,
                value: value.map(|v| v.as_str().to_string()),
                range: offset + whole.start()..offset + whole.end(),
                value_range: value.map(|v| offset + v.start()..offset + v.end()),
            })
        })
        .collect()
}

/// Decode the handful of entities the site generator emits.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

pub(crate) fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub(crate) fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
#[path = "tests/html_tests.rs"]
mod tests;
