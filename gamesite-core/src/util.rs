/// Title-case a string the way the site generator does.
///
/// A letter is upper-cased when the preceding character is not a letter and
/// lower-cased otherwise, so `"3d racer"` becomes `"3D Racer"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Display title for a slug: underscores become spaces, then title case.
pub fn slug_to_title(slug: &str) -> String {
    title_case(&slug.replace('_', " "))
}

/// Normalize an on-page display name for slug comparison.
///
/// Lower-cases and replaces spaces with underscores. Surrounding whitespace
/// is trimmed first.
pub fn normalize_display_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Normalize a file stem into a slug: hyphens become underscores, lower case.
pub fn normalize_slug(stem: &str) -> String {
    stem.replace('-', "_").to_lowercase()
}
