use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamesite_lib::Site;
use gamesite_lib::util::normalize_slug;

/// Print the category for each slug. File names are accepted too; the
/// extension is dropped and the stem normalized.
pub(crate) fn run_classify(site: &Site, inputs: &[String]) {
    let classifier = site.config().classifier.build();
    for input in inputs {
        let stem = Path::new(input)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(input);
        let slug = normalize_slug(stem);
        let category = classifier.classify(&slug);
        log::info!(
            "  {:<32} {} {} {}",
            slug,
            "\u{2192}".if_supports_color(Stdout, |t| t.green()),
            category.short_name().if_supports_color(Stdout, |t| t.bold()),
            format!("({})", category.display_name()).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
