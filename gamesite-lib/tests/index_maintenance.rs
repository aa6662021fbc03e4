//! End-to-end runs of the index passes against a site on disk.

use std::fs;
use std::path::Path;

use gamesite_lib::{
    BrokenLinkPolicy, Document, IndexWrite, ScriptChange, Site, SiteConfig, refresh_filter_script,
    repair, sync_card_categories,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Free Games</title></head>
<body class="bg-game-dark">
  <!-- featured -->
  <section class="py-6 bg-game-card">
    <div class="featured-game">
      <img src="https://placehold.co/600x400?text=Ninja" alt="Ninja Run">
      <div class="featured-overlay">
        <h3>Ninja Run</h3>
        <a href="games/action/ninja_run.html" class="bg-game-accent">Play Now</a>
      </div>
    </div>
  </section>
  <div id="games-container" class="grid grid-cols-4">
    <div class="bg-game-card rounded" data-category="action">
      <a href="games/action/zombie_rush.html"><img src="z.png" alt="Zombie Rush"></a>
      <span class="absolute top-2 right-2">Action</span>
      <h3>Zombie Rush</h3>
    </div>
    <div class="bg-game-card rounded" data-category="puzzle">
      <a href="games/puzzle/bubble-pop.html"><img src="b.png" alt="Bubble Pop"></a>
      <span class="absolute top-2 right-2">Puzzle</span>
      <h3>Bubble Pop</h3>
    </div>
    <div class="bg-game-card rounded" data-category="action">
      <a href="games/sports/tennis_ace.html"><img src="t.png" alt="Tennis Ace"></a>
      <span class="absolute top-2 right-2">Action</span>
      <h3>Tennis Ace</h3>
    </div>
  </div>
  <button id="loadMoreBtn">Load More</button>
</body>
</html>
"#;

fn make_site() -> (tempfile::TempDir, Site) {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "index.html", INDEX);
    for page in [
        "games/action/zombie_rush.html",
        "games/action/ninja_run_deluxe.html",
        "games/puzzle/bubble_pop.html",
        "games/sports/tennis_ace.html",
    ] {
        write(dir.path(), page, "<html></html>");
    }
    let site = Site::new(dir.path(), SiteConfig::default());
    (dir, site)
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn repair_pass(site: &Site, seed: u64) -> (IndexWrite, usize) {
    let catalog = site.build_catalog();
    let page_size = site.config().page_size;
    let mut rng = StdRng::seed_from_u64(seed);
    site.edit_index(false, |doc| {
        let (doc, report) = repair(&doc, &catalog, BrokenLinkPolicy::Repair, &mut rng);
        let (doc, _) = refresh_filter_script(&doc, page_size);
        Ok((doc, report.repaired.len()))
    })
    .unwrap()
}

#[test]
fn repair_run_fixes_index_on_disk() {
    let (dir, site) = make_site();
    let (outcome, repaired) = repair_pass(&site, 5);
    assert_eq!(outcome, IndexWrite::Written);
    assert_eq!(repaired, 2);

    let html = fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains(r#"<a href="games/action/ninja_run_deluxe.html" class="bg-game-accent">"#));
    assert!(html.contains("<h3>Ninja Run Deluxe</h3>"));
    assert!(html.contains(r#"href="games/puzzle/bubble_pop.html""#));
    assert!(html.contains("const pageSize = 50;"));
    // untouched markup survives
    assert!(html.contains("<!-- featured -->"));
    assert!(html.contains(r#"<button id="loadMoreBtn">Load More</button>"#));
}

#[test]
fn second_run_changes_nothing() {
    let (dir, site) = make_site();
    repair_pass(&site, 5);
    let first = fs::read_to_string(dir.path().join("index.html")).unwrap();

    let (outcome, repaired) = repair_pass(&site, 12345);
    assert_eq!(outcome, IndexWrite::Unchanged);
    assert_eq!(repaired, 0);
    assert_eq!(fs::read_to_string(dir.path().join("index.html")).unwrap(), first);
}

#[test]
fn categories_follow_links_after_repair() {
    let (dir, site) = make_site();
    repair_pass(&site, 5);
    let (outcome, report) = site
        .edit_index(false, |doc| Ok(sync_card_categories(&doc, "games")))
        .unwrap();
    assert_eq!(outcome, IndexWrite::Written);
    assert_eq!(report.updated, 1);

    let html = fs::read_to_string(dir.path().join("index.html")).unwrap();
    let doc = Document::parse(&html);
    let tennis = doc
        .cards()
        .find(|c| c.title() == Some("Tennis Ace"))
        .unwrap();
    assert_eq!(tennis.category(), Some("sports"));
    assert_eq!(tennis.label(), Some("Sports & Racing"));
}

#[test]
fn parse_render_round_trip_on_real_page() {
    assert_eq!(Document::parse(INDEX).render(), INDEX);
    let (doc, change) = refresh_filter_script(&Document::parse(INDEX), 50);
    assert_eq!(change, ScriptChange::Inserted);
    let rendered = doc.render();
    assert_eq!(Document::parse(&rendered).render(), rendered);
}
