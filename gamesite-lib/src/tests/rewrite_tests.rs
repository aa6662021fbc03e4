use super::*;
use std::path::PathBuf;

use gamesite_core::GameKey;
use rand::SeedableRng;
use rand::rngs::StdRng;

const INDEX: &str = r#"<html><body>
<section class="py-6 bg-game-card">
  <div class="featured-game">
    <img src="f.jpg" alt="Lost Game">
    <div class="featured-overlay"><h3>Lost Game</h3><a href="games/action/lost_game.html">Play</a></div>
  </div>
</section>
<div id="games-container">
  <div class="bg-game-card" data-category="puzzle"><a href="games/puzzle/bubble_pop.html">x</a><span class="absolute top-2 right-2">Puzzle</span><h3>Bubble Pop</h3></div>
  <div class="bg-game-card" data-category="action"><a href="games/action/zombie-rush.html">x</a><span class="absolute top-2 right-2">Action</span><h3>Zombie Rush</h3></div>
  <div class="bg-game-card" data-category="idle"><a href="games/idle/gone_forever.html">x</a><span class="absolute top-2 right-2">Idle</span><h3>Qqqq</h3></div>
</div>
<section class="py-8 bg-gray-900"><h2>Popular Games</h2><p>soon</p></section>
</body></html>
"#;

fn catalog() -> Catalog {
    let mut catalog = Catalog::new("games", "html");
    for key in ["action/zombie_rush", "idle/cookie_tycoon", "puzzle/bubble_pop"] {
        let key: GameKey = key.parse().unwrap();
        catalog.insert(key.clone(), PathBuf::from(format!("games/{key}.html")));
    }
    catalog
}

#[test]
fn repair_fixes_broken_links_and_keeps_valid_ones() {
    let doc = Document::parse(INDEX);
    let mut rng = StdRng::seed_from_u64(7);
    let (fixed, report) = repair(&doc, &catalog(), BrokenLinkPolicy::Repair, &mut rng);

    assert_eq!(report.valid, 1);
    assert_eq!(report.repaired.len(), 3);
    assert!(report.removed.is_empty());

    // featured first
    assert_eq!(report.repaired[0].location, LinkLocation::Featured);

    let zombie = &report.repaired[1];
    assert_eq!(zombie.old_href, "games/action/zombie-rush.html");
    assert_eq!(zombie.replacement.new_href, "games/action/zombie_rush.html");

    let idle = &report.repaired[2];
    assert_eq!(idle.replacement.new_href, "games/idle/cookie_tycoon.html");

    let html = fixed.render();
    assert!(html.contains(r#"<a href="games/puzzle/bubble_pop.html">x</a>"#));
    assert!(html.contains("<h3>Cookie Tycoon</h3>"));
    assert!(!html.contains("gone_forever"));
}

#[test]
fn repair_is_idempotent() {
    let catalog = catalog();
    let doc = Document::parse(INDEX);
    let (once, _) = repair(&doc, &catalog, BrokenLinkPolicy::Repair, &mut StdRng::seed_from_u64(1));
    let (once, _) = refresh_filter_script(&once, 50);
    let first = once.render();

    let doc = Document::parse(&first);
    let (twice, report) = repair(&doc, &catalog, BrokenLinkPolicy::Repair, &mut StdRng::seed_from_u64(99));
    let (twice, change) = refresh_filter_script(&twice, 50);

    assert!(!report.has_changes());
    assert_eq!(change, ScriptChange::Unchanged);
    assert_eq!(twice.render(), first);
}

#[test]
fn prune_removes_exactly_broken_cards() {
    let doc = Document::parse(INDEX);
    let (pruned, report) = repair(&doc, &catalog(), BrokenLinkPolicy::Prune, &mut StdRng::seed_from_u64(0));

    let removed: Vec<&str> = report.removed.iter().map(|r| r.href.as_str()).collect();
    assert_eq!(
        removed,
        vec!["games/action/zombie-rush.html", "games/idle/gone_forever.html"]
    );
    assert!(report.repaired.is_empty());
    assert_eq!(pruned.cards().count(), 1);
    // featured slots are not pruned
    assert_eq!(pruned.featured().count(), 1);
    assert!(pruned.render().contains("games/action/lost_game.html"));
}

#[test]
fn empty_catalog_removes_cards_but_keeps_featured() {
    let doc = Document::parse(INDEX);
    let empty = Catalog::new("games", "html");
    let (fixed, report) = repair(&doc, &empty, BrokenLinkPolicy::Repair, &mut StdRng::seed_from_u64(0));

    assert_eq!(report.removed.len(), 3);
    assert_eq!(report.unrepairable, vec!["games/action/lost_game.html".to_string()]);
    assert_eq!(fixed.cards().count(), 0);
    assert_eq!(fixed.featured().count(), 1);
}

#[test]
fn repair_featured_leaves_cards_alone() {
    let doc = Document::parse(INDEX);
    let (fixed, report) = repair_featured(&doc, &catalog(), &mut StdRng::seed_from_u64(3));

    assert_eq!(report.repaired.len(), 1);
    let slot = fixed.featured().next().unwrap();
    assert_eq!(slot.link(), Some(report.repaired[0].replacement.new_href.as_str()));
    assert_eq!(slot.image_alt(), slot.title());
    assert!(fixed.render().contains("games/idle/gone_forever.html"));
}

#[test]
fn sync_sets_category_from_href() {
    let html = r#"<div id="games-container"><div class="bg-game-card" data-category="action"><a href="games/sports/tennis_ace.html">x</a><span class="absolute top-2 right-2">Action</span></div><div class="bg-game-card"><a href="games/puzzle/x.html">x</a></div><div class="bg-game-card"><a href="about.html">x</a></div></div>"#;
    let doc = Document::parse(html);
    let (synced, report) = sync_card_categories(&doc, "games");

    assert_eq!(report.updated, 2);
    assert_eq!(report.skipped, 1);
    let cards: Vec<_> = synced.cards().collect();
    assert_eq!(cards[0].category(), Some("sports"));
    assert_eq!(cards[0].label(), Some("Sports & Racing"));
    assert_eq!(cards[1].category(), Some("puzzle"));

    let (_, again) = sync_card_categories(&synced, "games");
    assert_eq!(again.updated, 0);
    assert_eq!(again.unchanged, 2);
}

#[test]
fn category_labels() {
    assert_eq!(category_label("strategy"), "Strategy & Defense");
    assert_eq!(category_label("idle"), "Idle");
    assert_eq!(category_label("retro_games"), "Retro_Games");
}

#[test]
fn refresh_inserts_script_before_body_close() {
    let doc = Document::parse("<html><body><p>x</p></body></html>");
    let (doc, change) = refresh_filter_script(&doc, 12);
    assert_eq!(change, ScriptChange::Inserted);

    let html = doc.render();
    let script_at = html.find("<script>").unwrap();
    assert!(script_at < html.find("</body>").unwrap());
    assert!(html.contains("const pageSize = 12;"));
}

#[test]
fn refresh_is_stable_when_a_card_carries_a_script() {
    let html = r#"<html><body><div id="games-container"><div class="bg-game-card"><a href="games/puzzle/a.html">a</a><script>document.querySelectorAll('.category-link');</script></div></div></body></html>"#;
    let (first, change) = refresh_filter_script(&Document::parse(html), 50);
    assert_eq!(change, ScriptChange::Inserted);
    let once = first.render();

    let (second, change) = refresh_filter_script(&Document::parse(&once), 50);
    assert_eq!(change, ScriptChange::Unchanged);
    let twice = second.render();
    assert_eq!(once, twice);
    assert_eq!(twice.matches("<script>").count(), 2);
}

#[test]
fn refresh_replaces_existing_body_only() {
    let html = r#"<body><script type="text/javascript">function filterGamesByCategory() {}</script></body>"#;
    let (doc, change) = refresh_filter_script(&Document::parse(html), 50);
    assert_eq!(change, ScriptChange::Replaced);
    let out = doc.render();
    assert!(out.starts_with(r#"<body><script type="text/javascript">"#));
    assert!(!out.contains("function filterGamesByCategory"));
}

#[test]
fn refresh_appends_without_body() {
    let (doc, change) = refresh_filter_script(&Document::parse("<div>fragment</div>"), 50);
    assert_eq!(change, ScriptChange::Inserted);
    assert!(doc.render().starts_with("<div>fragment</div><script>"));
}

#[test]
fn remove_popular_section_once() {
    let doc = Document::parse(INDEX);
    let (doc, removed) = remove_popular_section(&doc);
    assert!(removed);
    assert!(!doc.render().contains("Popular Games"));

    let (_, removed) = remove_popular_section(&doc);
    assert!(!removed);
}
