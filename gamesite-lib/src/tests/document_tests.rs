use super::*;

const INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><title>Games</title></head>
<body>
<section class="py-6 bg-game-card">
  <div class="featured-game relative">
    <img src="img/ninja.jpg" alt="Ninja Run">
    <div class="featured-overlay">
      <h3>Ninja Run</h3>
      <a href="games/action/ninja_run.html" class="btn">Play</a>
    </div>
  </div>
</section>
<div id="games-container" class="grid">
  <div class="bg-game-card relative" data-category="puzzle">
    <a href="games/puzzle/bubble_pop.html"><img src="b.png" alt="Bubble Pop"></a>
    <span class="absolute top-2 right-2 badge">Puzzle</span>
    <h3>Bubble Pop</h3>
  </div>
  <div class="bg-game-card relative" data-category="action">
    <a href="games/action/zombie_rush.html">Zombie</a>
    <span class="absolute top-2 right-2">Action</span>
    <h3>Zombie Rush</h3>
  </div>
</div>
<section class="py-8 bg-gray-900">
  <h2 class="text-2xl">Popular Games</h2>
  <div class="bg-game-card"><a href="games/idle/x.html">X</a></div>
</section>
<script src="vendor.js"></script>
<script>
  document.querySelectorAll('.category-link').forEach(l => l.remove());
</script>
</body>
</html>
"#;

#[test]
fn parse_then_render_is_identity() {
    let doc = Document::parse(INDEX);
    assert_eq!(doc.render(), INDEX);
}

#[test]
fn render_identity_without_known_sections() {
    let html = "<html><body><p>Nothing here &amp; no games</p></body></html>";
    let doc = Document::parse(html);
    assert_eq!(doc.sections().len(), 1);
    assert_eq!(doc.render(), html);
}

#[test]
fn finds_cards_in_order() {
    let doc = Document::parse(INDEX);
    let cards: Vec<&GameCard> = doc.cards().collect();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].link(), Some("games/puzzle/bubble_pop.html"));
    assert_eq!(cards[0].title(), Some("Bubble Pop"));
    assert_eq!(cards[0].category(), Some("puzzle"));
    assert_eq!(cards[0].label(), Some("Puzzle"));
    assert_eq!(cards[1].title(), Some("Zombie Rush"));
}

#[test]
fn popular_cards_are_not_grid_cards() {
    let doc = Document::parse(INDEX);
    assert!(doc.cards().all(|c| c.link() != Some("games/idle/x.html")));
    assert!(doc.has_popular_section());
}

#[test]
fn finds_featured_slot_play_link() {
    let doc = Document::parse(INDEX);
    let slots: Vec<&FeaturedSlot> = doc.featured().collect();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].link(), Some("games/action/ninja_run.html"));
    assert_eq!(slots[0].title(), Some("Ninja Run"));
    assert_eq!(slots[0].image_alt(), Some("Ninja Run"));
}

#[test]
fn featured_without_overlay_uses_first_anchor() {
    let slot = FeaturedSlot::from_markup(
        r#"<div class="featured-game"><a href="games/idle/a.html"><h3>A</h3></a></div>"#,
    );
    assert_eq!(slot.link(), Some("games/idle/a.html"));
    assert_eq!(slot.image_alt(), None);
}

#[test]
fn filter_script_skips_external_scripts() {
    let doc = Document::parse(INDEX);
    let script = doc.filter_script().unwrap();
    assert_eq!(script.open_tag, "<script>");
    assert!(script.body.contains(".category-link"));
    assert_eq!(script.close_tag, "</script>");
}

#[test]
fn filter_script_inside_a_card_is_not_the_page_script() {
    let html = r#"<body><div id="games-container"><div class="bg-game-card"><a href="games/puzzle/a.html">a</a><script>document.querySelectorAll('.category-link');</script></div></div>
<script>function filterGamesByCategory() {}</script></body>"#;
    let doc = Document::parse(html);
    assert_eq!(doc.cards().count(), 1);
    let script = doc.filter_script().unwrap();
    assert!(script.body.contains("filterGamesByCategory"));
    assert_eq!(doc.render(), html);
}

#[test]
fn popular_heading_must_match() {
    let html = r#"<section class="py-8 bg-gray-900"><h2>New Games</h2></section>"#;
    assert!(!Document::parse(html).has_popular_section());
}

#[test]
fn card_with_link_updates_href_and_title() {
    let card = GameCard::from_markup(
        r#"<div class="bg-game-card"><a href="games/action/gone.html"><img alt="x"></a><h3>Gone</h3><a href="games/action/gone.html">Play</a></div>"#,
    );
    let card = card.with_link("games/action/zombie_rush.html", "Zombie Rush");
    assert_eq!(
        card.markup(),
        r#"<div class="bg-game-card"><a href="games/action/zombie_rush.html"><img alt="x"></a><h3>Zombie Rush</h3><a href="games/action/zombie_rush.html">Play</a></div>"#
    );
    assert_eq!(card.link(), Some("games/action/zombie_rush.html"));
    assert_eq!(card.title(), Some("Zombie Rush"));
}

#[test]
fn card_with_category_touches_only_changed_parts() {
    let markup = r#"<div class="bg-game-card" data-category="action"><span class="absolute top-2 right-2">Action</span></div>"#;
    let card = GameCard::from_markup(markup);
    assert_eq!(card.with_category("action", "Action").markup(), markup);

    let moved = card.with_category("sports", "Sports & Racing");
    assert_eq!(
        moved.markup(),
        r#"<div class="bg-game-card" data-category="sports"><span class="absolute top-2 right-2">Sports &amp; Racing</span></div>"#
    );
    assert_eq!(moved.label(), Some("Sports & Racing"));
}

#[test]
fn card_with_category_adds_missing_attribute() {
    let card = GameCard::from_markup(r#"<div class="bg-game-card"><h3>A</h3></div>"#);
    let card = card.with_category("idle", "Idle");
    assert_eq!(card.category(), Some("idle"));
    assert_eq!(
        card.markup(),
        r#"<div class="bg-game-card" data-category="idle"><h3>A</h3></div>"#
    );
}

#[test]
fn featured_with_link_updates_alt() {
    let doc = Document::parse(INDEX);
    let slot = doc.featured().next().unwrap();
    let slot = slot.with_link("games/action/zombie_rush.html", "Zombie Rush");
    assert_eq!(slot.link(), Some("games/action/zombie_rush.html"));
    assert_eq!(slot.title(), Some("Zombie Rush"));
    assert_eq!(slot.image_alt(), Some("Zombie Rush"));
    assert!(slot.markup().contains(r#"<img src="img/ninja.jpg" alt="Zombie Rush">"#));
}
