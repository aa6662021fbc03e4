use super::*;
use std::fs;

fn make_tree(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for rel in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "<html></html>").unwrap();
    }
    dir
}

#[test]
fn builds_keys_from_category_folders() {
    let dir = make_tree(&[
        "games/action/ninja_run_2.html",
        "games/puzzle/bubble_pop.html",
        "games/puzzle/match_three.html",
    ]);
    let catalog = build_catalog(&dir.path().join("games"), "html");

    assert_eq!(catalog.len(), 3);
    let keys: Vec<String> = catalog.entries().map(|e| e.key.to_string()).collect();
    assert_eq!(
        keys,
        vec!["action/ninja_run_2", "puzzle/bubble_pop", "puzzle/match_three"]
    );
    for entry in catalog.entries() {
        assert!(entry.file_path.is_file());
    }
}

#[test]
fn skips_root_level_and_deeply_nested_files() {
    let dir = make_tree(&[
        "games/stray.html",
        "games/action/old/archived.html",
        "games/action/zombie_rush.html",
    ]);
    let catalog = build_catalog(&dir.path().join("games"), "html");

    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains(&GameKey::new("action", "zombie_rush")));
    assert!(catalog.categories().iter().all(|c| *c != "games"));
}

#[test]
fn ignores_other_extensions() {
    let dir = make_tree(&["games/action/notes.txt", "games/action/thumb.jpg"]);
    let catalog = build_catalog(&dir.path().join("games"), "html");
    assert!(catalog.is_empty());
}

#[test]
fn missing_root_gives_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = build_catalog(&dir.path().join("games"), "html");
    assert!(catalog.is_empty());
    assert_eq!(catalog.games_dir(), "games");
}

#[test]
fn href_round_trip() {
    let catalog = Catalog::new("games", "html");
    let key = GameKey::new("sports", "soccer_stars");
    let href = catalog.href_for(&key);
    assert_eq!(href, "games/sports/soccer_stars.html");
    assert_eq!(catalog.key_for_href(&href), Some(key));
}

#[test]
fn key_for_href_tolerates_prefix_and_fragment() {
    let catalog = Catalog::new("games", "html");
    assert_eq!(
        catalog.key_for_href("./games/idle/cookie_tycoon.html#play"),
        Some(GameKey::new("idle", "cookie_tycoon"))
    );
}

#[test]
fn key_for_href_rejects_other_shapes() {
    let catalog = Catalog::new("games", "html");
    assert_eq!(catalog.key_for_href("about.html"), None);
    assert_eq!(catalog.key_for_href("Action/ninja.html"), None);
    assert_eq!(catalog.key_for_href("games/action/ninja.htm"), None);
    assert_eq!(catalog.key_for_href("games/action/sub/ninja.html"), None);
    assert_eq!(catalog.key_for_href("games/action/.html"), None);
}

#[test]
fn resolve_href_only_finds_existing_pages() {
    let dir = make_tree(&["games/puzzle/bubble_pop.html"]);
    let catalog = build_catalog(&dir.path().join("games"), "html");
    assert!(catalog.resolve_href("games/puzzle/bubble_pop.html").is_some());
    assert!(catalog.resolve_href("games/puzzle/missing.html").is_none());
}

#[test]
fn in_category_filters_exactly() {
    let mut catalog = Catalog::new("games", "html");
    catalog.insert(GameKey::new("action", "a"), PathBuf::from("a"));
    catalog.insert(GameKey::new("actionx", "b"), PathBuf::from("b"));
    let slugs: Vec<&str> = catalog
        .in_category("action")
        .map(|e| e.key.slug.as_str())
        .collect();
    assert_eq!(slugs, vec!["a"]);
}
