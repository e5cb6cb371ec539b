//! Unit tests for the BookmarkManager public API.

use pafari::database::Database;
use pafari::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use pafari::types::errors::BookmarkError;

fn setup() -> Database {
    Database::open_in_memory().expect("Failed to open in-memory database")
}

#[test]
fn test_add_bookmark_and_list_in_insertion_order() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    mgr.add_bookmark("https://rust-lang.org", "Rust").unwrap();
    mgr.add_bookmark("https://gnome.org", "GNOME").unwrap();
    mgr.add_bookmark("https://webkit.org", "WebKit").unwrap();

    let titles: Vec<String> = mgr
        .bookmarks_with_tag(None)
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(titles, vec!["Rust", "GNOME", "WebKit"]);
}

#[test]
fn test_duplicate_url_is_rejected() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    mgr.add_bookmark("https://example.com", "Example").unwrap();
    let err = mgr.add_bookmark("https://example.com", "Again").unwrap_err();
    assert!(matches!(err, BookmarkError::DuplicateUrl(url) if url == "https://example.com"));
}

#[test]
fn test_tags_filter_bookmarks() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    let rust = mgr.add_bookmark("https://rust-lang.org", "Rust").unwrap();
    let gnome = mgr.add_bookmark("https://gnome.org", "GNOME").unwrap();
    mgr.add_tag(&rust, "dev").unwrap();
    mgr.add_tag(&gnome, "desktop").unwrap();
    mgr.add_tag(&gnome, " dev ").unwrap();

    let dev = mgr.bookmarks_with_tag(Some("dev")).unwrap();
    assert_eq!(dev.len(), 2);

    let desktop = mgr.bookmarks_with_tag(Some("desktop")).unwrap();
    assert_eq!(desktop.len(), 1);
    assert_eq!(desktop[0].id, gnome);
    assert_eq!(desktop[0].tags, vec!["desktop".to_string(), "dev".to_string()]);

    mgr.remove_tag(&gnome, "dev").unwrap();
    assert_eq!(mgr.bookmarks_with_tag(Some("dev")).unwrap().len(), 1);
}

#[test]
fn test_adding_a_tag_twice_is_harmless() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    let id = mgr.add_bookmark("https://example.com", "Example").unwrap();
    mgr.add_tag(&id, "read-later").unwrap();
    mgr.add_tag(&id, "read-later").unwrap();

    let all = mgr.bookmarks_with_tag(None).unwrap();
    assert_eq!(all[0].tags, vec!["read-later".to_string()]);
}

#[test]
fn test_invalid_tag_and_missing_bookmark() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    let id = mgr.add_bookmark("https://example.com", "Example").unwrap();
    assert!(matches!(mgr.add_tag(&id, "   "), Err(BookmarkError::InvalidTag(_))));
    assert!(matches!(mgr.add_tag("missing", "dev"), Err(BookmarkError::NotFound(_))));
    assert!(matches!(mgr.remove_tag("missing", "dev"), Err(BookmarkError::NotFound(_))));
}

#[test]
fn test_remove_bookmark_drops_its_tags() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    let id = mgr.add_bookmark("https://example.com", "Example").unwrap();
    mgr.add_tag(&id, "dev").unwrap();
    mgr.remove_bookmark(&id).unwrap();

    assert!(mgr.bookmarks_with_tag(None).unwrap().is_empty());
    assert!(mgr.bookmarks_with_tag(Some("dev")).unwrap().is_empty());
    assert!(matches!(mgr.remove_bookmark(&id), Err(BookmarkError::NotFound(_))));
}

#[test]
fn test_empty_title_is_kept() {
    let db = setup();
    let mut mgr = BookmarkManager::new(db.connection());

    mgr.add_bookmark("https://untitled.example", "").unwrap();
    let bookmark = &mgr.bookmarks_with_tag(None).unwrap()[0];
    assert_eq!(bookmark.url(), Some("https://untitled.example"));
    assert_eq!(bookmark.title(), "");
}
