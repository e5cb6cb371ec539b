use pafari::types::errors::*;

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::NotFound("bk-1".to_string()).to_string(),
        "Bookmark not found: bk-1"
    );
    assert_eq!(
        BookmarkError::DuplicateUrl("https://example.com".to_string()).to_string(),
        "Duplicate bookmark URL: https://example.com"
    );
    assert_eq!(
        BookmarkError::InvalidTag("  ".to_string()).to_string(),
        "Invalid bookmark tag: \"  \""
    );
    assert_eq!(
        BookmarkError::DatabaseError("locked".to_string()).to_string(),
        "Bookmark database error: locked"
    );
}

#[test]
fn bookmark_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(BookmarkError::NotFound("id".to_string()));
    assert!(err.source().is_none());
}

// === HistoryError Tests ===

#[test]
fn history_error_display_variants() {
    assert_eq!(
        HistoryError::NotFound("https://a.com".to_string()).to_string(),
        "History entry not found: https://a.com"
    );
    assert_eq!(
        HistoryError::DatabaseError("disk full".to_string()).to_string(),
        "History database error: disk full"
    );
    assert_eq!(
        HistoryError::TaskFailed("panicked".to_string()).to_string(),
        "History query task failed: panicked"
    );
}

// === WebAppError Tests ===

#[test]
fn web_app_error_display_variants() {
    assert_eq!(
        WebAppError::NotFound("app-1".to_string()).to_string(),
        "Web app not found: app-1"
    );
    assert_eq!(
        WebAppError::AlreadyInstalled("app-1".to_string()).to_string(),
        "Web app already installed: app-1"
    );
    assert_eq!(
        WebAppError::DatabaseError("x".to_string()).to_string(),
        "Web app database error: x"
    );
}

// === TrackingError Tests ===

#[test]
fn tracking_error_display_variants() {
    assert_eq!(
        TrackingError::InvalidDomain("".to_string()).to_string(),
        "Invalid domain: \"\""
    );
    assert_eq!(
        TrackingError::DatabaseError("x".to_string()).to_string(),
        "Tracking database error: x"
    );
    assert_eq!(
        TrackingError::Unavailable("network process gone".to_string()).to_string(),
        "Tracking summary unavailable: network process gone"
    );
}

// === SnapshotError / MemoryError Tests ===

#[test]
fn snapshot_error_display_variants() {
    assert_eq!(
        SnapshotError::IoError("denied".to_string()).to_string(),
        "Snapshot I/O error: denied"
    );
    assert_eq!(
        SnapshotError::InvalidImage("https://a.com".to_string()).to_string(),
        "Invalid snapshot image for https://a.com"
    );
}

#[test]
fn memory_error_display_variants() {
    assert_eq!(
        MemoryError::IoError("no /proc".to_string()).to_string(),
        "Memory statistics I/O error: no /proc"
    );
    assert_eq!(
        MemoryError::ParseError("line 3".to_string()).to_string(),
        "Malformed smaps data: line 3"
    );
    assert_eq!(
        MemoryError::TaskFailed("cancelled".to_string()).to_string(),
        "Memory statistics task failed: cancelled"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("read only".to_string()).to_string(),
        "Settings I/O error: read only"
    );
    assert_eq!(
        SettingsError::SerializationError("eof".to_string()).to_string(),
        "Settings serialization error: eof"
    );
    assert_eq!(
        SettingsError::InvalidKey("web.nope".to_string()).to_string(),
        "Invalid settings key: web.nope"
    );
    assert_eq!(
        SettingsError::InvalidValue("expected string".to_string()).to_string(),
        "Invalid settings value: expected string"
    );
}

#[test]
fn all_errors_are_debug() {
    let errors: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(HistoryError::NotFound("u".into())),
        Box::new(WebAppError::NotFound("a".into())),
        Box::new(TrackingError::Unavailable("t".into())),
        Box::new(SnapshotError::IoError("s".into())),
        Box::new(MemoryError::ParseError("m".into())),
        Box::new(SettingsError::InvalidKey("k".into())),
    ];
    for err in errors {
        assert!(!format!("{:?}", err).is_empty());
    }
}
