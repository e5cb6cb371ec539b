use std::fmt;

// === BookmarkError ===

/// Errors related to bookmark management operations.
#[derive(Debug)]
pub enum BookmarkError {
    /// Bookmark with the given ID was not found.
    NotFound(String),
    /// A bookmark with the same URL already exists.
    DuplicateUrl(String),
    /// The tag name is empty or otherwise unusable.
    InvalidTag(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            BookmarkError::DuplicateUrl(url) => write!(f, "Duplicate bookmark URL: {}", url),
            BookmarkError::InvalidTag(tag) => write!(f, "Invalid bookmark tag: {:?}", tag),
            BookmarkError::DatabaseError(msg) => {
                write!(f, "Bookmark database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for BookmarkError {}

// === HistoryError ===

/// Errors related to browsing history operations.
#[derive(Debug)]
pub enum HistoryError {
    /// History entry for the given URL was not found.
    NotFound(String),
    /// Database operation failed.
    DatabaseError(String),
    /// The background query task did not complete.
    TaskFailed(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NotFound(url) => write!(f, "History entry not found: {}", url),
            HistoryError::DatabaseError(msg) => write!(f, "History database error: {}", msg),
            HistoryError::TaskFailed(msg) => write!(f, "History query task failed: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {}

// === WebAppError ===

/// Errors related to the installed web application registry.
#[derive(Debug)]
pub enum WebAppError {
    /// No application with the given ID is installed.
    NotFound(String),
    /// An application with the given ID is already installed.
    AlreadyInstalled(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for WebAppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebAppError::NotFound(id) => write!(f, "Web app not found: {}", id),
            WebAppError::AlreadyInstalled(id) => write!(f, "Web app already installed: {}", id),
            WebAppError::DatabaseError(msg) => write!(f, "Web app database error: {}", msg),
        }
    }
}

impl std::error::Error for WebAppError {}

// === TrackingError ===

/// Errors related to tracking prevention data.
#[derive(Debug)]
pub enum TrackingError {
    /// A domain was empty or malformed.
    InvalidDomain(String),
    /// Database operation failed.
    DatabaseError(String),
    /// The summary could not be fetched.
    Unavailable(String),
}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingError::InvalidDomain(d) => write!(f, "Invalid domain: {:?}", d),
            TrackingError::DatabaseError(msg) => write!(f, "Tracking database error: {}", msg),
            TrackingError::Unavailable(msg) => {
                write!(f, "Tracking summary unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for TrackingError {}

// === SnapshotError ===

/// Errors related to the page snapshot cache.
#[derive(Debug)]
pub enum SnapshotError {
    /// An I/O error occurred while reading or writing a snapshot.
    IoError(String),
    /// The snapshot data is not a PNG image.
    InvalidImage(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::IoError(msg) => write!(f, "Snapshot I/O error: {}", msg),
            SnapshotError::InvalidImage(url) => write!(f, "Invalid snapshot image for {}", url),
        }
    }
}

impl std::error::Error for SnapshotError {}

// === MemoryError ===

/// Errors related to collecting memory statistics.
#[derive(Debug)]
pub enum MemoryError {
    /// The smaps file could not be read.
    IoError(String),
    /// A line of the smaps file could not be parsed.
    ParseError(String),
    /// The background collection task did not complete.
    TaskFailed(String),
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::IoError(msg) => write!(f, "Memory statistics I/O error: {}", msg),
            MemoryError::ParseError(msg) => write!(f, "Malformed smaps data: {}", msg),
            MemoryError::TaskFailed(msg) => write!(f, "Memory statistics task failed: {}", msg),
        }
    }
}

impl std::error::Error for MemoryError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
