//! Snapshot Service for Pafari.
//!
//! Thumbnails of visited pages are cached as PNG files named after the
//! SHA-256 of the page URL. Pages without a thumbnail are queued for capture;
//! the host drains the queue, renders the page and hands the image back.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use ring::digest;
use tokio::sync::mpsc;

use crate::types::errors::SnapshotError;
use crate::types::history::HistoryUrl;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Snapshot lookups used while rendering the most-visited grid.
pub trait SnapshotService: Send + Sync {
    /// Path of the cached thumbnail for `url`, if one exists.
    fn lookup_cached_snapshot_path(&self, url: &str) -> Option<PathBuf>;
    /// Requests a thumbnail capture for a history entry lacking one.
    fn schedule_thumbnail_update(&self, url: &HistoryUrl);
}

/// Thumbnail cache on the local file system.
pub struct FileSnapshotService {
    dir: PathBuf,
    pending: Mutex<HashSet<String>>,
    updates: mpsc::UnboundedSender<String>,
}

impl FileSnapshotService {
    /// Creates the service and the receiving end of its capture queue.
    pub fn new(dir: impl Into<PathBuf>) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (updates, receiver) = mpsc::unbounded_channel();
        let service = Self {
            dir: dir.into(),
            pending: Mutex::new(HashSet::new()),
            updates,
        };
        (service, receiver)
    }

    /// Where the thumbnail for `url` lives, whether or not it exists yet.
    pub fn snapshot_path_for(&self, url: &str) -> PathBuf {
        let hash = digest::digest(&digest::SHA256, url.as_bytes());
        let name: String = hash
            .as_ref()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        self.dir.join(format!("{}.png", name))
    }

    /// Writes a captured thumbnail and clears its pending request.
    pub fn store_snapshot(&self, url: &str, png: &[u8]) -> Result<PathBuf, SnapshotError> {
        if !png.starts_with(PNG_SIGNATURE) {
            return Err(SnapshotError::InvalidImage(url.to_string()));
        }

        fs::create_dir_all(&self.dir)
            .map_err(|e| SnapshotError::IoError(format!("Failed to create cache directory: {}", e)))?;
        let path = self.snapshot_path_for(url);
        fs::write(&path, png)
            .map_err(|e| SnapshotError::IoError(format!("Failed to write snapshot: {}", e)))?;

        self.release(url);
        Ok(path)
    }

    /// Marks the capture request for `url` as handed over to the host. A
    /// later page load queues the URL again unless its thumbnail was stored.
    pub fn release(&self, url: &str) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.remove(url);
        }
    }
}

impl SnapshotService for FileSnapshotService {
    fn lookup_cached_snapshot_path(&self, url: &str) -> Option<PathBuf> {
        let path = self.snapshot_path_for(url);
        path.is_file().then_some(path)
    }

    fn schedule_thumbnail_update(&self, url: &HistoryUrl) {
        let mut pending = match self.pending.lock() {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!("snapshot queue unavailable: {}", e);
                return;
            }
        };
        if !pending.insert(url.url.clone()) {
            return;
        }
        if self.updates.send(url.url.clone()).is_err() {
            // Nobody is capturing thumbnails; allow a later retry.
            pending.remove(&url.url);
            tracing::debug!(url = %url.url, "thumbnail capture queue closed");
        }
    }
}
