// Pafari state managers
// Managers own the SQLite-backed stores: history, bookmarks, web apps, tracking observations.

pub mod bookmark_manager;
pub mod history_manager;
pub mod tracking_manager;
pub mod web_app_manager;
