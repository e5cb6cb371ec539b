// Pafari services
// Services feed the internal pages: history, bookmarks, web apps, tracking summary,
// snapshots, memory statistics, plus settings, user agent and output encoding.

pub mod bookmarks_provider;
pub mod history_service;
pub mod memory_report;
pub mod output_encoding;
pub mod settings_engine;
pub mod snapshot_service;
pub mod tracking_summary;
pub mod user_agent;
pub mod web_app_registry;
