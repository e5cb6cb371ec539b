//! RPC method handler for the Pafari host protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be tested without stdio.
//! `handle_method` dispatches a call to the managers, the settings engine or
//! the `about:` handler owned by [`App`].

use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;
use serde_json::{json, Value};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use uuid::Uuid;

use crate::app::App;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::managers::tracking_manager::{TrackingManager, TrackingManagerTrait};
use crate::managers::web_app_manager::{WebAppManager, WebAppManagerTrait};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::web_app::WebApplication;

/// Encode bytes to base64 string.
pub fn base64_encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Decode base64 string to bytes.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, String> {
    BASE64.decode(input).map_err(|e| format!("base64 decode error: {}", e))
}

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn opt_str_param(params: &Value, key: &str) -> Option<String> {
    params.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn bool_param(params: &Value, key: &str, default: bool) -> bool {
    params.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
}

fn check_web_url(url: &str) -> Result<(), String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err("invalid url: must start with http:// or https://".to_string())
    }
}

/// Runs `f` on the connection under the database lock.
fn with_connection<R>(
    app: &App,
    f: impl FnOnce(&Connection) -> Result<R, String>,
) -> Result<R, String> {
    let db = app.db.lock().map_err(|e| e.to_string())?;
    f(db.connection())
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Internal pages ───
        "about.request" => {
            let path = params.get("path").and_then(|v| v.as_str()).unwrap_or("");
            let page_id = params.get("page_id").and_then(|v| v.as_u64()).unwrap_or(0);
            let response = app.about_handler().render(path, page_id).await;
            let handlers: Vec<&str> = response.message_handlers.iter().map(|h| h.name()).collect();
            Ok(json!({
                "mime": response.mime_type,
                "length": response.length,
                "body": base64_encode(&response.body),
                "message_handlers": handlers,
            }))
        }
        "user_agent.get" => Ok(json!({"user_agent": app.user_agent().as_str()})),

        // ─── Settings ───
        "settings.get" => {
            let settings = app.settings.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(settings.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            {
                let mut settings = app.settings.lock().map_err(|e| e.to_string())?;
                settings.set_value(key, value).map_err(|e| e.to_string())?;
            }
            app.refresh_about()?;
            Ok(json!({"ok": true}))
        }

        // ─── History ───
        "history.record" => {
            let url = str_param(params, "url")?;
            let title = str_param(params, "title")?;
            check_web_url(url)?;
            let recording = app.history_recording_enabled();
            let id = with_connection(app, |conn| {
                let mut mgr = HistoryManager::new(conn);
                mgr.set_recording_enabled(recording);
                mgr.record_visit(url, title).map_err(|e| e.to_string())
            })?;
            Ok(json!({"id": id}))
        }
        "history.hide" => {
            let url = str_param(params, "url")?;
            let hidden = bool_param(params, "hidden", true);
            with_connection(app, |conn| {
                HistoryManager::new(conn)
                    .set_hidden(url, hidden)
                    .map_err(|e| e.to_string())
            })?;
            Ok(json!({"ok": true}))
        }
        "history.get" => {
            let url = str_param(params, "url")?;
            let entry = with_connection(app, |conn| {
                HistoryManager::new(conn).get_url(url).map_err(|e| e.to_string())
            })?;
            serde_json::to_value(entry).map_err(|e| e.to_string())
        }
        "history.delete" => {
            let url = str_param(params, "url")?;
            with_connection(app, |conn| {
                HistoryManager::new(conn)
                    .delete_url(url)
                    .map_err(|e| e.to_string())
            })?;
            Ok(json!({"ok": true}))
        }
        "history.clear" => {
            with_connection(app, |conn| {
                HistoryManager::new(conn).clear_all().map_err(|e| e.to_string())
            })?;
            Ok(json!({"ok": true}))
        }

        // ─── Bookmarks ───
        "bookmark.add" => {
            let url = str_param(params, "url")?;
            let title = str_param(params, "title")?;
            check_web_url(url)?;
            let id = with_connection(app, |conn| {
                BookmarkManager::new(conn)
                    .add_bookmark(url, title)
                    .map_err(|e| e.to_string())
            })?;
            Ok(json!({"id": id, "url": url, "title": title}))
        }
        "bookmark.tag" => {
            let id = str_param(params, "id")?;
            let tag = str_param(params, "tag")?;
            let remove = bool_param(params, "remove", false);
            with_connection(app, |conn| {
                let mut mgr = BookmarkManager::new(conn);
                let result = if remove {
                    mgr.remove_tag(id, tag)
                } else {
                    mgr.add_tag(id, tag)
                };
                result.map_err(|e| e.to_string())
            })?;
            Ok(json!({"ok": true}))
        }

        "bookmark.remove" => {
            let id = str_param(params, "id")?;
            with_connection(app, |conn| {
                BookmarkManager::new(conn)
                    .remove_bookmark(id)
                    .map_err(|e| e.to_string())
            })?;
            Ok(json!({"ok": true}))
        }

        // ─── Web apps ───
        "webapp.install" => {
            let name = str_param(params, "name")?;
            let url = str_param(params, "url")?;
            check_web_url(url)?;
            let web_app = WebApplication {
                id: opt_str_param(params, "id").unwrap_or_else(|| Uuid::new_v4().to_string()),
                name: name.to_string(),
                url: url.to_string(),
                icon_path: opt_str_param(params, "icon_path"),
                tmp_icon_path: opt_str_param(params, "tmp_icon_path"),
                install_date: params
                    .get("install_date")
                    .and_then(|v| v.as_i64())
                    .unwrap_or_else(now),
                system: bool_param(params, "system", false),
            };
            with_connection(app, |conn| {
                WebAppManager::new(conn)
                    .install(&web_app)
                    .map_err(|e| e.to_string())
            })?;
            Ok(json!({"id": web_app.id}))
        }
        "webapp.remove" => {
            let id = str_param(params, "id")?;
            with_connection(app, |conn| {
                WebAppManager::new(conn).remove(id).map_err(|e| e.to_string())
            })?;
            Ok(json!({"ok": true}))
        }

        // ─── Tracking prevention ───
        "tracking.record" => {
            let first_party = str_param(params, "first_party")?;
            let third_party = str_param(params, "third_party")?;
            let allowed = bool_param(params, "allowed", false);
            with_connection(app, |conn| {
                TrackingManager::new(conn)
                    .record_observation(first_party, third_party, allowed)
                    .map_err(|e| e.to_string())
            })?;
            Ok(json!({"ok": true}))
        }

        // ─── Snapshots ───
        "snapshot.store" => {
            let url = str_param(params, "url")?;
            let png = base64_decode(str_param(params, "png")?)?;
            let path = app
                .snapshots
                .store_snapshot(url, &png)
                .map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }
        "snapshot.pending" => Ok(json!(app.drain_snapshot_requests())),

        _ => Err(format!("unknown method: {}", method)),
    }
}
