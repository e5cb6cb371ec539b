//! `about:applications`: installed web apps with launch and delete actions.

use std::sync::Arc;

use chrono::{Local, TimeZone};

use super::{AboutConfig, Page, ABOUT_CSS};
use crate::services::output_encoding::{encode_for_html_attribute, encode_for_html_entity, markup_escape};
use crate::services::web_app_registry::WebAppRegistry;
use crate::types::request::MessageHandler;
use crate::types::web_app::WebApplication;

/// Locale date representation, as `strftime("%x")` gives it.
fn format_install_date(timestamp: i64) -> String {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|date| date.format("%x").to_string())
        .unwrap_or_default()
}

fn app_row(app: &WebApplication, icon_path: &str) -> String {
    format!(
        "<tbody><tr id=\"{id}\">\
         <td class=\"icon\"><img width=64 height=64 src=\"file://{icon}\"></img></td>\
         <td class=\"data\"><div class=\"appname\">{name}</div><div class=\"appurl\">{url}</div></td>\
         <td class=\"input\"><input type=\"button\" value=\"{launch}\" \
         onclick=\"const appRow = this.closest('tr'); launchWebApp(appRow.id, appRow.querySelector('.appname').innerText);\" \
         class=\"suggested-action\"></td>  \
         <td class=\"input\"><input type=\"button\" value=\"{delete}\" \
         onclick=\"const appRow = this.closest('tr'); deleteWebApp(appRow.id, appRow.querySelector('.appname').innerText);\" \
         class=\"destructive-action\"></td>\
         <td class=\"date\">{installed} <br /> {date}</td></tr></tbody>",
        id = encode_for_html_attribute(&app.id),
        icon = encode_for_html_attribute(icon_path),
        name = encode_for_html_entity(&app.name),
        url = encode_for_html_entity(&app.url),
        launch = markup_escape("Launch"),
        delete = markup_escape("Delete"),
        installed = markup_escape("Installed on:"),
        date = markup_escape(&format_install_date(app.install_date)),
    )
}

/// Table rows for every listable app. System apps are hidden and apps
/// without a reachable icon are skipped.
fn app_rows(apps: &[WebApplication], sandboxed: bool) -> Vec<String> {
    apps.iter()
        .filter(|app| !app.system)
        .filter_map(|app| match app.icon_path_for(sandboxed) {
            Some(icon) => Some(app_row(app, icon)),
            None => {
                tracing::warn!("Failed to get icon path for app {}", app.id);
                None
            }
        })
        .collect()
}

fn list_page(rows: &[String], page_id: u64) -> String {
    let title = markup_escape("Apps");
    let mut html = format!(
        "<html><head><title>{title}</title>\
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\
         <link href=\"{css}\" rel=\"stylesheet\" type=\"text/css\">\
         <script>\
         \x20 function launchWebApp(appID, appName) {{\
         \x20   window.webkit.messageHandlers.aboutApps.postMessage({{action: 'launch', app: appID, name: appName, page: {page_id}}});\
         \x20 }}\
         \x20 function deleteWebApp(appID, appName) {{\
         \x20   window.webkit.messageHandlers.aboutApps.postMessage({{action: 'remove', app: appID, name: appName, page: {page_id}}});\
         \x20 }}\
         </script>\
         </head><div id=\"applications\"><body class=\"applications-body\"><h1>{title}</h1>\
         <p>{subtitle}</p>",
        css = ABOUT_CSS,
        subtitle = markup_escape("List of installed web apps"),
    );
    html.push_str("<table>");
    for row in rows {
        html.push_str(row);
    }
    html.push_str("</table></div></body></html>");
    html
}

fn empty_page(config: &AboutConfig) -> String {
    let icon = config
        .apps_placeholder_icon_path
        .as_deref()
        .map(|p| encode_for_html_attribute(&p.to_string_lossy()))
        .unwrap_or_default();
    let title = markup_escape("Apps");
    format!(
        "<html><head><title>{title}</title>\
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\
         <link href=\"{css}\" rel=\"stylesheet\" type=\"text/css\">\
         </head><body class=\"applications-body\">\
         \x20 <div id=\"overview\" class=\"overview-empty\">\n\
         \x20   <img src=\"file://{icon}\"/>\n\
         \x20   <div><h1>{title}</h1></div>\n\
         \x20   <div><p>{hint}</p></div>\n\
         \x20 </div>\n\
         </body></html>\n",
        css = ABOUT_CSS,
        // Contains markup on purpose.
        hint = "You can add your favorite website by clicking <b>Install as Web App…</b> within the page menu.",
    )
}

/// Lists installed apps, or shows the empty state when none can be listed.
pub async fn applications_page(
    registry: Arc<dyn WebAppRegistry>,
    config: &AboutConfig,
    page_id: u64,
) -> Page {
    let apps = match tokio::task::spawn_blocking(move || registry.application_list()).await {
        Ok(Ok(apps)) => apps,
        Ok(Err(e)) => {
            tracing::warn!("Failed to list web applications: {}", e);
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Web application listing task failed: {}", e);
            Vec::new()
        }
    };

    let rows = app_rows(&apps, config.sandboxed);
    let html = if rows.is_empty() {
        empty_page(config)
    } else {
        list_page(&rows, page_id)
    };

    Page {
        html,
        message_handlers: vec![MessageHandler::AboutApps],
    }
}
