//! `about:overview`, the start page.
//!
//! Four sections: favorites from settings, the privacy report card, all
//! bookmarks, and, when history has anything to offer, the most-visited grid.
//! The history query, the tracking summary and the bookmark read (on the
//! blocking pool) are awaited together.

use std::sync::Arc;

use super::{AboutConfig, AboutServices, Page, ABOUT_CSS, NEW_TAB_PAGE_TITLE};
use crate::services::output_encoding::{encode_for_html_attribute, encode_for_html_entity, markup_escape};
use crate::services::snapshot_service::SnapshotService;
use crate::services::tracking_summary::{fetch_summary, DisplayList, PrivacyReport};
use crate::types::bookmark::Bookmark;
use crate::types::history::{HistoryQuery, HistoryUrl};
use crate::types::request::MessageHandler;
use crate::types::settings::Favorite;

const SHIELD_ICON: &str = "<svg class=\"privacy-report-shield\" width=\"64\" height=\"64\" \
    viewBox=\"0 0 16 16\" xmlns=\"http://www.w3.org/2000/svg\"><g fill=\"currentColor\">\
    <path d=\"m 8 0 l -8 2.3 v 5.5 c 0 2.2 1.2 4.3 3.1 5.4 l 4.9 2.8 l 4.9 -2.8 \
    c 1.9 -1.1 3.1 -3.1 3.1 -5.4 v -5.5 z m 3.5 5.7 l -4 4 l -2 -2 l 1 -1 l 1 1 l 3 -3 z\"/>\
    </g></svg>";

const CLOSE_SCRIPT: &str = "  <script>\n\
    \x20   document.addEventListener('DOMContentLoaded', function() {\n\
    \x20     document.addEventListener('click', function(e) {\n\
    \x20       if (e.target && e.target.classList.contains('overview-close-button')) {\n\
    \x20         e.preventDefault();\n\
    \x20         e.stopPropagation();\n\
    \x20         var item = e.target.closest('.overview-item');\n\
    \x20         if (item && item.href && window.webkit && window.webkit.messageHandlers && window.webkit.messageHandlers.overview) {\n\
    \x20           window.webkit.messageHandlers.overview.postMessage(item.href);\n\
    \x20           item.classList.add('overview-removed');\n\
    \x20           setTimeout(function() { if (item.parentNode) item.parentNode.removeChild(item); }, 250);\n\
    \x20         }\n\
    \x20         return false;\n\
    \x20       }\n\
    \x20     }, true);\n\
    \x20   });\n\
    \x20 </script>\n";

/// Language code without region or modifier: `pt_BR.UTF-8` becomes `pt`.
fn base_language(language: &str) -> &str {
    language.split(['_', '-', '@', '.']).next().unwrap_or_default()
}

fn favorite_item(favorite: &Favorite) -> String {
    let url = encode_for_html_attribute(&favorite.url);
    format!(
        "<a class=\"overview-item\" title=\"{title}\" href=\"{url}\">\
         \x20 <iframe class=\"overview-thumbnail\" src=\"{url}\" loading=\"lazy\" \
         sandbox=\"allow-same-origin allow-scripts\"></iframe>\
         \x20 <span class=\"overview-title\">{label}</span>\
         </a>",
        title = encode_for_html_attribute(&favorite.title),
        label = encode_for_html_entity(&favorite.title),
    )
}

/// Bookmarks without a URL are left out.
fn bookmark_item(bookmark: &Bookmark) -> Option<String> {
    let url = bookmark.url()?;
    let title = bookmark.title();
    Some(format!(
        "<a class=\"overview-item\" title=\"{}\" href=\"{}\">\
         \x20 <span class=\"overview-thumbnail\"></span>\
         \x20 <span class=\"overview-title\">{}</span>\
         </a>",
        encode_for_html_attribute(title),
        encode_for_html_attribute(url),
        encode_for_html_entity(title),
    ))
}

/// A most-visited tile. Queues a capture when no thumbnail is cached.
fn most_visited_item(url: &HistoryUrl, snapshots: &dyn SnapshotService) -> String {
    let thumbnail_style = match snapshots.lookup_cached_snapshot_path(&url.url) {
        Some(path) => format!(
            " style=\"background: url(file://{}) no-repeat; background-size: 100%;\"",
            encode_for_html_attribute(&path.to_string_lossy())
        ),
        None => {
            snapshots.schedule_thumbnail_update(url);
            String::new()
        }
    };

    format!(
        "<a class=\"overview-item\" title=\"{title}\" href=\"{href}\">\
         \x20 <div class=\"overview-close-button\" title=\"{close}\"></div>\
         \x20 <span class=\"overview-thumbnail\"{thumbnail_style}></span>\
         \x20 <span class=\"overview-title\">{label}</span>\
         </a>",
        title = encode_for_html_attribute(&url.title),
        href = encode_for_html_attribute(&url.url),
        close = markup_escape("Remove from overview"),
        label = encode_for_html_entity(&url.title),
    )
}

fn display_list(list: &DisplayList) -> String {
    let mut out = list
        .entries
        .iter()
        .map(|entry| format!("<span class=\"privacy-report-entry\">{}</span>", markup_escape(entry)))
        .collect::<Vec<_>>()
        .join(", ");
    if list.overflow > 0 {
        out.push_str(&format!(
            "<span class=\"privacy-report-more\">{}</span>",
            markup_escape(&format!(" and {} more", list.overflow))
        ));
    }
    out
}

fn report_detail(label: &str, list: &DisplayList) -> String {
    if list.is_empty() {
        return String::new();
    }
    format!(
        "          <p class=\"privacy-report-detail\"><strong>{}:</strong> {}</p>\n",
        markup_escape(label),
        display_list(list)
    )
}

fn privacy_card(report: &PrivacyReport) -> String {
    format!(
        "    <div class=\"privacy-report-card\" data-state=\"{state}\">\n\
         \x20     <div class=\"privacy-report-header\">\n\
         \x20       {SHIELD_ICON}\n\
         \x20       <div class=\"privacy-report-stats\">\n\
         \x20         <p class=\"privacy-report-main-text\">{description}</p>\n\
         {trackers}{websites}\
         \x20       </div>\n\
         \x20     </div>\n\
         \x20     <a href=\"#\" onclick=\"window.webkit.messageHandlers.privacyReport.postMessage({{}}); return false;\" \
         class=\"privacy-report-show-more\">{show_more}</a>\n\
         \x20   </div>\n",
        state = report.state.as_str(),
        description = markup_escape(&report.description()),
        trackers = report_detail("Trackers", &report.trackers),
        websites = report_detail("Websites", &report.websites),
        show_more = markup_escape("Show more"),
    )
}

fn section(title: &str, grid_id: &str, items: &str) -> String {
    format!(
        "  <div class=\"start-page-section\">\n\
         \x20   <h2 class=\"start-page-title\">{}</h2>\n\
         \x20   <div id=\"{}\" class=\"bookmarks-grid\">\n\
         {}\
         \x20   </div>\n\
         \x20 </div>\n",
        markup_escape(title),
        grid_id,
        items
    )
}

fn header(config: &AboutConfig) -> String {
    let lang = base_language(&config.language);
    format!(
        "<html xml:lang=\"{lang}\" lang=\"{lang}\" dir=\"{dir}\">\n\
         <head>\n\
         \x20 <title>{title}</title>\n\
         \x20 <meta http-equiv=\"content-type\" content=\"text/html; charset=utf-8\" />\n\
         \x20 <meta name=\"viewport\" content=\"width=device-width\">\
         \x20 <link href=\"{css}\" rel=\"stylesheet\" type=\"text/css\">\n\
         {CLOSE_SCRIPT}\
         </head>\n\
         <body>\n",
        lang = encode_for_html_attribute(lang),
        dir = config.text_direction.as_str(),
        title = markup_escape(NEW_TAB_PAGE_TITLE),
        css = ABOUT_CSS,
    )
}

/// Everything the start page shows, gathered before rendering.
pub struct OverviewContent<'a> {
    pub favorites: &'a [Favorite],
    pub report: &'a PrivacyReport,
    pub bookmarks: &'a [Bookmark],
    /// `None` hides the most-visited section.
    pub most_visited: Option<&'a [HistoryUrl]>,
}

pub fn render_overview(
    config: &AboutConfig,
    content: &OverviewContent<'_>,
    snapshots: &dyn SnapshotService,
) -> String {
    let mut html = header(config);
    html.push_str("<div id=\"overview\" class=\"start-page\">\n");

    let favorites: String = content.favorites.iter().map(favorite_item).collect();
    html.push_str(&section("Favorites", "favorites-grid", &favorites));

    html.push_str("  <div class=\"start-page-section\">\n");
    html.push_str(&format!(
        "    <h2 class=\"start-page-title\">{}</h2>\n",
        markup_escape("Privacy Report")
    ));
    html.push_str(&privacy_card(content.report));
    html.push_str("  </div>\n");

    let bookmarks: String = content.bookmarks.iter().filter_map(bookmark_item).collect();
    html.push_str(&section("Bookmarks", "bookmarks-grid", &bookmarks));

    if let Some(urls) = content.most_visited.filter(|urls| !urls.is_empty()) {
        let items: String = urls
            .iter()
            .map(|url| most_visited_item(url, snapshots))
            .collect();
        html.push_str(&section("Most Visited", "most-visited-grid", &items));
    }

    html.push_str("</div>\n</body></html>\n");
    html
}

/// Gathers history, the tracking summary and bookmarks, then renders the start page.
pub async fn overview_page(services: &AboutServices, config: &AboutConfig) -> Page {
    let provider = Arc::clone(&services.bookmarks);
    let (history, summary, bookmarks) = tokio::join!(
        services.history.query_urls(HistoryQuery::for_overview()),
        fetch_summary(services.tracking.as_ref()),
        tokio::task::spawn_blocking(move || provider.bookmarks_with_tag(None)),
    );

    let most_visited = match history {
        Ok(urls) => Some(urls),
        Err(e) => {
            tracing::warn!("Failed to query most visited URLs: {}", e);
            None
        }
    };

    let bookmarks = match bookmarks {
        Ok(Ok(bookmarks)) => bookmarks,
        Ok(Err(e)) => {
            tracing::warn!("Failed to load bookmarks: {}", e);
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Bookmark loading task failed: {}", e);
            Vec::new()
        }
    };

    let report = PrivacyReport::from_summary(&summary);
    let content = OverviewContent {
        favorites: &config.favorites,
        report: &report,
        bookmarks: &bookmarks,
        most_visited: most_visited.as_deref(),
    };

    Page {
        html: render_overview(config, &content, services.snapshots.as_ref()),
        message_handlers: vec![MessageHandler::Overview, MessageHandler::PrivacyReport],
    }
}
