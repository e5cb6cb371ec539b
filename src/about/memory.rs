use std::sync::Arc;

use super::{Page, ABOUT_CSS, BLANK_PAGE};
use crate::services::memory_report::MemoryReporter;
use crate::services::output_encoding::markup_escape;
use crate::types::errors::MemoryError;

/// `about:memory`. Statistics are collected on the blocking pool.
pub async fn memory_page(reporter: Arc<dyn MemoryReporter>) -> Page {
    let collected = tokio::task::spawn_blocking(move || reporter.to_html())
        .await
        .map_err(|e| MemoryError::TaskFailed(e.to_string()))
        .and_then(|result| result);
    let report = match collected {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Failed to collect memory statistics: {}", e);
            return Page::plain(BLANK_PAGE.to_string());
        }
    };

    let title = markup_escape("Memory usage");
    Page::plain(format!(
        "<html><head><title>{title}</title>\
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\
         <link href=\"{css}\" rel=\"stylesheet\" type=\"text/css\">\
         </head><body>\
         <div id=\"memory\">\
         <h1>{title}</h1>{report}\
         </div></body></html>",
        css = ABOUT_CSS,
    ))
}
