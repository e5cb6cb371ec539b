//! Handler for the `about:` scheme.
//!
//! [`AboutHandler`] maps a request's virtual path to a page builder and
//! finishes the request with the generated document. Builders that need
//! blocking work or external data await it; anything that goes wrong
//! degrades to a smaller page, never to an error. Every request is finished
//! exactly once: [`PageRequest::finish`] consumes the request.

pub mod applications;
pub mod memory;
pub mod overview;
pub mod pages;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::services::bookmarks_provider::BookmarksProvider;
use crate::services::history_service::HistoryService;
use crate::services::memory_report::MemoryReporter;
use crate::services::snapshot_service::SnapshotService;
use crate::services::tracking_summary::TrackingSummaryProvider;
use crate::services::user_agent::UserAgent;
use crate::services::web_app_registry::WebAppRegistry;
use crate::types::request::{MessageHandler, PageRequest, PageResponse, ShellMode, TextDirection};
use crate::types::settings::{BrowserSettings, Favorite, OverviewSettings};

/// Stylesheet shared by the internal pages, served by the host.
pub const ABOUT_CSS: &str = "ephy-resource:///org/gnome/epiphany/page-templates/about.css";

/// Title of new tabs and of the start page.
pub const NEW_TAB_PAGE_TITLE: &str = "New Tab";

/// Document sent for unknown or inapplicable paths.
pub const BLANK_PAGE: &str = "<html></html>";

/// Process-scoped facts the pages display, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AboutConfig {
    pub app_name: String,
    pub version: String,
    pub engine_name: String,
    pub engine_version: String,
    pub app_icon_path: Option<PathBuf>,
    /// Illustration for the applications page when nothing is installed.
    pub apps_placeholder_icon_path: Option<PathBuf>,
    pub shell_mode: ShellMode,
    /// Running inside a sandbox: host icon paths are unreadable.
    pub sandboxed: bool,
    pub language: String,
    pub text_direction: TextDirection,
    pub favorites: Vec<Favorite>,
    pub user_agent: UserAgent,
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            app_name: "Web".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            engine_name: "WebKitGTK".to_string(),
            engine_version: "2.48.0".to_string(),
            app_icon_path: None,
            apps_placeholder_icon_path: None,
            shell_mode: ShellMode::Browser,
            sandboxed: false,
            language: "en".to_string(),
            text_direction: TextDirection::Ltr,
            favorites: OverviewSettings::default().favorites,
            user_agent: UserAgent::default(),
        }
    }
}

impl AboutConfig {
    /// Takes the user-facing parts of the configuration from settings.
    pub fn from_settings(settings: &BrowserSettings, shell_mode: ShellMode, sandboxed: bool) -> Self {
        Self {
            shell_mode,
            sandboxed,
            language: settings.general.language.clone(),
            text_direction: settings.general.text_direction,
            favorites: settings.overview.favorites.clone(),
            user_agent: UserAgent::resolve(&settings.web),
            ..Self::default()
        }
    }
}

/// Data sources the pages read from.
#[derive(Clone)]
pub struct AboutServices {
    pub history: Arc<dyn HistoryService>,
    pub tracking: Arc<dyn TrackingSummaryProvider>,
    pub bookmarks: Arc<dyn BookmarksProvider>,
    pub snapshots: Arc<dyn SnapshotService>,
    pub web_apps: Arc<dyn WebAppRegistry>,
    pub memory: Arc<dyn MemoryReporter>,
}

/// A rendered document and the script channels it posts to.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub html: String,
    pub message_handlers: Vec<MessageHandler>,
}

impl Page {
    pub fn plain(html: String) -> Self {
        Self {
            html,
            message_handlers: Vec::new(),
        }
    }

    pub fn blank() -> Self {
        Self::plain(BLANK_PAGE.to_string())
    }
}

/// Page selected for a virtual path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Memory,
    Epiphany,
    Applications,
    NewTab,
    Overview,
    Incognito,
    About,
    Blank,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path {
            "memory" => Route::Memory,
            "epiphany" => Route::Epiphany,
            "applications" => Route::Applications,
            "newtab" => Route::NewTab,
            "overview" => Route::Overview,
            "incognito" => Route::Incognito,
            "" | "Web" | "web" => Route::About,
            _ => Route::Blank,
        }
    }
}

/// Serves `about:` pages.
pub struct AboutHandler {
    config: AboutConfig,
    services: AboutServices,
}

impl AboutHandler {
    pub fn new(config: AboutConfig, services: AboutServices) -> Self {
        Self { config, services }
    }

    /// Builds the page for `request` and finishes it.
    pub async fn handle_request(&self, request: PageRequest) {
        let route = Route::from_path(request.path());
        tracing::debug!(path = request.path(), ?route, "handling about: request");

        let page = self
            .build(route, request.page_id())
            .await
            .unwrap_or_else(Page::blank);
        request.finish(page.html, page.message_handlers);
    }

    /// Handles `request` on the runtime without waiting for it.
    pub fn spawn_request(self: &Arc<Self>, request: PageRequest) -> JoinHandle<()> {
        let handler = Arc::clone(self);
        tokio::spawn(async move { handler.handle_request(request).await })
    }

    /// Renders `path` and returns the response directly.
    pub async fn render(&self, path: &str, page_id: u64) -> PageResponse {
        let (request, response) = PageRequest::channel(path, page_id);
        self.handle_request(request).await;
        response
            .await
            .unwrap_or_else(|_| PageResponse::html(BLANK_PAGE.to_string(), Vec::new()))
    }

    /// `None` means the builder does not apply; the caller renders blank.
    async fn build(&self, route: Route, page_id: u64) -> Option<Page> {
        match route {
            Route::Memory => Some(memory::memory_page(Arc::clone(&self.services.memory)).await),
            Route::Epiphany => Some(pages::epiphany_page()),
            Route::Applications => Some(
                applications::applications_page(
                    Arc::clone(&self.services.web_apps),
                    &self.config,
                    page_id,
                )
                .await,
            ),
            Route::NewTab => Some(pages::newtab_page()),
            Route::Overview => Some(overview::overview_page(&self.services, &self.config).await),
            Route::Incognito => pages::incognito_page(&self.config),
            Route::About => Some(pages::about_page(&self.config)),
            Route::Blank => None,
        }
    }
}
