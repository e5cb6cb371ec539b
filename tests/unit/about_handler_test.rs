//! Routing and fixed-page tests for `AboutHandler`.

mod support;

use std::sync::{Arc, Mutex};

use rstest::rstest;

use pafari::about::{Route, BLANK_PAGE};
use pafari::types::request::{
    MessageHandler, PageRequest, PageResponse, ResponseSink, ShellMode, TextDirection, HTML_MIME_TYPE,
};
use support::Fixture;

#[rstest]
#[case("memory", Route::Memory)]
#[case("epiphany", Route::Epiphany)]
#[case("applications", Route::Applications)]
#[case("newtab", Route::NewTab)]
#[case("overview", Route::Overview)]
#[case("incognito", Route::Incognito)]
#[case("", Route::About)]
#[case("Web", Route::About)]
#[case("web", Route::About)]
#[case("WEB", Route::Blank)]
#[case("config", Route::Blank)]
#[case("memory/extra", Route::Blank)]
fn test_route_from_path(#[case] path: &str, #[case] expected: Route) {
    assert_eq!(Route::from_path(path), expected);
}

#[rstest]
#[case("does-not-exist")]
#[case("plugins")]
#[case(" memory")]
#[tokio::test]
async fn test_unknown_paths_render_blank(#[case] path: &str) {
    let response = Fixture::default().handler().render(path, 1).await;
    assert_eq!(response.text(), BLANK_PAGE);
    assert_eq!(response.mime_type, HTML_MIME_TYPE);
    assert_eq!(response.length, BLANK_PAGE.len());
    assert!(response.message_handlers.is_empty());
}

#[tokio::test]
async fn test_every_route_is_html_with_matching_length() {
    let handler = Fixture::default().handler();
    for path in ["memory", "epiphany", "applications", "newtab", "overview", "incognito", ""] {
        let response = handler.render(path, 3).await;
        assert_eq!(response.mime_type, "text/html", "path {:?}", path);
        assert_eq!(response.length, response.body.len(), "path {:?}", path);
        assert!(response.text().starts_with("<html"), "path {:?}", path);
    }
}

#[tokio::test]
async fn test_handle_request_finishes_through_sink() {
    let handler = Fixture::default().handler();
    let (request, response) = PageRequest::channel("newtab", 9);
    assert_eq!(request.page_id(), 9);

    handler.handle_request(request).await;
    let response = response.await.expect("request must be finished");
    assert!(response.text().contains("<title>New Tab</title>"));
}

#[tokio::test]
async fn test_spawned_request_is_answered() {
    let handler = Arc::new(Fixture::default().handler());
    let (request, response) = PageRequest::channel("epiphany", 1);

    handler.spawn_request(request).await.unwrap();
    assert!(response.await.unwrap().text().contains("Antoine de Saint-Exupéry"));
}

/// Records every response it receives.
struct RecordingSink(Arc<Mutex<Vec<PageResponse>>>);

impl ResponseSink for RecordingSink {
    fn finish(self: Box<Self>, response: PageResponse) {
        self.0.lock().unwrap().push(response);
    }
}

#[tokio::test]
async fn test_custom_sink_is_finished_once() {
    let handler = Fixture::default().handler();
    let responses = Arc::new(Mutex::new(Vec::new()));
    let request = PageRequest::new("unknown", 2, Box::new(RecordingSink(responses.clone())));
    assert_eq!(request.path(), "unknown");

    handler.handle_request(request).await;
    let responses = responses.lock().unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].text(), BLANK_PAGE);
}

#[tokio::test]
async fn test_dropped_requester_is_tolerated() {
    let handler = Fixture::default().handler();
    let (request, response) = PageRequest::channel("newtab", 1);
    drop(response);
    handler.handle_request(request).await;
}

// ─── Fixed pages ───

#[tokio::test]
async fn test_about_page_shows_identity_and_user_agent() {
    let mut fixture = Fixture::default();
    fixture.config.version = "48.1".to_string();
    fixture.config.app_icon_path = Some("/usr/share/icons/pafari.svg".into());

    let html = fixture.handler().render("", 1).await.text();
    assert!(html.contains("<div id=\"about-app\">"));
    assert!(html.contains("<h1 id=\"about-title\">Web</h1>"));
    assert!(html.contains("<h2 id=\"about-subtitle\">Version 48.1</h2>"));
    assert!(html.contains("A simple, clean, beautiful view of the web"));
    assert!(html.contains("src=\"file://&#x2F;usr&#x2F;share&#x2F;icons&#x2F;pafari&#x2E;svg\""));
    assert!(html.contains("<td class=\"prop-label\">WebKitGTK</td>"));
    assert!(html.contains("<td class=\"prop-label\">User agent</td>"));
    assert!(html.contains("Version/26.0.1 Safari/605.1.15</td>"));
}

#[tokio::test]
async fn test_about_page_escapes_configured_values() {
    let mut fixture = Fixture::default();
    fixture.config.app_name = "<Web & Co>".to_string();

    let html = fixture.handler().render("web", 1).await.text();
    assert!(html.contains("&lt;Web &amp; Co&gt;"));
    assert!(!html.contains("<Web & Co>"));
}

#[tokio::test]
async fn test_newtab_page_is_an_empty_shell() {
    let html = Fixture::default().handler().render("newtab", 1).await.text();
    assert!(html.contains("<body style=\"color-scheme: light dark;\"></body>"));
}

#[tokio::test]
async fn test_epiphany_page_quote() {
    let html = Fixture::default().handler().render("epiphany", 1).await.text();
    assert!(html.starts_with("<html class=\"epiphany-html\">"));
    assert!(html.contains("<div id=\"ephytext\">« Il semble que la perfection soit atteinte"));
    assert!(html.contains("<body class=\"epiphany-body\">"));
}

#[rstest]
#[case(ShellMode::Browser)]
#[case(ShellMode::Private)]
#[case(ShellMode::Application)]
#[case(ShellMode::Automation)]
#[tokio::test]
async fn test_incognito_page_outside_incognito_is_blank(#[case] mode: ShellMode) {
    let mut fixture = Fixture::default();
    fixture.config.shell_mode = mode;
    assert_eq!(fixture.handler().render("incognito", 1).await.text(), BLANK_PAGE);
}

#[tokio::test]
async fn test_incognito_page_in_incognito_session() {
    let mut fixture = Fixture::default();
    fixture.config.shell_mode = ShellMode::Incognito;
    fixture.config.text_direction = TextDirection::Rtl;

    let html = fixture.handler().render("incognito", 1).await.text();
    assert!(html.contains("<div dir=\"rtl\">"));
    assert!(html.contains("<body class=\"incognito-body\">"));
    assert!(html.contains("<h1>Private Browsing</h1>"));
    assert!(html.contains("private-mode.svg"));
}

// ─── Memory ───

#[tokio::test]
async fn test_memory_page_wraps_report() {
    let fixture = Fixture::default().with_memory(Some("<h2>Process 7</h2><table></table>"));
    let response = fixture.handler().render("memory", 1).await;
    let html = response.text();

    assert!(html.contains("<title>Memory usage</title>"));
    assert!(html.contains("<div id=\"memory\"><h1>Memory usage</h1><h2>Process 7</h2><table></table></div>"));
    assert!(response.message_handlers.is_empty());
}

#[tokio::test]
async fn test_memory_failure_renders_blank() {
    let fixture = Fixture::default().with_memory(None);
    assert_eq!(fixture.handler().render("memory", 1).await.text(), BLANK_PAGE);
}

#[tokio::test]
async fn test_applications_declare_their_handler() {
    let response = Fixture::default().handler().render("applications", 1).await;
    assert_eq!(response.message_handlers, vec![MessageHandler::AboutApps]);
}
