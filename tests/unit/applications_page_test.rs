//! Tests for `about:applications`.

mod support;

use pafari::services::output_encoding::encode_for_html_attribute;
use pafari::types::request::MessageHandler;
use support::{web_app, Fixture};

const EMPTY_STATE: &str = "<div id=\"overview\" class=\"overview-empty\">";

#[tokio::test]
async fn test_lists_user_installed_apps() {
    let fixture = Fixture::default().with_web_apps(Some(vec![
        web_app("maps", "Maps", Some("/icons/maps.png"), false),
        web_app("notes", "Notes", Some("/icons/notes.png"), false),
    ]));
    let response = fixture.handler().render("applications", 4).await;
    let html = response.text();

    assert_eq!(response.message_handlers, vec![MessageHandler::AboutApps]);
    assert!(!html.contains(EMPTY_STATE));
    assert_eq!(html.matches("<tbody><tr id=").count(), 2);
    assert!(html.contains("<tr id=\"maps\">"));
    assert!(html.contains(&format!(
        "<img width=64 height=64 src=\"file://{}\"></img>",
        encode_for_html_attribute("/icons/maps.png")
    )));
    assert!(html.contains("<div class=\"appname\">Notes</div>"));
    assert!(html.contains("<div class=\"appurl\">https:&#x2F;&#x2F;notes.example</div>"));
    assert!(html.contains("class=\"suggested-action\""));
    assert!(html.contains("class=\"destructive-action\""));
    assert!(html.contains("<td class=\"date\">Installed on: <br /> "));
}

#[tokio::test]
async fn test_script_carries_page_id() {
    let fixture = Fixture::default()
        .with_web_apps(Some(vec![web_app("maps", "Maps", Some("/icons/maps.png"), false)]));
    let html = fixture.handler().render("applications", 42).await.text();

    assert!(html.contains("action: 'launch', app: appID, name: appName, page: 42}"));
    assert!(html.contains("action: 'remove', app: appID, name: appName, page: 42}"));
}

#[tokio::test]
async fn test_system_apps_are_hidden() {
    let fixture = Fixture::default().with_web_apps(Some(vec![
        web_app("system", "Built In", Some("/icons/system.png"), true),
        web_app("maps", "Maps", Some("/icons/maps.png"), false),
    ]));
    let html = fixture.handler().render("applications", 1).await.text();

    assert!(!html.contains("Built In"));
    assert_eq!(html.matches("<tbody><tr id=").count(), 1);
}

#[tokio::test]
async fn test_only_unlistable_apps_show_empty_state() {
    let fixture = Fixture::default().with_web_apps(Some(vec![
        web_app("noicon", "No Icon", None, false),
        web_app("system", "Built In", Some("/icons/system.png"), true),
    ]));
    let html = fixture.handler().render("applications", 1).await.text();

    assert!(html.contains(EMPTY_STATE));
    assert!(!html.contains("<table>"));
    assert!(!html.contains("No Icon"));
}

#[tokio::test]
async fn test_sandboxed_session_uses_tmp_icon() {
    let mut fixture =
        Fixture::default().with_web_apps(Some(vec![web_app("maps", "Maps", None, false)]));
    fixture.config.sandboxed = true;
    let html = fixture.handler().render("applications", 1).await.text();

    assert!(html.contains(&format!(
        "src=\"file://{}\"",
        encode_for_html_attribute("/var/tmp/maps.png")
    )));
}

#[tokio::test]
async fn test_app_fields_are_escaped() {
    let fixture = Fixture::default().with_web_apps(Some(vec![web_app(
        "x\"onload=\"alert(1)",
        "<img src=x onerror=alert(1)>",
        Some("/icons/x.png"),
        false,
    )]));
    let html = fixture.handler().render("applications", 1).await.text();

    assert!(!html.contains("<img src=x"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(!html.contains("onload=\"alert"));
    assert!(html.contains("<tr id=\"x&#x22;onload&#x3D;&#x22;alert&#x28;1&#x29;\">"));
}

#[tokio::test]
async fn test_empty_registry_shows_empty_state() {
    let mut fixture = Fixture::default();
    fixture.config.apps_placeholder_icon_path = Some("/usr/share/icons/apps.svg".into());
    let html = fixture.handler().render("applications", 1).await.text();

    assert!(html.contains(EMPTY_STATE));
    assert!(html.contains(&format!(
        "<img src=\"file://{}\"/>",
        encode_for_html_attribute("/usr/share/icons/apps.svg")
    )));
    assert!(html.contains("<div><h1>Apps</h1></div>"));
    assert!(html.contains("<b>Install as Web App…</b>"));
}

#[tokio::test]
async fn test_registry_failure_shows_empty_state() {
    let fixture = Fixture::default().with_web_apps(None);
    let response = fixture.handler().render("applications", 1).await;

    assert!(response.text().contains(EMPTY_STATE));
    assert_eq!(response.message_handlers, vec![MessageHandler::AboutApps]);
}
