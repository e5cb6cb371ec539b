//! Unit tests for the web application registry.

use pafari::database::Database;
use pafari::managers::web_app_manager::{WebAppManager, WebAppManagerTrait};
use pafari::services::web_app_registry::{DatabaseWebApps, WebAppRegistry};
use pafari::types::errors::WebAppError;
use pafari::types::web_app::WebApplication;

fn web_app(id: &str, name: &str) -> WebApplication {
    WebApplication {
        id: id.to_string(),
        name: name.to_string(),
        url: format!("https://{}.example", id),
        icon_path: Some(format!("/home/user/.local/share/{}/icon.png", id)),
        tmp_icon_path: None,
        install_date: 1_700_000_000,
        system: false,
    }
}

#[test]
fn test_install_and_get() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = WebAppManager::new(db.connection());

    let app = web_app("mail", "Mail");
    mgr.install(&app).unwrap();
    assert_eq!(mgr.get("mail").unwrap(), app);
}

#[test]
fn test_install_twice_is_rejected() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = WebAppManager::new(db.connection());

    mgr.install(&web_app("mail", "Mail")).unwrap();
    let err = mgr.install(&web_app("mail", "Other Mail")).unwrap_err();
    assert!(matches!(err, WebAppError::AlreadyInstalled(id) if id == "mail"));
    assert_eq!(mgr.get("mail").unwrap().name, "Mail");
}

#[test]
fn test_list_is_sorted_by_name_ignoring_case() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = WebAppManager::new(db.connection());

    mgr.install(&web_app("c", "calendar")).unwrap();
    mgr.install(&web_app("a", "Maps")).unwrap();
    mgr.install(&web_app("b", "Books")).unwrap();

    let names: Vec<String> = mgr.list().unwrap().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["Books", "calendar", "Maps"]);
}

#[test]
fn test_remove() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = WebAppManager::new(db.connection());

    mgr.install(&web_app("mail", "Mail")).unwrap();
    mgr.remove("mail").unwrap();
    assert!(matches!(mgr.get("mail"), Err(WebAppError::NotFound(_))));
    assert!(matches!(mgr.remove("mail"), Err(WebAppError::NotFound(_))));
}

#[test]
fn test_system_flag_and_tmp_icon_round_trip() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = WebAppManager::new(db.connection());

    let mut app = web_app("sys", "System");
    app.system = true;
    app.icon_path = None;
    app.tmp_icon_path = Some("/run/flatpak/icon.png".to_string());
    mgr.install(&app).unwrap();

    let stored = mgr.get("sys").unwrap();
    assert!(stored.system);
    assert_eq!(stored.icon_path_for(false), None);
    assert_eq!(stored.icon_path_for(true), Some("/run/flatpak/icon.png"));
}

#[test]
fn test_database_registry_lists_installed_apps() {
    let db = Database::open_in_memory().unwrap().into_shared();
    {
        let guard = db.lock().unwrap();
        WebAppManager::new(guard.connection())
            .install(&web_app("mail", "Mail"))
            .unwrap();
    }

    let registry = DatabaseWebApps::new(db);
    let apps = registry.application_list().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].id, "mail");
}
