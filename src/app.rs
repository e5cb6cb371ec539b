//! App Core for Pafari's internal pages.
//!
//! Owns the database, settings and snapshot cache, and the `about:` handler
//! wired to them.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::mpsc;

use crate::about::{AboutConfig, AboutHandler, AboutServices};
use crate::database::{Database, SharedDatabase};
use crate::platform;
use crate::services::bookmarks_provider::DatabaseBookmarks;
use crate::services::history_service::DatabaseHistoryService;
use crate::services::memory_report::SmapsReporter;
use crate::services::settings_engine::SettingsEngine;
use crate::services::snapshot_service::FileSnapshotService;
use crate::services::tracking_summary::DatabaseTrackingSummary;
use crate::services::user_agent::UserAgent;
use crate::services::web_app_registry::DatabaseWebApps;
use crate::types::request::ShellMode;

pub const DATABASE_FILE_NAME: &str = "pafari.db";
pub const SHELL_MODE_ENV: &str = "PAFARI_SHELL_MODE";
pub const APP_ICON_ENV: &str = "PAFARI_APP_ICON";
pub const APPS_ICON_ENV: &str = "PAFARI_APPS_ICON";

/// Where the app keeps its state and how the session runs.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub data_dir: PathBuf,
    pub snapshot_dir: PathBuf,
    /// `None` uses the platform config directory.
    pub settings_path: Option<PathBuf>,
    pub shell_mode: ShellMode,
    pub sandboxed: bool,
    pub app_icon_path: Option<PathBuf>,
    pub apps_placeholder_icon_path: Option<PathBuf>,
}

impl AppOptions {
    /// Options rooted at `dir`, for an isolated browser session.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            snapshot_dir: dir.join("thumbnails"),
            settings_path: Some(dir.join("settings.json")),
            data_dir: dir,
            shell_mode: ShellMode::Browser,
            sandboxed: false,
            app_icon_path: None,
            apps_placeholder_icon_path: None,
        }
    }

    /// Options from the platform directories and `PAFARI_*` variables.
    pub fn from_env() -> Self {
        let shell_mode = match std::env::var(SHELL_MODE_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("{}; using browser mode", e);
                ShellMode::Browser
            }),
            Err(_) => ShellMode::Browser,
        };

        Self {
            data_dir: platform::get_data_dir(),
            snapshot_dir: platform::get_cache_dir().join("thumbnails"),
            settings_path: None,
            shell_mode,
            sandboxed: platform::is_running_inside_sandbox(),
            app_icon_path: std::env::var_os(APP_ICON_ENV).map(PathBuf::from),
            apps_placeholder_icon_path: std::env::var_os(APPS_ICON_ENV).map(PathBuf::from),
        }
    }
}

/// Central application struct.
///
/// Managers borrow the connection, so they are built on demand under the
/// database lock: `HistoryManager::new(db.connection())`.
pub struct App {
    pub db: SharedDatabase,
    pub settings: Mutex<SettingsEngine>,
    pub snapshots: Arc<FileSnapshotService>,
    options: AppOptions,
    snapshot_requests: Mutex<mpsc::UnboundedReceiver<String>>,
    services: AboutServices,
    about: RwLock<Arc<AboutHandler>>,
}

impl App {
    pub fn new(options: AppOptions) -> Result<Self, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(&options.data_dir)?;
        let db = Database::open(options.data_dir.join(DATABASE_FILE_NAME))?.into_shared();

        let mut settings = SettingsEngine::new(options.settings_path.clone());
        settings.load_or_default();

        let (snapshots, snapshot_requests) = FileSnapshotService::new(&options.snapshot_dir);
        let snapshots = Arc::new(snapshots);

        let services = AboutServices {
            history: Arc::new(DatabaseHistoryService::new(db.clone())),
            tracking: Arc::new(DatabaseTrackingSummary::new(db.clone())),
            bookmarks: Arc::new(DatabaseBookmarks::new(db.clone())),
            snapshots: snapshots.clone(),
            web_apps: Arc::new(DatabaseWebApps::new(db.clone())),
            memory: Arc::new(SmapsReporter::for_current_process()),
        };
        let about = Arc::new(AboutHandler::new(
            Self::about_config(&options, &settings),
            services.clone(),
        ));

        tracing::info!(
            data_dir = %options.data_dir.display(),
            shell_mode = ?options.shell_mode,
            sandboxed = options.sandboxed,
            "Pafari about handler initialised"
        );

        Ok(Self {
            db,
            settings: Mutex::new(settings),
            snapshots,
            options,
            snapshot_requests: Mutex::new(snapshot_requests),
            services,
            about: RwLock::new(about),
        })
    }

    fn about_config(options: &AppOptions, settings: &SettingsEngine) -> AboutConfig {
        use crate::services::settings_engine::SettingsEngineTrait;

        AboutConfig {
            app_icon_path: options.app_icon_path.clone(),
            apps_placeholder_icon_path: options.apps_placeholder_icon_path.clone(),
            ..AboutConfig::from_settings(settings.get_settings(), options.shell_mode, options.sandboxed)
        }
    }

    pub fn shell_mode(&self) -> ShellMode {
        self.options.shell_mode
    }

    /// Incognito sessions leave no history behind.
    pub fn history_recording_enabled(&self) -> bool {
        self.options.shell_mode != ShellMode::Incognito
    }

    /// The current handler. Requests already in flight keep the one they started with.
    pub fn about_handler(&self) -> Arc<AboutHandler> {
        match self.about.read() {
            Ok(about) => Arc::clone(&about),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Rebuilds the page configuration after a settings change.
    pub fn refresh_about(&self) -> Result<(), String> {
        let config = {
            let settings = self.settings.lock().map_err(|e| e.to_string())?;
            Self::about_config(&self.options, &settings)
        };
        let handler = Arc::new(AboutHandler::new(config, self.services.clone()));
        let mut about = self.about.write().map_err(|e| e.to_string())?;
        *about = handler;
        Ok(())
    }

    pub fn user_agent(&self) -> UserAgent {
        match self.settings.lock() {
            Ok(settings) => settings.user_agent(),
            Err(poisoned) => poisoned.into_inner().user_agent(),
        }
    }

    /// Takes every URL queued for a thumbnail capture so far. Taken URLs
    /// are no longer pending, so a failed capture is requested again on the
    /// next overview load.
    pub fn drain_snapshot_requests(&self) -> Vec<String> {
        let mut urls = Vec::new();
        if let Ok(mut requests) = self.snapshot_requests.lock() {
            while let Ok(url) = requests.try_recv() {
                self.snapshots.release(&url);
                urls.push(url);
            }
        }
        urls
    }
}
