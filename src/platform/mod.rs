// Pafari platform abstraction
// Resolves per-user directories and detects sandboxed execution.

use std::env;
use std::path::{Path, PathBuf};

/// Directory name under the XDG base directories.
const APP_DIR_NAME: &str = "pafari";

/// Marker file present at the root of every Flatpak sandbox.
const FLATPAK_INFO_PATH: &str = "/.flatpak-info";

/// Overrides the data directory (database location) when set.
pub const DATA_DIR_ENV: &str = "PAFARI_DATA_DIR";

/// Kinds of per-user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserDir {
    Config,
    Data,
    Cache,
}

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn user_dir(kind: UserDir) -> PathBuf {
    let (var, fallback): (&str, &[&str]) = match kind {
        UserDir::Config => ("XDG_CONFIG_HOME", &[".config"]),
        UserDir::Data => ("XDG_DATA_HOME", &[".local", "share"]),
        UserDir::Cache => ("XDG_CACHE_HOME", &[".cache"]),
    };
    let base = match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => fallback.iter().fold(home_dir(), |path, part| path.join(part)),
    };
    base.join(APP_DIR_NAME)
}

#[cfg(target_os = "macos")]
fn user_dir(kind: UserDir) -> PathBuf {
    let library = home_dir().join("Library");
    match kind {
        UserDir::Config | UserDir::Data => library.join("Application Support").join("Pafari"),
        UserDir::Cache => library.join("Caches").join("Pafari"),
    }
}

#[cfg(target_os = "windows")]
fn user_dir(kind: UserDir) -> PathBuf {
    match kind {
        UserDir::Config | UserDir::Data => {
            let appdata = env::var("APPDATA")
                .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
            PathBuf::from(appdata).join("Pafari")
        }
        UserDir::Cache => {
            let local = env::var("LOCALAPPDATA")
                .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local"));
            PathBuf::from(local).join("Pafari").join("cache")
        }
    }
}

/// Returns the configuration directory, e.g. `~/.config/pafari`.
pub fn get_config_dir() -> PathBuf {
    user_dir(UserDir::Config)
}

/// Returns the data directory, e.g. `~/.local/share/pafari`.
///
/// `PAFARI_DATA_DIR` takes precedence when set.
pub fn get_data_dir() -> PathBuf {
    match env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => user_dir(UserDir::Data),
    }
}

/// Returns the cache directory, e.g. `~/.cache/pafari`.
pub fn get_cache_dir() -> PathBuf {
    user_dir(UserDir::Cache)
}

/// Whether the browser runs inside a Flatpak sandbox, where host paths
/// (such as web app icons) are not readable.
pub fn is_running_inside_sandbox() -> bool {
    Path::new(FLATPAK_INFO_PATH).exists()
}
