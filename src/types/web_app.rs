use serde::{Deserialize, Serialize};

/// An installed web application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebApplication {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Icon location on the host.
    pub icon_path: Option<String>,
    /// Copy of the icon readable from inside a sandbox.
    pub tmp_icon_path: Option<String>,
    pub install_date: i64,
    /// System apps are shipped with the browser and never listed.
    pub system: bool,
}

impl WebApplication {
    /// Picks the icon path visible from the current execution environment.
    pub fn icon_path_for(&self, sandboxed: bool) -> Option<&str> {
        if sandboxed {
            self.tmp_icon_path.as_deref()
        } else {
            self.icon_path.as_deref()
        }
    }
}
