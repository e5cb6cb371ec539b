use serde::{Deserialize, Serialize};

use super::request::TextDirection;

/// Top-level browser settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BrowserSettings {
    pub general: GeneralSettings,
    pub web: WebSettings,
    pub overview: OverviewSettings,
}

/// General browser settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    pub language: String,
    #[serde(default)]
    pub text_direction: TextDirection,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            text_direction: TextDirection::Ltr,
        }
    }
}

/// Web engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WebSettings {
    /// Overrides the built-in user agent when non-empty.
    #[serde(default)]
    pub user_agent: String,
}

/// A pinned site on the start page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    pub url: String,
    pub title: String,
}

impl Favorite {
    fn new(url: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
        }
    }
}

/// Start page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverviewSettings {
    pub favorites: Vec<Favorite>,
}

impl Default for OverviewSettings {
    fn default() -> Self {
        Self {
            favorites: vec![
                Favorite::new("https://pearos.xyz", "pearOS"),
                Favorite::new("https://google.com", "Google"),
                Favorite::new("https://youtube.com", "Youtube"),
                Favorite::new("https://mail.google.com", "Gmail"),
            ],
        }
    }
}
