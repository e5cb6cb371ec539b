//! User agent resolution.
//!
//! The user agent is resolved once when the application starts and handed to
//! whatever needs it by reference.

use std::fmt;

use crate::types::settings::WebSettings;

/// Safari-compatible user agent used when no override is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/26.0.1 Safari/605.1.15";

/// The user agent string sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent(String);

impl UserAgent {
    /// Uses the configured override when it is non-empty, the default otherwise.
    pub fn resolve(settings: &WebSettings) -> Self {
        let configured = settings.user_agent.trim();
        if configured.is_empty() {
            Self(DEFAULT_USER_AGENT.to_string())
        } else {
            Self(configured.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserAgent {
    fn default() -> Self {
        Self(DEFAULT_USER_AGENT.to_string())
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
