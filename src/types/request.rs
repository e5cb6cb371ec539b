use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// MIME type of every internal page.
pub const HTML_MIME_TYPE: &str = "text/html";

/// Script message channels a rendered page may post to.
///
/// The host registers the channels listed in a [`PageResponse`] for the page
/// that requested it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MessageHandler {
    #[serde(rename = "aboutApps")]
    AboutApps,
    #[serde(rename = "overview")]
    Overview,
    #[serde(rename = "privacyReport")]
    PrivacyReport,
}

impl MessageHandler {
    /// Name under `window.webkit.messageHandlers`.
    pub fn name(&self) -> &'static str {
        match self {
            MessageHandler::AboutApps => "aboutApps",
            MessageHandler::Overview => "overview",
            MessageHandler::PrivacyReport => "privacyReport",
        }
    }
}

/// A finished internal page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse {
    pub body: Vec<u8>,
    pub length: usize,
    pub mime_type: &'static str,
    pub message_handlers: Vec<MessageHandler>,
}

impl PageResponse {
    pub fn html(body: String, message_handlers: Vec<MessageHandler>) -> Self {
        let body = body.into_bytes();
        Self {
            length: body.len(),
            body,
            mime_type: HTML_MIME_TYPE,
            message_handlers,
        }
    }

    /// Body as text. Pages are always generated as UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Receives the response of a single page request.
///
/// `finish` takes the sink by value, so a sink can be completed at most once.
pub trait ResponseSink: Send {
    fn finish(self: Box<Self>, response: PageResponse);
}

impl ResponseSink for oneshot::Sender<PageResponse> {
    fn finish(self: Box<Self>, response: PageResponse) {
        if (*self).send(response).is_err() {
            tracing::debug!("page response dropped: requester went away");
        }
    }
}

/// An incoming request for an internal page.
pub struct PageRequest {
    path: String,
    page_id: u64,
    sink: Box<dyn ResponseSink>,
}

impl PageRequest {
    pub fn new(path: impl Into<String>, page_id: u64, sink: Box<dyn ResponseSink>) -> Self {
        Self {
            path: path.into(),
            page_id,
            sink,
        }
    }

    /// Creates a request whose response is delivered on the returned receiver.
    pub fn channel(
        path: impl Into<String>,
        page_id: u64,
    ) -> (Self, oneshot::Receiver<PageResponse>) {
        let (tx, rx) = oneshot::channel();
        (Self::new(path, page_id, Box::new(tx)), rx)
    }

    /// Virtual path: the part of the address after `about:`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Identifier of the page that issued the request.
    pub fn page_id(&self) -> u64 {
        self.page_id
    }

    /// Completes the request, consuming it.
    pub fn finish(self, html: String, message_handlers: Vec<MessageHandler>) {
        self.sink.finish(PageResponse::html(html, message_handlers));
    }
}

impl fmt::Debug for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRequest")
            .field("path", &self.path)
            .field("page_id", &self.page_id)
            .finish_non_exhaustive()
    }
}

/// Which kind of browser session is running.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShellMode {
    #[default]
    Browser,
    Incognito,
    Private,
    Application,
    Automation,
}

impl FromStr for ShellMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "browser" => Ok(ShellMode::Browser),
            "incognito" => Ok(ShellMode::Incognito),
            "private" => Ok(ShellMode::Private),
            "application" => Ok(ShellMode::Application),
            "automation" => Ok(ShellMode::Automation),
            other => Err(format!("unknown shell mode: {}", other)),
        }
    }
}

/// Base text direction of the UI language.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}
