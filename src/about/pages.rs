//! Pages built without waiting on anything.

use super::{AboutConfig, Page, ABOUT_CSS, NEW_TAB_PAGE_TITLE};
use crate::services::output_encoding::{encode_for_html_attribute, markup_escape};
use crate::types::request::ShellMode;

const PRIVATE_MODE_ICON: &str = "ephy-resource:///org/gnome/epiphany/page-icons/private-mode.svg";

fn icon_src(path: Option<&std::path::Path>) -> String {
    path.map(|p| encode_for_html_attribute(&p.to_string_lossy()))
        .unwrap_or_default()
}

/// Application identity page: name, version, engine and user agent.
pub fn about_page(config: &AboutConfig) -> Page {
    let html = format!(
        "<html><head><title>{title}</title>\
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\
         <link href=\"{css}\" rel=\"stylesheet\" type=\"text/css\">\
         </head><body>\
         <div id=\"about-app\">\
         <div class=\"dialog\">\
         <img id=\"about-icon\" src=\"file://{icon}\"/>\
         <h1 id=\"about-title\">{name}</h1>\
         <h2 id=\"about-subtitle\">{version}</h2>\
         <p id=\"about-tagline\">{tagline}</p>\
         <table class=\"properties\">\
         <tr><td class=\"prop-label\">{engine}</td><td class=\"prop-value\">{engine_version}</td></tr>\
         <tr><td class=\"prop-label\">{ua_label}</td><td class=\"prop-value\">{ua}</td></tr>\
         </table>\
         </div></div></body></html>",
        title = markup_escape("About Pafari"),
        css = ABOUT_CSS,
        icon = icon_src(config.app_icon_path.as_deref()),
        name = markup_escape(&config.app_name),
        version = markup_escape(&format!("Version {}", config.version)),
        tagline = markup_escape("A simple, clean, beautiful view of the web"),
        engine = markup_escape(&config.engine_name),
        engine_version = markup_escape(&config.engine_version),
        ua_label = markup_escape("User agent"),
        ua = markup_escape(config.user_agent.as_str()),
    );
    Page::plain(html)
}

pub fn epiphany_page() -> Page {
    let html = format!(
        "<html class=\"epiphany-html\"><head><title>{title}</title>\
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\
         <link href=\"{css}\" rel=\"stylesheet\" type=\"text/css\">\
         </head><body class=\"epiphany-body\">\
         <div id=\"ephytext\">\
         « Il semble que la perfection soit atteinte non quand il n'y a plus rien à \
         ajouter, mais quand il n'y a plus rien à retrancher. »\
         </div>\
         <div id=\"from\">\
         <!-- Terre des Hommes, III: L'Avion, p. 60 -->\
         Antoine de Saint-Exupéry\
         </div></body></html>",
        title = markup_escape("Web"),
        css = ABOUT_CSS,
    );
    Page::plain(html)
}

pub fn newtab_page() -> Page {
    let html = format!(
        "<html><head><title>{}</title>\
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\
         </head><body style=\"color-scheme: light dark;\">\
         </body></html>",
        markup_escape(NEW_TAB_PAGE_TITLE)
    );
    Page::plain(html)
}

/// Private browsing notice. Only applies to incognito sessions.
pub fn incognito_page(config: &AboutConfig) -> Option<Page> {
    if config.shell_mode != ShellMode::Incognito {
        return None;
    }

    let html = format!(
        "<html>\n\
         <div dir=\"{dir}\">\n\
         <head>\n\
         <title>{title}</title>\n\
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\
         <link href=\"{css}\" rel=\"stylesheet\" type=\"text/css\">\n\
         </head>\n\
         <body class=\"incognito-body\">\n\
         \x20 <img class=\"incognito-body-image\" src=\"{icon}\">\n\
         \x20 <br/>\n\
         \x20 <h1>{title}</h1>\n\
         \x20 <p>{notice}</p>\n\
         \x20 <p><strong>{scope}</strong> {caveat}</p>\n\
         </body>\n\
         </div>\n\
         </html>\n",
        dir = config.text_direction.as_str(),
        title = markup_escape("Private Browsing"),
        css = ABOUT_CSS,
        icon = PRIVATE_MODE_ICON,
        notice = markup_escape(
            "You are currently browsing incognito. Pages viewed in this mode will not show up \
             in your browsing history and all stored information will be cleared when you close \
             the window. Files you download will be kept."
        ),
        scope = markup_escape(
            "Incognito mode hides your activity only from people using this computer."
        ),
        caveat = markup_escape(
            "It will not hide your activity from your employer if you are at work. Your internet \
             service provider, your government, other governments, the websites that you visit, \
             and advertisers on these websites may still be tracking you."
        ),
    );
    Some(Page::plain(html))
}
