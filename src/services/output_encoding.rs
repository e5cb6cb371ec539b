// Pafari output encoding
// Escaping for text interpolated into generated pages. Anything that can be
// influenced by web content (titles, URLs, app names) goes through one of these.

/// Encodes text for use between HTML tags.
pub fn encode_for_html_entity(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Encodes text for use inside a quoted HTML attribute value.
///
/// Every ASCII character other than letters and digits becomes a hex
/// character reference, which also covers unquoted and mis-quoted contexts.
pub fn encode_for_html_attribute(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        if c.is_ascii_alphanumeric() || !c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&format!("&#x{:X};", c as u32));
        }
    }
    out
}

/// Escapes markup-significant characters in fixed UI strings.
pub fn markup_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
