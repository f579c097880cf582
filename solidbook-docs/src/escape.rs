//! HTML escaping for page assembly.
//!
//! Page assembly builds HTML by string concatenation, so every piece of text
//! that did not come out of the markdown writer passes through here.

/// Escape text for use in HTML element content or a double-quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Make serialized JSON safe to embed in a `<script>` element.
///
/// `<`, `>` and `&` become JSON unicode escapes so a snippet containing
/// `</script>` cannot close the element early. The result parses to the
/// same value.
#[must_use]
pub fn escape_json_for_script(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
