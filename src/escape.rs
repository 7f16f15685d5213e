//! HTML Escaping
//!
//! Every piece of note text passes through [`escape_html`] before it is
//! placed into rendered markup.

use std::fmt::Display;

/// Escape the five HTML-significant characters in `input`.
///
/// `None` renders as the empty string. Any [`Display`] value is accepted and
/// converted to its string form first.
pub fn escape_html<T: Display>(input: Option<T>) -> String {
    let Some(value) = input else {
        return String::new();
    };
    let raw = value.to_string();

    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape `input`, substituting `fallback` when the escaped text is empty.
pub fn escape_or<T: Display>(input: Option<T>, fallback: &str) -> String {
    let escaped = escape_html(input);
    if escaped.is_empty() {
        fallback.to_string()
    } else {
        escaped
    }
}

const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#039;", '\''),
];

/// Reverse [`escape_html`] for plain-text output.
///
/// Only the five entities produced by [`escape_html`] are decoded, in a single
/// left-to-right pass. Anything else starting with `&` is kept as written.
pub fn unescape_html(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(pos) = rest.find('&') {
        text.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, c)) => {
                text.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                text.push('&');
                rest = &rest[1..];
            }
        }
    }
    text.push_str(rest);
    text
}
