//! Utility Functions
//!
//! XML entity handling and layout file name helpers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Matches a named or numeric XML entity reference.
static ENTITY_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

/// Decode the predefined XML entities plus numeric character references.
/// Unknown entities are left untouched.
pub fn unescape_xml(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    ENTITY_REGEXP
        .replace_all(input, |caps: &Captures| {
            let body = caps.get(1).unwrap().as_str();
            let decoded = match body {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ if body.starts_with("#x") || body.starts_with("#X") => {
                    u32::from_str_radix(&body[2..], 16)
                        .ok()
                        .and_then(char::from_u32)
                }
                _ if body.starts_with('#') => {
                    body[1..].parse::<u32>().ok().and_then(char::from_u32)
                }
                _ => None,
            };
            match decoded {
                Some(ch) => ch.to_string(),
                None => caps.get(0).unwrap().as_str().to_string(),
            }
        })
        .to_string()
}

/// Escape a string so it can be embedded in a double- or single-quoted
/// attribute value. Tab, LF and CR become numeric references so they
/// survive attribute-value normalization.
pub fn escape_xml_attribute(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(ch),
        }
    }
    out
}

/// File name without its last extension: `main_activity.xml` -> `main_activity`.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Matches the separators used in resource file names.
static CLASS_NAME_SECTION_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_-]").unwrap());

/// Convert a resource file name into a CamelCase class name:
/// `main_activity.xml` -> `MainActivity`.
pub fn to_class_name(name: &str) -> String {
    let base = strip_extension(name);
    CLASS_NAME_SECTION_REGEXP
        .split(base)
        .map(capitalize)
        .collect()
}

fn capitalize(section: &str) -> String {
    let mut chars = section.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
