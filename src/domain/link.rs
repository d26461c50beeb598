use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use regex::Regex;

const ID_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

static PUBLIC_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-zA-Z][a-zA-Z0-9+.-]*://[^/?#]+)?(?:(?:/[^?#]*)?/)?(?:#/)?f/([^/?#]+)/?$")
        .expect("public path pattern")
});

pub fn public_path(form_id: &str) -> String {
    format!("/f/{}", utf8_percent_encode(form_id, ID_ESCAPES))
}

pub fn public_link(base_url: &str, form_id: &str) -> String {
    format!("{}/#{}", base_url.trim_end_matches('/'), public_path(form_id))
}

pub fn parse_public_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let encoded = match PUBLIC_PATH.captures(trimmed) {
        Some(captures) => captures.get(1)?.as_str(),
        None if !trimmed.contains('/') => trimmed,
        None => return None,
    };
    let decoded = percent_decode_str(encoded).decode_utf8().ok()?;
    Some(decoded.into_owned())
}
