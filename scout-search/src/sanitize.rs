//! Query sanitisation: control characters, dangerous tokens, whitespace.
//!
//! [`sanitize`] is total and idempotent. Dangerous-token removal runs to a
//! fixpoint, so a removal can never splice a new `<script` or
//! `javascript:` together out of the surrounding text.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a sanitised query, in bytes.
pub const MAX_QUERY_BYTES: usize = 8000;

macro_rules! danger_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// Whole embedded element, content included.
danger_pattern!(
    RE_EMBEDDED_BLOCK,
    r"(?is)<\s*(script|iframe|object|embed)[^>]*>.*?<\s*/\s*(script|iframe|object|embed)\s*>"
);
// Stray opening or closing tag, terminated or not.
danger_pattern!(RE_STRAY_TAG, r"(?i)<\s*/?\s*(script|iframe|object|embed)[^>]*>?");
danger_pattern!(RE_JS_URI, r"(?i)javascript\s*:");
danger_pattern!(RE_EVAL_FLAG, r"(?i)--eval");

fn danger_patterns() -> impl Iterator<Item = &'static Regex> {
    [&RE_EMBEDDED_BLOCK, &RE_STRAY_TAG, &RE_JS_URI, &RE_EVAL_FLAG]
        .into_iter()
        .filter_map(|re| LazyLock::force(re).as_ref())
}

/// Sanitise raw user text into a query string.
///
/// 1. Whitespace control characters become spaces; other control
///    characters are removed.
/// 2. Script/iframe/object/embed tags, `javascript:` URIs and `--eval`
///    are deleted until none remain.
/// 3. Whitespace runs collapse to one space; the ends are trimmed.
/// 4. The result is capped at [`MAX_QUERY_BYTES`] on a char boundary.
///
/// # Examples
///
/// ```
/// use scout_search::sanitize::sanitize;
///
/// assert_eq!(sanitize("  rust\n\tasync <script>x()</script> runtimes "), "rust async runtimes");
/// ```
pub fn sanitize(input: &str) -> String {
    let mut text = strip_control(input);

    loop {
        let mut changed = false;
        for re in danger_patterns() {
            if re.is_match(&text) {
                text = re.replace_all(&text, "").into_owned();
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let collapsed = collapse_whitespace(&text);
    truncate_to_limit(&collapsed, MAX_QUERY_BYTES)
        .trim_end()
        .to_owned()
}

/// Sanitise an untyped value. Anything other than a JSON string yields
/// an empty string.
pub fn sanitize_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => sanitize(s),
        _ => String::new(),
    }
}

fn strip_control(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if c.is_control() {
                None
            } else {
                Some(c)
            }
        })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_to_limit(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
