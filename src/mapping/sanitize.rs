//! Host column-ID sanitizer

use regex::Regex;
use std::sync::LazyLock;

/// Punctuation replaced by named tokens before the catch-all pass
const NAMED_REPLACEMENTS: &[(char, &str)] = &[
    (' ', "_"),
    ('"', "_doublequote_"),
    (',', "_comma_"),
    ('=', "_equal_"),
    ('/', "_fslash_"),
    ('-', "_dash_"),
    ('.', "_dot_"),
];

/// Anything left outside the host's ID alphabet
static DISALLOWED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9_]").unwrap());

/// Rewrite a name into a host-legal column or table ID.
///
/// The result only contains `[A-Za-z0-9_]`. The same function must be used
/// when generating IDs and when matching host columns back to fields.
pub fn sanitize_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for ch in name.chars() {
        match NAMED_REPLACEMENTS.iter().find(|(c, _)| *c == ch) {
            Some((_, token)) => id.push_str(token),
            None => id.push(ch),
        }
    }
    DISALLOWED_REGEX.replace_all(&id, "_").into_owned()
}
