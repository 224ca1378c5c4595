//! Region and script locale directories that are not `.lproj` bundles.
//!
//! SDKs often ship per-locale resources in plain directories such as
//! `es_419/`, `zh-CN_ALL/` or `en_US/`. Two paths that differ only in that
//! segment are variants of one logical resource.

use std::sync::LazyLock;

use regex::Regex;

/// Replaces the locale segment in normalized paths.
pub const LOCALE_PLACEHOLDER: &str = "<LOCALE>";

/// Two lowercase letters followed by one or more `_`/`-` separated blocks,
/// each an uppercase 2-4 letter code or a 3-digit region code.
static LOCALE_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2}(?:[_-](?:[A-Z]{2,4}|[0-9]{3}))+$").expect("locale pattern is valid")
});

/// Whether a single path segment looks like a locale variant directory.
pub fn is_locale_segment(segment: &str) -> bool {
    LOCALE_SEGMENT.is_match(segment)
}

/// Index and text of the first directory segment that is a locale.
fn find_locale_segment(path: &str) -> Option<(usize, &str)> {
    let segments: Vec<&str> = path.split('/').collect();
    let dirs = segments.len().saturating_sub(1);
    segments[..dirs]
        .iter()
        .enumerate()
        .find(|(_, s)| is_locale_segment(s))
        .map(|(i, s)| (i, *s))
}

/// The locale directory segment of `path`, if any.
///
/// Only directory segments are considered; the file name never matches.
pub fn extract_locale_directory(path: &str) -> Option<&str> {
    find_locale_segment(path).map(|(_, segment)| segment)
}

/// `path` with its locale directory replaced by [`LOCALE_PLACEHOLDER`].
pub fn replace_locale_directory(path: &str) -> Option<String> {
    let (index, _) = find_locale_segment(path)?;
    let replaced: Vec<&str> = path
        .split('/')
        .enumerate()
        .map(|(i, s)| if i == index { LOCALE_PLACEHOLDER } else { s })
        .collect();
    Some(replaced.join("/"))
}
