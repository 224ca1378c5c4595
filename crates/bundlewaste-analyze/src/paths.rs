//! Bundle path analysis.
//!
//! Pure string analysis over forward-slash paths. Nested bundles resolve to
//! the innermost one: every marker is searched by its *last* occurrence and
//! the latest match wins, so `A.framework/Frameworks/B.framework/x` belongs
//! to `B.framework`.

use std::borrow::Cow;
use std::collections::BTreeSet;

use strum::IntoEnumIterator;

use bundlewaste_core::{BundleInfo, BundleType};

/// Directory suffixes of asset-catalog sets.
pub const ASSET_SET_SUFFIXES: &[&str] = &[
    ".appiconset/",
    ".launchimage/",
    ".imageset/",
    ".colorset/",
    ".dataset/",
];

/// Normalize separators to `/`.
pub fn normalize(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// The innermost bundle containing `path`.
pub fn bundle_boundaries(path: &str) -> BundleInfo {
    let path = normalize(path);

    let mut innermost: Option<(usize, BundleType)> = None;
    for bundle_type in BundleType::iter() {
        if let Some(idx) = path.rfind(bundle_type.marker()) {
            if innermost.is_none_or(|(best, _)| idx > best) {
                innermost = Some((idx, bundle_type));
            }
        }
    }

    let Some((idx, bundle_type)) = innermost else {
        return BundleInfo::none();
    };

    // Bundle path keeps the suffix but not the trailing slash.
    let end = idx + bundle_type.marker().len() - 1;
    let name_start = path[..idx].rfind('/').map_or(0, |i| i + 1);
    BundleInfo::new(&path[name_start..idx], bundle_type, &path[..end])
}

pub fn is_framework_path(path: &str) -> bool {
    path.contains(".framework/")
}

pub fn is_extension_path(path: &str) -> bool {
    path.contains(".appex/")
}

/// Source catalogs (`.xcassets/`) and compiled catalogs (`.car`).
pub fn is_asset_catalog_path(path: &str) -> bool {
    path.contains(".xcassets/") || path.contains(".car/") || path.ends_with(".car")
}

pub fn is_localization_path(path: &str) -> bool {
    path.contains(".lproj/")
}

/// Byte offset of the last `<suffix>/` in `path`, or of a trailing `<suffix>`.
fn last_suffix_index(path: &str, suffix: &str) -> Option<usize> {
    let with_slash = format!("{suffix}/");
    path.rfind(&with_slash)
        .or_else(|| path.ends_with(suffix).then(|| path.len() - suffix.len()))
}

/// The path segment immediately preceding the last `suffix`.
fn segment_before(path: &str, suffix: &str) -> String {
    let path = normalize(path);
    match last_suffix_index(&path, suffix) {
        Some(idx) => {
            let start = path[..idx].rfind('/').map_or(0, |i| i + 1);
            path[start..idx].to_string()
        }
        None => String::new(),
    }
}

/// Directory path ending in the last `suffix`, without trailing slash.
fn root_with_suffix(path: &str, suffix: &str) -> Option<String> {
    let path = normalize(path);
    last_suffix_index(&path, suffix).map(|idx| path[..idx + suffix.len()].to_string())
}

/// Name of the innermost framework, or empty.
pub fn extract_framework_name(path: &str) -> String {
    segment_before(path, ".framework")
}

/// Name of the innermost app extension, or empty.
pub fn extract_extension_name(path: &str) -> String {
    segment_before(path, ".appex")
}

/// Path of the innermost `.framework` directory.
pub fn framework_root(path: &str) -> Option<String> {
    root_with_suffix(path, ".framework")
}

/// Path of the innermost `.appex` directory.
pub fn extension_root(path: &str) -> Option<String> {
    root_with_suffix(path, ".appex")
}

/// Path of the innermost compiled asset catalog (`.car`).
pub fn car_root(path: &str) -> Option<String> {
    root_with_suffix(path, ".car")
}

/// Full paths of the distinct bundles containing `paths`.
///
/// Paths outside any bundle contribute nothing.
pub fn distinct_bundles<'a, I>(paths: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    paths
        .into_iter()
        .map(|p| bundle_boundaries(p))
        .filter(|b| b.in_bundle)
        .map(|b| b.full_path)
        .collect()
}

/// Both paths sit in bundles of the same type whose paths differ.
///
/// A `.framework` and an `.appex` never count as different bundles here.
pub fn in_different_bundles(a: &str, b: &str) -> bool {
    let a = bundle_boundaries(a);
    let b = bundle_boundaries(b);
    a.in_bundle && b.in_bundle && a.bundle_type == b.bundle_type && a.full_path != b.full_path
}

/// Final path component.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Lowercased extension of the final component, without the dot.
pub fn extension(path: &str) -> String {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx + 1..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Everything before the final component, or empty for a bare name.
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// The `.lproj` directory of `path` and its locale name.
///
/// Returns `(directory path, locale)` for the innermost `.lproj` segment.
pub fn lproj_directory(path: &str) -> Option<(String, String)> {
    let path = normalize(path);
    let idx = path.rfind(".lproj/")?;
    let start = path[..idx].rfind('/').map_or(0, |i| i + 1);
    Some((path[..idx + ".lproj".len()].to_string(), path[start..idx].to_string()))
}

/// The directory containing the `.lproj` directory of `path`.
///
/// Resolves to the enclosing bundle when there is one, otherwise to the
/// plain parent directory.
pub fn lproj_container(path: &str) -> Option<String> {
    let (lproj, _) = lproj_directory(path)?;
    let parent = parent_dir(&lproj);
    let enclosing = bundle_boundaries(&format!("{parent}/"));
    if enclosing.in_bundle {
        Some(enclosing.full_path)
    } else {
        Some(parent.to_string())
    }
}

/// The innermost directory segment ending in `.nib`.
pub fn nib_directory(path: &str) -> Option<String> {
    let dir = parent_dir(path);
    let segments: Vec<&str> = dir.split('/').collect();
    let last_nib = segments.iter().rposition(|s| s.ends_with(".nib"))?;
    Some(segments[..=last_nib].join("/"))
}

/// The innermost asset-set directory (`.imageset`, `.colorset`, ...).
pub fn asset_set_directory(path: &str) -> Option<String> {
    ASSET_SET_SUFFIXES
        .iter()
        .filter_map(|suffix| path.rfind(suffix).map(|idx| idx + suffix.len() - 1))
        .max()
        .map(|end| path[..end].to_string())
}

/// Bundle path when `path` is inside one, otherwise its parent directory.
pub fn container(path: &str) -> String {
    let info = bundle_boundaries(path);
    if info.in_bundle {
        info.full_path
    } else {
        parent_dir(path).to_string()
    }
}
