use std::collections::BTreeSet;

use itertools::Itertools;

use bundlewaste_core::{DuplicateSet, FilterResult};

use super::Rule;
use crate::locale::{extract_locale_directory, replace_locale_directory};
use crate::paths::{extension, lproj_container, lproj_directory};

const ID: &str = "rule-4-localization";

/// Untranslated strings and per-locale resources exist once per locale;
/// the OS picks one at runtime.
pub struct LocalizationRule;

fn is_strings_file(path: &str) -> bool {
    matches!(extension(path).as_str(), "strings" | "stringsdict")
}

impl LocalizationRule {
    /// Paths identical except for a region/script locale directory.
    fn locale_variants(set: &DuplicateSet) -> Option<FilterResult> {
        let normalized: Vec<String> = set
            .files
            .iter()
            .map(|f| replace_locale_directory(f))
            .collect::<Option<_>>()?;
        if !normalized.iter().all_equal() {
            return None;
        }

        let locales: BTreeSet<&str> = set
            .files
            .iter()
            .filter_map(|f| extract_locale_directory(f))
            .collect();
        (locales.len() >= 2).then(|| {
            FilterResult::filtered(
                ID,
                format!("Same resource shipped for {} locale variants", locales.len()),
            )
        })
    }

    /// `.strings` files spread across `.lproj` directories.
    fn lproj_strings(set: &DuplicateSet) -> Option<FilterResult> {
        if !set.files.iter().all(|f| is_strings_file(f)) {
            return None;
        }

        let lprojs: Vec<(String, String)> =
            set.files.iter().map(|f| lproj_directory(f)).collect::<Option<_>>()?;

        let lproj_dirs: BTreeSet<&str> = lprojs.iter().map(|(dir, _)| dir.as_str()).collect();
        if lproj_dirs.len() >= 2 {
            return Some(FilterResult::filtered(
                ID,
                format!("Strings file localized into {} .lproj bundles", lproj_dirs.len()),
            ));
        }

        let containers: BTreeSet<String> =
            set.files.iter().filter_map(|f| lproj_container(f)).collect();
        (containers.len() >= 2).then(|| {
            FilterResult::filtered(
                ID,
                format!("Each of {} bundles carries its own localization", containers.len()),
            )
        })
    }
}

impl Rule for LocalizationRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Localization"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        Self::locale_variants(set)
            .or_else(|| Self::lproj_strings(set))
            .unwrap_or_else(FilterResult::no_match)
    }
}
