use bundlewaste_core::{DuplicateSet, FilterResult};

use super::Rule;
use crate::paths::distinct_bundles;

const ID: &str = "rule-1-info-plist";

/// Every bundle must carry its own `Info.plist`.
///
/// Identical plists across distinct bundles are required; two identical
/// plists inside one bundle are not.
pub struct InfoPlistRule;

impl Rule for InfoPlistRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Info.plist bundle boundary"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        if !set.file_names().all(|name| name == "Info.plist") {
            return FilterResult::no_match();
        }

        let bundles = distinct_bundles(&set.files);
        if bundles.len() >= 2 {
            FilterResult::filtered(
                ID,
                format!("Info.plist is required in each of {} bundles", bundles.len()),
            )
        } else {
            FilterResult::no_match()
        }
    }
}
