use std::collections::BTreeSet;

use bundlewaste_core::{DuplicateSet, FilterResult};

use super::Rule;
use crate::paths::{asset_set_directory, is_asset_catalog_path};

const ID: &str = "rule-3-contents-json";

/// Asset-catalog `Contents.json` manifests are boilerplate repeated per set.
pub struct ContentsJsonRule;

impl Rule for ContentsJsonRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Asset catalog Contents.json"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        if !set.file_names().all(|name| name == "Contents.json") {
            return FilterResult::no_match();
        }

        if set.files.iter().all(|f| is_asset_catalog_path(f)) {
            return FilterResult::filtered(ID, "Contents.json manifests inside asset catalogs");
        }

        let asset_sets: BTreeSet<String> =
            set.files.iter().filter_map(|f| asset_set_directory(f)).collect();
        if asset_sets.len() >= 2 {
            return FilterResult::filtered(
                ID,
                format!("Contents.json is required in each of {} asset sets", asset_sets.len()),
            );
        }

        if set.files.iter().any(|f| f.contains(".xcassets/")) {
            return FilterResult::filtered(ID, "Contents.json belongs to an asset catalog");
        }

        FilterResult::no_match()
    }
}
