use std::collections::BTreeSet;

use bundlewaste_core::{DuplicateSet, FilterResult};

use super::Rule;
use crate::paths::nib_directory;

const ID: &str = "rule-2-nib-variants";

/// Compiled NIBs ship a `runtime.nib` plus per-OS `objects-*.nib` variants
/// that are often byte-identical.
pub struct NibVariantsRule;

fn is_objects_nib(name: &str) -> bool {
    name.starts_with("objects-") && name.ends_with(".nib")
}

impl Rule for NibVariantsRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "NIB variants"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        if !set.file_names().all(|name| name.ends_with(".nib")) {
            return FilterResult::no_match();
        }

        let has_runtime = set.file_names().any(|name| name == "runtime.nib");
        let has_objects = set.file_names().any(is_objects_nib);
        if has_runtime && has_objects {
            return FilterResult::filtered(
                ID,
                "runtime.nib and objects-*.nib are OS-specific NIB variants",
            );
        }

        let nib_dirs: BTreeSet<String> =
            set.files.iter().filter_map(|f| nib_directory(f)).collect();
        if nib_dirs.len() >= 2 {
            return FilterResult::filtered(
                ID,
                format!(
                    "NIB content is compiled into {} separate .nib directories",
                    nib_dirs.len()
                ),
            );
        }

        FilterResult::no_match()
    }
}
