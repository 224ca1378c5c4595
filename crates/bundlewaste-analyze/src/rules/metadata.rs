use std::collections::BTreeSet;

use bundlewaste_core::{DuplicateSet, FilterResult};

use super::Rule;
use crate::paths::{extension, file_name, framework_root, is_framework_path};

const ID: &str = "rule-6-framework-metadata";

const METADATA_EXTENSIONS: &[&str] = &["supx", "bcsymbolmap", "swiftdoc", "swiftmodule"];

/// Build metadata each framework carries for itself.
pub struct FrameworkMetadataRule;

fn is_metadata_file(path: &str) -> bool {
    file_name(path) == "module.modulemap"
        || path.contains(".swiftmodule/")
        || METADATA_EXTENSIONS.contains(&extension(path).as_str())
}

impl Rule for FrameworkMetadataRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Framework metadata"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        if !set.files.iter().all(|f| is_metadata_file(f)) {
            return FilterResult::no_match();
        }

        if set.files.iter().all(|f| extension(f) == "bcsymbolmap") {
            return FilterResult::filtered(ID, "Bitcode symbol maps are build artifacts");
        }

        if set.files.iter().all(|f| is_framework_path(f)) {
            let frameworks: BTreeSet<String> =
                set.files.iter().filter_map(|f| framework_root(f)).collect();
            if frameworks.len() >= 2 {
                return FilterResult::filtered(
                    ID,
                    format!("Module metadata required by each of {} frameworks", frameworks.len()),
                );
            }
        }

        FilterResult::no_match()
    }
}
