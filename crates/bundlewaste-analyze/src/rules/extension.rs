use std::collections::BTreeSet;

use bundlewaste_core::{DuplicateSet, FilterResult};

use super::{PriorityThresholds, Rule};
use crate::paths::{extension_root, is_extension_path, is_framework_path};

const ID: &str = "rule-11-extension-duplication";

/// Resources copied into app extensions that could live in a shared
/// framework or app group. Actionable; prioritized by wasted bytes.
pub struct ExtensionDuplicationRule {
    thresholds: PriorityThresholds,
}

impl ExtensionDuplicationRule {
    pub fn new(thresholds: PriorityThresholds) -> Self {
        Self { thresholds }
    }
}

impl Rule for ExtensionDuplicationRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Extension duplication"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        let in_extension = set.files.iter().any(|f| is_extension_path(f));
        if !in_extension {
            return FilterResult::no_match();
        }

        let in_host = set
            .files
            .iter()
            .any(|f| !is_extension_path(f) && (f.contains(".app/") || is_framework_path(f)));
        let extensions: BTreeSet<String> =
            set.files.iter().filter_map(|f| extension_root(f)).collect();

        if !in_host && extensions.len() < 2 {
            return FilterResult::no_match();
        }

        let priority = self.thresholds.priority_for(set.wasted_size);
        let reason = if in_host {
            "Resource duplicated between the app and its extensions".to_string()
        } else {
            format!("Resource duplicated across {} extensions", extensions.len())
        };
        FilterResult::prioritized(ID, reason, priority)
    }
}
