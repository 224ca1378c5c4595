use std::collections::BTreeSet;

use bundlewaste_core::{DuplicateSet, FilterResult};

use super::Rule;
use crate::paths::container;

const ID: &str = "rule-5-framework-scripts";

/// Helper scripts CocoaPods and Carthage copy into every framework they embed.
pub const FRAMEWORK_SCRIPTS: &[&str] = &[
    "strip-frameworks.sh",
    "strip_frameworks.sh",
    "copy-frameworks.sh",
    "copy_frameworks.sh",
    "embed-frameworks.sh",
    "resources.sh",
    "frameworks.sh",
    "install_resources.sh",
    "copy-dsyms.sh",
    "carthage-build.sh",
];

pub struct FrameworkScriptsRule;

impl Rule for FrameworkScriptsRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Framework build scripts"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        if !set.file_names().all(|name| FRAMEWORK_SCRIPTS.contains(&name)) {
            return FilterResult::no_match();
        }

        let containers: BTreeSet<String> = set.files.iter().map(|f| container(f)).collect();
        if containers.len() >= 2 {
            FilterResult::filtered(
                ID,
                format!("Dependency-manager script embedded in {} locations", containers.len()),
            )
        } else {
            FilterResult::no_match()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::set_of;

    #[test]
    fn test_scripts_across_frameworks_filtered() {
        let set = set_of(
            8192,
            &[
                "App.app/Frameworks/A.framework/strip-frameworks.sh",
                "App.app/Frameworks/B.framework/strip-frameworks.sh",
            ],
        );
        assert!(FrameworkScriptsRule.evaluate(&set).should_filter);
    }

    #[test]
    fn test_scripts_outside_bundles_filtered() {
        let set = set_of(8192, &["scripts/a/resources.sh", "scripts/b/resources.sh"]);
        assert!(FrameworkScriptsRule.evaluate(&set).should_filter);
    }

    #[test]
    fn test_single_location_not_filtered() {
        let set = set_of(
            8192,
            &[
                "App.app/Frameworks/A.framework/copy-frameworks.sh",
                "App.app/Frameworks/A.framework/Scripts/copy-frameworks.sh",
            ],
        );
        assert!(!FrameworkScriptsRule.evaluate(&set).is_decisive());
    }

    #[test]
    fn test_unknown_script_ignored() {
        let set = set_of(8192, &["a/build.sh", "b/build.sh"]);
        assert!(!FrameworkScriptsRule.evaluate(&set).is_decisive());
    }
}
