use bundlewaste_core::{ClassifierConfig, DuplicateSet, FilterResult};

use super::Rule;
use crate::paths::extract_framework_name;

const ID: &str = "rule-7-third-party-sdk";

/// Duplicates inside vendor SDKs cannot be fixed by the app developer.
///
/// Prefix matching is inherited policy and will also claim first-party
/// frameworks that happen to share a prefix (`Googleland.framework`).
pub struct ThirdPartySdkRule {
    config: ClassifierConfig,
}

impl ThirdPartySdkRule {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Rule for ThirdPartySdkRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Third-party SDK"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        let total = set.files.len();
        if total == 0 {
            return FilterResult::no_match();
        }

        let matched = set
            .files
            .iter()
            .filter(|f| self.config.is_known_sdk(&extract_framework_name(f)))
            .count();

        if matched > 0 && matched as f64 >= self.config.sdk_match_ratio * total as f64 {
            FilterResult::filtered(
                ID,
                format!("{matched} of {total} copies live inside third-party SDK frameworks"),
            )
        } else {
            FilterResult::no_match()
        }
    }
}
