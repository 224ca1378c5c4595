//! Ordered rule pipeline for duplicate classification.
//!
//! Each rule inspects one [`DuplicateSet`] and either declares it a required
//! platform pattern (filtered), assigns it a priority (actionable), or lets
//! it fall through. Rules run in registration order and the first decisive
//! result wins, so registration order is policy:
//!
//! 1. Architectural filters (Info.plist, NIBs, catalogs, localization, ...)
//! 2. The small-duplicate size floor
//! 3. Priority-assigning actionable rules
//!
//! An architectural pattern is therefore never downgraded to "low priority",
//! and an actionable pattern is never dropped by a broader later filter.

mod asset;
mod contents_json;
mod device_variant;
mod extension;
mod font;
mod info_plist;
mod localization;
mod metadata;
mod nib;
mod scripts;
mod sdk;
mod small;

use bundlewaste_core::{ClassifierConfig, DuplicateSet, FilterResult, Priority};
use tracing::trace;

pub use asset::AssetDuplicationRule;
pub use contents_json::ContentsJsonRule;
pub use device_variant::DeviceVariantRule;
pub use extension::ExtensionDuplicationRule;
pub use font::FontExtensionRule;
pub use info_plist::InfoPlistRule;
pub use localization::LocalizationRule;
pub use metadata::FrameworkMetadataRule;
pub use nib::NibVariantsRule;
pub use scripts::FrameworkScriptsRule;
pub use sdk::ThirdPartySdkRule;
pub use small::SmallDuplicateRule;

/// A stateless classification rule.
///
/// Rules never fail: a rule that cannot decide returns
/// [`FilterResult::no_match`].
pub trait Rule: Send + Sync {
    /// Stable identifier, e.g. `rule-1-info-plist`.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Inspect one duplicate set.
    fn evaluate(&self, set: &DuplicateSet) -> FilterResult;
}

/// Ordered collection of rules.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry holding the built-in rules in their required order.
    pub fn default_rules(config: &ClassifierConfig) -> Self {
        let mut registry = Self::new();
        registry
            .register(InfoPlistRule)
            .register(NibVariantsRule)
            .register(ContentsJsonRule)
            .register(LocalizationRule)
            .register(FrameworkScriptsRule)
            .register(FrameworkMetadataRule)
            .register(ThirdPartySdkRule::new(config))
            .register(FontExtensionRule)
            .register(DeviceVariantRule)
            .register(SmallDuplicateRule::new(config.small_duplicate_threshold))
            .register(ExtensionDuplicationRule::new(PriorityThresholds::from(config)))
            .register(AssetDuplicationRule::new(PriorityThresholds::from(config)));
        registry
    }

    /// Append a rule after every rule already registered.
    pub fn register(&mut self, rule: impl Rule + 'static) -> &mut Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Evaluate rules in order; the first decisive result wins.
    ///
    /// Falls back to an actionable, unscored result.
    pub fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        for rule in &self.rules {
            let result = rule.evaluate(set);
            if result.is_decisive() {
                trace!(
                    rule = rule.id(),
                    hash = %set.content_hash,
                    filtered = result.should_filter,
                    "rule matched"
                );
                return result;
            }
        }
        FilterResult::actionable_default()
    }

    /// Rule identifiers in registration order.
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Registered rules in order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Wasted-byte cutoffs for priority assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityThresholds {
    /// Strictly above this is high.
    pub high_bytes: u64,
    /// At or above this is medium.
    pub medium_bytes: u64,
}

impl PriorityThresholds {
    /// Priority for a duplicate wasting `wasted` bytes.
    pub fn priority_for(&self, wasted: u64) -> Priority {
        if wasted > self.high_bytes {
            Priority::High
        } else if wasted >= self.medium_bytes {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

impl From<&ClassifierConfig> for PriorityThresholds {
    fn from(config: &ClassifierConfig) -> Self {
        Self {
            high_bytes: config.high_priority_bytes,
            medium_bytes: config.medium_priority_bytes,
        }
    }
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self::from(&ClassifierConfig::default())
    }
}

#[cfg(test)]
pub(crate) fn set_of(size: u64, files: &[&str]) -> DuplicateSet {
    DuplicateSet::new("00", size, files.iter().map(|f| f.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFilter;

    impl Rule for AlwaysFilter {
        fn id(&self) -> &str {
            "test-always"
        }
        fn name(&self) -> &str {
            "Always filter"
        }
        fn evaluate(&self, _set: &DuplicateSet) -> FilterResult {
            FilterResult::filtered(self.id(), "always")
        }
    }

    #[test]
    fn test_default_registration_order() {
        let registry = RuleRegistry::default_rules(&ClassifierConfig::default());
        assert_eq!(
            registry.rule_ids(),
            vec![
                "rule-1-info-plist",
                "rule-2-nib-variants",
                "rule-3-contents-json",
                "rule-4-localization",
                "rule-5-framework-scripts",
                "rule-6-framework-metadata",
                "rule-7-third-party-sdk",
                "rule-8-font-extension",
                "rule-9-device-variant",
                "rule-10-small-duplicates",
                "rule-11-extension-duplication",
                "rule-12-asset-duplication",
            ]
        );
    }

    #[test]
    fn test_empty_registry_is_actionable() {
        let registry = RuleRegistry::new();
        let result = registry.evaluate(&set_of(10, &["a", "b"]));
        assert!(!result.should_filter);
        assert!(result.priority.is_none());
        assert!(result.rule_id.is_empty());
    }

    #[test]
    fn test_first_decisive_rule_wins() {
        let mut registry = RuleRegistry::new();
        registry.register(SmallDuplicateRule::new(4096)).register(AlwaysFilter);

        let small = registry.evaluate(&set_of(4096, &["a", "b"]));
        assert_eq!(small.rule_id, "rule-10-small-duplicates");

        let large = registry.evaluate(&set_of(8192, &["a", "b"]));
        assert_eq!(large.rule_id, "test-always");
    }

    #[test]
    fn test_priority_thresholds() {
        let t = PriorityThresholds::default();
        assert_eq!(t.priority_for(600 * 1024), Priority::High);
        assert_eq!(t.priority_for(500 * 1024), Priority::Medium);
        assert_eq!(t.priority_for(100 * 1024), Priority::Medium);
        assert_eq!(t.priority_for(100 * 1024 - 1), Priority::Low);
    }
}
