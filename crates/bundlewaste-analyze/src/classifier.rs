//! Partition duplicate sets into actionable and filtered.

use serde::{Deserialize, Serialize};
use tracing::debug;

use bundlewaste_core::{ClassifierConfig, DuplicateSet, FilterResult, Priority};

use crate::rules::RuleRegistry;

/// A duplicate set together with the result that decided its fate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classified {
    pub set: DuplicateSet,
    pub result: FilterResult,
}

impl Classified {
    /// Report severity.
    ///
    /// A rule-assigned priority wins; otherwise severity follows the wasted
    /// bytes as a share of the whole artifact.
    pub fn severity(&self, total_size: u64, config: &ClassifierConfig) -> Priority {
        if let Some(priority) = self.result.priority {
            return priority;
        }
        if total_size == 0 {
            return Priority::Low;
        }
        let ratio = self.set.wasted_size as f64 / total_size as f64;
        if ratio >= config.high_severity_ratio {
            Priority::High
        } else if ratio >= config.medium_severity_ratio {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

/// The classifier's partition of all input sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorizationResult {
    /// Duplicates worth surfacing as optimizations.
    pub actionable: Vec<Classified>,
    /// Required platform duplicates; never shown to the user.
    pub filtered: Vec<Classified>,
    /// Number of input sets.
    pub total_count: usize,
}

impl CategorizationResult {
    /// Actionable sets without their results.
    pub fn actionable_sets(&self) -> impl Iterator<Item = &DuplicateSet> {
        self.actionable.iter().map(|c| &c.set)
    }

    /// Filtered sets without their results.
    pub fn filtered_sets(&self) -> impl Iterator<Item = &DuplicateSet> {
        self.filtered.iter().map(|c| &c.set)
    }

    /// Bytes recoverable from actionable duplicates.
    pub fn actionable_waste(&self) -> u64 {
        self.actionable.iter().map(|c| c.set.wasted_size).sum()
    }

    /// Bytes in duplicates the platform requires.
    pub fn filtered_waste(&self) -> u64 {
        self.filtered.iter().map(|c| c.set.wasted_size).sum()
    }
}

/// Runs the rule pipeline over duplicate sets.
pub struct Classifier {
    registry: RuleRegistry,
    config: ClassifierConfig,
}

impl Classifier {
    /// Classifier with the built-in rules.
    pub fn new(config: ClassifierConfig) -> Self {
        let registry = RuleRegistry::default_rules(&config);
        Self { registry, config }
    }

    /// Classifier over a caller-built registry.
    pub fn with_registry(registry: RuleRegistry, config: ClassifierConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Decide one set.
    pub fn classify(&self, set: &DuplicateSet) -> FilterResult {
        self.registry.evaluate(set)
    }

    /// Partition sets, preserving input order within each side.
    pub fn categorize(&self, sets: Vec<DuplicateSet>) -> CategorizationResult {
        let total_count = sets.len();
        let mut result = CategorizationResult {
            total_count,
            ..Default::default()
        };

        for set in sets {
            let decision = self.classify(&set);
            let classified = Classified { set, result: decision };
            if classified.result.should_filter {
                result.filtered.push(classified);
            } else {
                result.actionable.push(classified);
            }
        }

        debug!(
            total = total_count,
            actionable = result.actionable.len(),
            filtered = result.filtered.len(),
            "duplicates categorized"
        );

        result
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
