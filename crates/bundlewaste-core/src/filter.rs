//! Rule evaluation results.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Priority assigned to an actionable duplicate, also used as report severity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Outcome of evaluating one rule against one duplicate set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    /// The set is a required platform pattern and must not be reported.
    pub should_filter: bool,
    /// Human-readable explanation.
    pub reason: String,
    /// Identifier of the deciding rule; empty for the default result.
    pub rule_id: String,
    /// Priority assigned by an actionable rule.
    pub priority: Option<Priority>,
}

impl FilterResult {
    /// The rule does not apply.
    pub fn no_match() -> Self {
        Self {
            should_filter: false,
            reason: String::new(),
            rule_id: String::new(),
            priority: None,
        }
    }

    /// The set is architecturally required.
    pub fn filtered(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            should_filter: true,
            reason: reason.into(),
            rule_id: rule_id.into(),
            priority: None,
        }
    }

    /// The set is actionable at the given priority.
    pub fn prioritized(
        rule_id: impl Into<String>,
        reason: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            should_filter: false,
            reason: reason.into(),
            rule_id: rule_id.into(),
            priority: Some(priority),
        }
    }

    /// Result used when no rule matched.
    pub fn actionable_default() -> Self {
        Self {
            reason: "No platform rule applies".to_string(),
            ..Self::no_match()
        }
    }

    /// Whether this result ends rule evaluation.
    pub fn is_decisive(&self) -> bool {
        self.should_filter || self.priority.is_some()
    }
}
