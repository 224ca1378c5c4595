use bundlewaste_core::{DuplicateSet, FilterResult};

use super::Rule;

const ID: &str = "rule-10-small-duplicates";

/// Duplicates that fit in one filesystem block save too little to report.
pub struct SmallDuplicateRule {
    threshold: u64,
}

impl SmallDuplicateRule {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }
}

impl Rule for SmallDuplicateRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Small duplicates"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        if set.size <= self.threshold {
            FilterResult::filtered(
                ID,
                format!(
                    "{} bytes per copy is at or below the {} byte floor",
                    set.size, self.threshold
                ),
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
    fn test_floor_is_inclusive() {
        let rule = SmallDuplicateRule::new(4096);
        assert!(rule.evaluate(&set_of(0, &["a", "b"])).should_filter);
        assert!(rule.evaluate(&set_of(4096, &["a", "b", "c", "d"])).should_filter);
        assert!(!rule.evaluate(&set_of(8192, &["a", "b"])).should_filter);
    }
}
