//! Turn actionable duplicates into optimization recommendations.

use serde::{Deserialize, Serialize};

use bundlewaste_core::{ClassifierConfig, Priority};

use crate::classifier::CategorizationResult;
use crate::paths::file_name;

/// A recommendation carried into the final report.
///
/// Names what is affected and how many bytes could be recovered; how to fix
/// it is left to the reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Optimization {
    pub title: String,
    pub severity: Priority,
    pub estimated_savings: u64,
    pub affected_paths: Vec<String>,
    /// Rule that assigned the priority, empty for the default result.
    pub rule_id: String,
    pub reason: String,
}

/// One optimization per actionable duplicate, largest savings first.
pub fn duplicate_optimizations(
    result: &CategorizationResult,
    total_size: u64,
    config: &ClassifierConfig,
) -> Vec<Optimization> {
    let mut optimizations: Vec<Optimization> = result
        .actionable
        .iter()
        .map(|classified| {
            let set = &classified.set;
            let name = set.files.first().map(|f| file_name(f)).unwrap_or_default();
            Optimization {
                title: format!("Duplicate file: {name} ({} copies)", set.count),
                severity: classified.severity(total_size, config),
                estimated_savings: set.wasted_size,
                affected_paths: set.files.clone(),
                rule_id: classified.result.rule_id.clone(),
                reason: classified.result.reason.clone(),
            }
        })
        .collect();

    optimizations.sort_by(|a, b| {
        b.estimated_savings
            .cmp(&a.estimated_savings)
            .then_with(|| b.severity.cmp(&a.severity))
    });
    optimizations
}
