//! End-to-end duplicate analysis of one extracted artifact.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use bundlewaste_core::{AnalyzerConfig, AssetCatalog, DuplicateSet};
use bundlewaste_scan::DuplicateDetector;

use crate::assets::AssetDuplicateDetector;
use crate::classifier::{CategorizationResult, Classifier};
use crate::recommend::{Optimization, duplicate_optimizations};

/// Everything duplicate analysis contributes to the artifact report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Root of the extracted artifact.
    pub root: PathBuf,
    /// When the analysis ran.
    pub generated_at: DateTime<Utc>,
    /// Artifact size used for severity.
    pub total_size: u64,
    /// Filesystem and asset duplicates, partitioned.
    pub duplicates: CategorizationResult,
    /// Recommendations derived from actionable duplicates.
    pub optimizations: Vec<Optimization>,
    /// Non-fatal problems, e.g. a failed detection pass.
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    /// Bytes recoverable from all recommendations.
    pub fn total_savings(&self) -> u64 {
        self.optimizations.iter().map(|o| o.estimated_savings).sum()
    }
}

/// Runs detection and classification with fresh state per call.
pub struct BundleAnalyzer {
    config: AnalyzerConfig,
}

impl BundleAnalyzer {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze an extracted artifact.
    ///
    /// A failed filesystem pass is not fatal: it is logged, recorded as a
    /// warning, and analysis continues with asset duplicates only.
    /// `total_size` defaults to the block-aligned size of the walked tree.
    pub fn analyze(
        &self,
        root: impl AsRef<Path>,
        catalogs: &[AssetCatalog],
        total_size: Option<u64>,
    ) -> AnalysisReport {
        let root = root.as_ref();
        let mut warnings = Vec::new();

        let detector = DuplicateDetector::with_config(self.config.detect.clone());
        let (mut sets, walked_size): (Vec<DuplicateSet>, u64) = match detector.detect(root) {
            Ok(report) => (report.sets, report.total_size),
            Err(err) => {
                warn!(
                    root = %root.display(),
                    error = %err,
                    "duplicate detection failed; continuing without file duplicates"
                );
                warnings.push(format!("Duplicate detection failed: {err}"));
                (Vec::new(), 0)
            }
        };

        let asset_sets =
            AssetDuplicateDetector::with_config(self.config.assets.clone()).detect(catalogs);
        sets.extend(asset_sets);

        let total_size = total_size.unwrap_or(walked_size);
        let classifier = Classifier::new(self.config.classifier.clone());
        let duplicates = classifier.categorize(sets);
        let optimizations = duplicate_optimizations(&duplicates, total_size, classifier.config());

        info!(
            actionable = duplicates.actionable.len(),
            filtered = duplicates.filtered.len(),
            savings = optimizations.iter().map(|o| o.estimated_savings).sum::<u64>(),
            "duplicate analysis complete"
        );

        AnalysisReport {
            root: root.to_path_buf(),
            generated_at: Utc::now(),
            total_size,
            duplicates,
            optimizations,
            warnings,
        }
    }
}

impl Default for BundleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
