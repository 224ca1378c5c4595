//! Bundle-aware duplicate classification for bundlewaste.
//!
//! This crate decides which duplicates inside a mobile app bundle are real,
//! removable waste and which are required by platform packaging:
//!
//! - **Path analysis** - recognize `.framework`, `.appex`, `.app`,
//!   `.xcassets` and `.lproj` boundaries and locale variant directories
//! - **Rule pipeline** - ordered, stateless rules; first decisive match wins
//! - **Asset catalogs** - duplicates among compiled asset renditions
//! - **Recommendations** - actionable duplicates with severity and savings
//!
//! # Classification
//!
//! ```rust,ignore
//! use bundlewaste_analyze::Classifier;
//! use bundlewaste_scan::DuplicateDetector;
//!
//! let report = DuplicateDetector::new().detect("/tmp/extracted").unwrap();
//! let result = Classifier::default().categorize(report.sets);
//!
//! for item in &result.actionable {
//!     println!("{} wasted: {:?}", item.set.wasted_size, item.set.files);
//! }
//! ```
//!
//! # Full analysis
//!
//! ```rust,ignore
//! use bundlewaste_analyze::BundleAnalyzer;
//!
//! let report = BundleAnalyzer::new().analyze("/tmp/extracted", &[], None);
//! println!("{} bytes recoverable", report.total_savings());
//! ```

mod analysis;
pub mod assets;
mod classifier;
pub mod locale;
pub mod paths;
mod recommend;
pub mod rules;

pub use analysis::{AnalysisReport, BundleAnalyzer};
pub use assets::AssetDuplicateDetector;
pub use classifier::{CategorizationResult, Classified, Classifier};
pub use recommend::{Optimization, duplicate_optimizations};
pub use rules::{PriorityThresholds, Rule, RuleRegistry};

// Re-export core types
pub use bundlewaste_core::{
    AnalyzerConfig, AssetCatalog, AssetRecord, BundleInfo, BundleType, ClassifierConfig,
    DuplicateSet, FilterResult, Priority,
};
