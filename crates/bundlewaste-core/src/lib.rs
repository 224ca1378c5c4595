//! Core types and configuration for bundlewaste.
//!
//! This crate provides the data model shared by the scanning and analysis
//! crates: duplicate sets, bundle descriptors, rule results, asset-catalog
//! input records, the disk-usage model and all tunable thresholds.

mod asset;
mod bundle;
mod config;
mod disk;
mod duplicate;
mod error;
mod filter;

pub use asset::{AssetCatalog, AssetRecord};
pub use bundle::{BundleInfo, BundleType};
pub use config::{
    AnalyzerConfig, AssetConfig, AssetConfigBuilder, ClassifierConfig, ClassifierConfigBuilder,
    DetectConfig, DetectConfigBuilder,
};
pub use disk::{DEFAULT_BLOCK_SIZE, DiskModel, block_aligned_size};
pub use duplicate::{ContentHash, DuplicateSet};
pub use error::DetectError;
pub use filter::{FilterResult, Priority};
