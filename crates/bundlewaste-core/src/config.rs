//! Configuration types.
//!
//! Every threshold used by detection and classification lives here and is
//! passed into constructors explicitly.

use derive_builder::Builder;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::disk::{DEFAULT_BLOCK_SIZE, DiskModel};
use crate::error::DetectError;

/// Configuration for filesystem duplicate detection.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct DetectConfig {
    /// Filesystem block size used for aligned sizes.
    #[builder(default = "DEFAULT_BLOCK_SIZE")]
    pub block_size: u64,

    /// Read buffer size for hashing.
    #[builder(default = "64 * 1024")]
    pub chunk_size: usize,

    /// Number of hashing threads (0 = rayon global pool).
    #[builder(default = "0")]
    pub threads: usize,

    /// File-name glob patterns that are duplicated by platform design and
    /// never hashed.
    #[builder(default = "default_exclude_names()")]
    pub exclude_names: Vec<String>,

    /// Follow symbolic links while walking.
    #[builder(default = "false")]
    pub follow_symlinks: bool,
}

fn default_exclude_names() -> Vec<String> {
    vec!["PrivacyInfo.xcprivacy".to_string()]
}

impl DetectConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.block_size == Some(0) {
            return Err("Block size must be non-zero".to_string());
        }
        if self.chunk_size == Some(0) {
            return Err("Chunk size must be non-zero".to_string());
        }
        if let Some(patterns) = &self.exclude_names {
            for pattern in patterns {
                Glob::new(pattern)
                    .map_err(|e| format!("Invalid exclude pattern {pattern:?}: {e}"))?;
            }
        }
        Ok(())
    }
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            chunk_size: 64 * 1024,
            threads: 0,
            exclude_names: default_exclude_names(),
            follow_symlinks: false,
        }
    }
}

impl DetectConfig {
    /// Create a new config builder.
    pub fn builder() -> DetectConfigBuilder {
        DetectConfigBuilder::default()
    }

    /// Disk model for this block size.
    pub fn disk_model(&self) -> DiskModel {
        DiskModel::new(self.block_size)
    }

    /// Compile the exclusion patterns.
    pub fn exclude_set(&self) -> Result<GlobSet, DetectError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_names {
            let glob = Glob::new(pattern).map_err(|e| DetectError::InvalidConfig {
                message: format!("invalid exclude pattern {pattern:?}: {e}"),
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| DetectError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Check values that deserialization cannot reject on its own.
    pub fn validate(&self) -> Result<(), DetectError> {
        if self.block_size == 0 || self.chunk_size == 0 {
            return Err(DetectError::InvalidConfig {
                message: "block size and chunk size must be non-zero".to_string(),
            });
        }
        self.exclude_set().map(|_| ())
    }
}

/// Thresholds and name lists used by the rule pipeline.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(default)]
pub struct ClassifierConfig {
    /// Duplicates at or below this aligned size are never worth reporting.
    #[builder(default = "DEFAULT_BLOCK_SIZE")]
    pub small_duplicate_threshold: u64,

    /// Wasted bytes above which an actionable duplicate is high priority.
    #[builder(default = "500 * 1024")]
    pub high_priority_bytes: u64,

    /// Wasted bytes at or above which an actionable duplicate is medium priority.
    #[builder(default = "100 * 1024")]
    pub medium_priority_bytes: u64,

    /// Framework names treated as third-party SDKs on exact match.
    #[builder(default = "default_sdk_exact_names()")]
    pub sdk_exact_names: Vec<String>,

    /// Framework-name prefixes treated as third-party SDKs.
    #[builder(default = "default_sdk_prefixes()")]
    pub sdk_prefixes: Vec<String>,

    /// Fraction of files that must belong to known SDKs.
    #[builder(default = "0.5")]
    pub sdk_match_ratio: f64,

    /// Share of the artifact size at which a duplicate is high severity.
    #[builder(default = "0.10")]
    pub high_severity_ratio: f64,

    /// Share of the artifact size at which a duplicate is medium severity.
    #[builder(default = "0.05")]
    pub medium_severity_ratio: f64,
}

fn default_sdk_exact_names() -> Vec<String> {
    [
        "GoogleMaps",
        "GoogleMapsBase",
        "GoogleMapsCore",
        "GooglePlaces",
        "GoogleSignIn",
        "FBSDKCoreKit",
        "FBSDKLoginKit",
        "FBSDKShareKit",
        "FBAudienceNetwork",
        "Crashlytics",
        "Fabric",
        "FirebaseCore",
        "FirebaseAnalytics",
        "FirebaseMessaging",
        "FirebaseCrashlytics",
        "Alamofire",
        "AFNetworking",
        "SDWebImage",
        "Kingfisher",
        "Realm",
        "RealmSwift",
        "Lottie",
        "Stripe",
        "StripeCore",
        "Sentry",
        "AppsFlyerLib",
        "AdjustSdk",
        "Branch",
        "Mixpanel",
        "Amplitude",
        "OneSignal",
        "Appboy",
        "BrazeKit",
        "Intercom",
        "ZendeskSDK",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_sdk_prefixes() -> Vec<String> {
    ["Firebase", "Google", "FB", "FIR", "GUL", "GTM"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            small_duplicate_threshold: DEFAULT_BLOCK_SIZE,
            high_priority_bytes: 500 * 1024,
            medium_priority_bytes: 100 * 1024,
            sdk_exact_names: default_sdk_exact_names(),
            sdk_prefixes: default_sdk_prefixes(),
            sdk_match_ratio: 0.5,
            high_severity_ratio: 0.10,
            medium_severity_ratio: 0.05,
        }
    }
}

impl ClassifierConfig {
    /// Create a new config builder.
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }

    /// Whether a framework name belongs to a known third-party SDK.
    pub fn is_known_sdk(&self, framework: &str) -> bool {
        if framework.is_empty() {
            return false;
        }
        self.sdk_exact_names.iter().any(|n| n == framework)
            || self.sdk_prefixes.iter().any(|p| framework.starts_with(p.as_str()))
    }
}

/// Configuration for asset-catalog duplicate detection.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(default)]
pub struct AssetConfig {
    /// Renditions smaller than this are not reported.
    #[builder(default = "512")]
    pub min_asset_size: u64,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self { min_asset_size: 512 }
    }
}

impl AssetConfig {
    /// Create a new config builder.
    pub fn builder() -> AssetConfigBuilder {
        AssetConfigBuilder::default()
    }
}

/// Combined configuration, loadable from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub detect: DetectConfig,
    pub classifier: ClassifierConfig,
    pub assets: AssetConfig,
}
