//! Bundle descriptors derived from path strings.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Kind of platform bundle recognized by its directory suffix.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BundleType {
    /// `.framework` directory.
    Framework,
    /// App extension (`.appex`).
    Appex,
    /// Application bundle (`.app`).
    App,
    /// Asset catalog source directory (`.xcassets`).
    Xcassets,
    /// Localization directory (`.lproj`).
    Lproj,
}

impl BundleType {
    /// Path marker including the leading dot and trailing slash.
    pub fn marker(&self) -> &'static str {
        match self {
            BundleType::Framework => ".framework/",
            BundleType::Appex => ".appex/",
            BundleType::App => ".app/",
            BundleType::Xcassets => ".xcassets/",
            BundleType::Lproj => ".lproj/",
        }
    }
}

/// The innermost bundle containing a path.
///
/// Recomputed per query; carries no identity beyond `full_path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleInfo {
    /// Bundle name without its suffix (`GoogleMaps` for `GoogleMaps.framework`).
    pub name: CompactString,
    /// Bundle kind, `None` when the path is not inside any bundle.
    pub bundle_type: Option<BundleType>,
    /// Whether any bundle marker was found.
    pub in_bundle: bool,
    /// Path of the bundle directory itself, without trailing slash.
    pub full_path: String,
}

impl BundleInfo {
    /// Descriptor for a path outside every bundle.
    pub fn none() -> Self {
        Self {
            name: CompactString::default(),
            bundle_type: None,
            in_bundle: false,
            full_path: String::new(),
        }
    }

    /// Descriptor for a recognized bundle.
    pub fn new(
        name: impl Into<CompactString>,
        bundle_type: BundleType,
        full_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            bundle_type: Some(bundle_type),
            in_bundle: true,
            full_path: full_path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_bundle_type_strings() {
        assert_eq!(BundleType::Framework.to_string(), "framework");
        assert_eq!(BundleType::from_str("appex").unwrap(), BundleType::Appex);
        assert_eq!(BundleType::Lproj.marker(), ".lproj/");
    }

    #[test]
    fn test_none_is_not_in_bundle() {
        let info = BundleInfo::none();
        assert!(!info.in_bundle);
        assert!(info.bundle_type.is_none());
    }
}
