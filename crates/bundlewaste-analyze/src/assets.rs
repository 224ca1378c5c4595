//! Duplicate detection over compiled asset-catalog renditions.
//!
//! Works on per-asset digests supplied by an external catalog parser instead
//! of file bytes. Renditions are grouped by digest across every catalog;
//! device-idiom variants are *not* excluded here. The rule pipeline decides
//! later whether they are removable.

use indexmap::IndexMap;
use tracing::debug;

use bundlewaste_core::{AssetCatalog, AssetConfig, AssetRecord, DuplicateSet};

/// Finds identical renditions inside and across asset catalogs.
pub struct AssetDuplicateDetector {
    config: AssetConfig,
}

impl AssetDuplicateDetector {
    pub fn new() -> Self {
        Self::with_config(AssetConfig::default())
    }

    pub fn with_config(config: AssetConfig) -> Self {
        Self { config }
    }

    /// Group renditions by digest, sorted by wasted bytes descending.
    ///
    /// Renditions without a digest are ignored, as are groups whose asset
    /// size is below the configured minimum.
    pub fn detect(&self, catalogs: &[AssetCatalog]) -> Vec<DuplicateSet> {
        let mut by_digest: IndexMap<&str, Vec<(&str, &AssetRecord)>> = IndexMap::new();
        for catalog in catalogs {
            for asset in &catalog.assets {
                if asset.content_digest.is_empty() {
                    continue;
                }
                by_digest
                    .entry(asset.content_digest.as_str())
                    .or_default()
                    .push((catalog.path.as_str(), asset));
            }
        }

        let mut sets: Vec<DuplicateSet> = by_digest
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .filter_map(|(digest, members)| {
                let size = members[0].1.size;
                if size < self.config.min_asset_size {
                    return None;
                }
                let files = members
                    .iter()
                    .map(|(catalog, asset)| virtual_asset_path(catalog, asset))
                    .collect();
                Some(DuplicateSet::new(digest, size, files))
            })
            .collect();

        sets.sort_by(|a, b| b.wasted_size.cmp(&a.wasted_size));

        debug!(catalogs = catalogs.len(), sets = sets.len(), "asset catalog duplicates found");
        sets
    }
}

impl Default for AssetDuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// `<catalog>/<name>[~idiom][@Nx].<ext>`
///
/// `universal` idioms and unknown scales are omitted.
pub fn virtual_asset_path(catalog_path: &str, asset: &AssetRecord) -> String {
    let mut path = format!("{}/{}", catalog_path.trim_end_matches('/'), asset.name);
    if !asset.idiom.is_empty() && !asset.idiom.eq_ignore_ascii_case("universal") {
        path.push('~');
        path.push_str(&asset.idiom);
    }
    if asset.scale > 0 {
        path.push_str(&format!("@{}x", asset.scale));
    }
    path.push('.');
    path.push_str(extension_for_type(&asset.asset_type));
    path
}

/// File extension used for a rendition type.
pub fn extension_for_type(asset_type: &str) -> &'static str {
    match asset_type.to_ascii_lowercase().as_str() {
        "image" | "icon" | "imageset" | "appicon" | "png" => "png",
        "jpeg" | "jpg" => "jpg",
        "pdf" | "vector" => "pdf",
        "svg" => "svg",
        "color" => "colorset",
        "data" => "data",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, idiom: &str, scale: u32, size: u64, digest: &str) -> AssetRecord {
        AssetRecord {
            name: name.to_string(),
            asset_type: "Image".to_string(),
            idiom: idiom.to_string(),
            scale,
            size,
            content_digest: digest.to_string(),
        }
    }

    #[test]
    fn test_virtual_path() {
        let a = asset("hero", "pad", 2, 10, "d");
        assert_eq!(
            virtual_asset_path("App.app/Assets.car", &a),
            "App.app/Assets.car/hero~pad@2x.png"
        );

        let a = asset("hero", "universal", 0, 10, "d");
        assert_eq!(virtual_asset_path("App.app/Assets.car/", &a), "App.app/Assets.car/hero.png");
    }

    #[test]
    fn test_extension_for_type() {
        assert_eq!(extension_for_type("Image"), "png");
        assert_eq!(extension_for_type("PDF"), "pdf");
        assert_eq!(extension_for_type("Mystery"), "bin");
    }

    #[test]
    fn test_groups_across_catalogs() {
        let catalogs = vec![
            AssetCatalog {
                path: "App.app/Assets.car".into(),
                assets: vec![asset("logo", "", 2, 2048, "aa"), asset("bg", "", 1, 9000, "bb")],
            },
            AssetCatalog {
                path: "App.app/PlugIns/W.appex/Assets.car".into(),
                assets: vec![
                    asset("logo", "", 2, 2048, "aa"),
                    asset("bg", "", 1, 9000, "bb"),
                    asset("bg2", "", 1, 9000, "bb"),
                ],
            },
        ];

        let sets = AssetDuplicateDetector::new().detect(&catalogs);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].content_hash, "bb");
        assert_eq!(sets[0].count, 3);
        assert_eq!(sets[0].wasted_size, 18000);
        assert_eq!(sets[1].wasted_size, 2048);
        assert_eq!(
            sets[1].files,
            vec!["App.app/Assets.car/logo@2x.png", "App.app/PlugIns/W.appex/Assets.car/logo@2x.png"]
        );
    }

    #[test]
    fn test_floor_and_missing_digest() {
        let catalogs = vec![AssetCatalog {
            path: "A.car".into(),
            assets: vec![
                asset("tiny", "", 1, 511, "t"),
                asset("tiny2", "", 1, 511, "t"),
                asset("nodigest", "", 1, 9000, ""),
                asset("nodigest2", "", 1, 9000, ""),
            ],
        }];
        assert!(AssetDuplicateDetector::new().detect(&catalogs).is_empty());
    }

    #[test]
    fn test_idiom_variants_are_reported() {
        let catalogs = vec![AssetCatalog {
            path: "App.app/Assets.car".into(),
            assets: vec![asset("hero", "phone", 2, 4000, "h"), asset("hero", "pad", 2, 4000, "h")],
        }];
        let sets = AssetDuplicateDetector::new().detect(&catalogs);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].wasted_size, 4000);
    }
}
