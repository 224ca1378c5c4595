//! Asset-catalog records produced by an external catalog parser.

use serde::{Deserialize, Serialize};

/// One rendition inside a compiled asset catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// Asset name as authored in the catalog.
    pub name: String,
    /// Rendition type, e.g. `Image`, `Icon`, `PDF`, `Color`, `Data`.
    #[serde(rename = "type", default)]
    pub asset_type: String,
    /// Device idiom (`phone`, `pad`, `universal`, ...).
    #[serde(default)]
    pub idiom: String,
    /// Display scale; 0 when unknown.
    #[serde(default)]
    pub scale: u32,
    /// Rendition size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Content digest; empty when the parser could not compute one.
    #[serde(default, alias = "sha1Digest", alias = "digest")]
    pub content_digest: String,
}

/// A parsed asset catalog identified by its container path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCatalog {
    /// Path of the `.car` file relative to the analyzed root.
    pub path: String,
    /// Renditions found in the catalog.
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
}
