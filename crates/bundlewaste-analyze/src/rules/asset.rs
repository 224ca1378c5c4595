use bundlewaste_core::{DuplicateSet, FilterResult};

use super::{PriorityThresholds, Rule};
use crate::paths::{bundle_boundaries, distinct_bundles, extension};

const ID: &str = "rule-12-asset-duplication";

/// Media extensions that are plain resources and safe to deduplicate.
pub const ASSET_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "heic", "pdf", "svg", "mp3", "wav", "m4a", "caf", "aac",
    "mp4", "mov",
];

/// The same media file bundled twice inside one component.
pub struct AssetDuplicationRule {
    thresholds: PriorityThresholds,
}

impl AssetDuplicationRule {
    pub fn new(thresholds: PriorityThresholds) -> Self {
        Self { thresholds }
    }
}

/// First two path segments, when the path has at least one more.
fn leading_segments(path: &str) -> Option<&str> {
    let first = path.find('/')?;
    let second = first + 1 + path[first + 1..].find('/')?;
    Some(&path[..second])
}

impl Rule for AssetDuplicationRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Asset duplication"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        if set.files.is_empty()
            || !set
                .files
                .iter()
                .all(|f| ASSET_EXTENSIONS.contains(&extension(f).as_str()))
        {
            return FilterResult::no_match();
        }

        let one_bundle = set.files.iter().all(|f| bundle_boundaries(f).in_bundle)
            && distinct_bundles(&set.files).len() == 1;

        let first = leading_segments(&set.files[0]);
        let shared_prefix =
            first.is_some() && set.files.iter().all(|f| leading_segments(f) == first);

        if one_bundle || shared_prefix {
            FilterResult::prioritized(
                ID,
                format!("Same asset bundled {} times in one component", set.count),
                self.thresholds.priority_for(set.wasted_size),
            )
        } else {
            FilterResult::no_match()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlewaste_core::Priority;

    fn rule() -> AssetDuplicationRule {
        AssetDuplicationRule::new(PriorityThresholds::default())
    }

    #[test]
    fn test_leading_segments() {
        assert_eq!(leading_segments("Payload/App.app/a.png"), Some("Payload/App.app"));
        assert_eq!(leading_segments("res/a.png"), None);
        assert_eq!(leading_segments("a.png"), None);
    }

    #[test]
    fn test_images_in_one_bundle() {
        let set = DuplicateSet::new(
            "00",
            300 * 1024,
            vec!["App.app/images/hero.png".into(), "App.app/legacy/hero.png".into()],
        );
        let result = rule().evaluate(&set);
        assert!(!result.should_filter);
        assert_eq!(result.priority, Some(Priority::Medium));
    }

    #[test]
    fn test_android_resources_share_prefix() {
        let set = DuplicateSet::new(
            "00",
            8192,
            vec!["res/drawable-hdpi/icon.png".into(), "res/drawable-xhdpi/icon.png".into()],
        );
        assert!(rule().evaluate(&set).priority.is_none());

        let set = DuplicateSet::new(
            "00",
            8192,
            vec!["base/res/drawable/icon.png".into(), "base/res/raw/icon.png".into()],
        );
        assert_eq!(rule().evaluate(&set).priority, Some(Priority::Low));
    }

    #[test]
    fn test_non_media_no_match() {
        let set = DuplicateSet::new(
            "00",
            8192,
            vec!["App.app/a/data.bin".into(), "App.app/b/data.bin".into()],
        );
        assert!(!rule().evaluate(&set).is_decisive());
    }
}
