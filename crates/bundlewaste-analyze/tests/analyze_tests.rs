use bundlewaste_analyze::locale::replace_locale_directory;
use bundlewaste_analyze::{
    AnalyzerConfig, AssetCatalog, AssetRecord, BundleAnalyzer, Classifier, ClassifierConfig,
    DuplicateSet, Priority, RuleRegistry,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn set(size: u64, files: &[&str]) -> DuplicateSet {
    DuplicateSet::new("feed", size, files.iter().map(|f| f.to_string()).collect())
}

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_info_plist_across_frameworks_is_rule_one() {
    let classifier = Classifier::default();
    let result = classifier.classify(&set(
        8192,
        &["Frameworks/A.framework/Info.plist", "Frameworks/B.framework/Info.plist"],
    ));
    assert!(result.should_filter);
    assert_eq!(result.rule_id, "rule-1-info-plist");
}

#[test]
fn test_info_plist_in_same_app_stays_actionable() {
    let classifier = Classifier::default();
    let result = classifier.classify(&set(
        8192,
        &["Payload/App.app/Info.plist", "Payload/App.app/Nested/Info.plist"],
    ));
    assert!(!result.should_filter);
}

#[test]
fn test_settings_bundle_strings_are_localization() {
    let classifier = Classifier::default();
    let result = classifier.classify(&set(
        8192,
        &[
            "Payload/App.app/en.lproj/Root.strings",
            "Payload/App.app/Settings.bundle/en.lproj/Root.strings",
        ],
    ));
    assert!(result.should_filter);
    assert_eq!(result.rule_id, "rule-4-localization");
}

#[test]
fn test_size_floor_filters_anything_small() {
    let classifier = Classifier::default();
    let cases: &[&[&str]] = &[
        &["App.app/a/x.bin", "App.app/b/x.bin"],
        &["App.app/images/hero.png", "App.app/legacy/hero.png"],
        &["App.app/model.bin", "App.app/PlugIns/W.appex/model.bin"],
        &["one", "two", "three"],
    ];
    for files in cases {
        for size in [0, 1, 2048, 4096] {
            let result = classifier.classify(&set(size, files));
            assert!(result.should_filter, "{files:?} at {size}");
        }
    }
}

#[test]
fn test_extension_priority_monotonic() {
    let classifier = Classifier::default();
    let files = &["Payload/App.app/model.bin", "Payload/App.app/PlugIns/Widget.appex/model.bin"];

    let expect = [
        (8 * 1024, Priority::Low),
        (96 * 1024, Priority::Low),
        (100 * 1024, Priority::Medium),
        (400 * 1024, Priority::Medium),
        (500 * 1024, Priority::Medium),
        (504 * 1024, Priority::High),
        (4 * 1024 * 1024, Priority::High),
    ];
    for (size, priority) in expect {
        let result = classifier.classify(&set(size, files));
        assert!(!result.should_filter);
        assert_eq!(result.rule_id, "rule-11-extension-duplication");
        assert_eq!(result.priority, Some(priority), "size {size}");
    }
}

#[test]
fn test_locale_round_trip() {
    assert_eq!(
        replace_locale_directory("Resources/es_419/messages.bin").as_deref(),
        Some("Resources/<LOCALE>/messages.bin")
    );
    assert_eq!(
        replace_locale_directory("Resources/es_419/messages.bin"),
        replace_locale_directory("Resources/es_MX/messages.bin")
    );
}

#[test]
fn test_sdk_rule_wins_over_asset_rule() {
    let classifier = Classifier::default();
    let sdk_set = set(
        64 * 1024,
        &[
            "Payload/App.app/Frameworks/GoogleMaps.framework/Resources/marker.png",
            "Payload/App.app/Frameworks/GoogleMapsBase.framework/Resources/marker.png",
        ],
    );
    let result = classifier.categorize(vec![sdk_set]);
    assert!(result.actionable.is_empty());
    assert_eq!(result.filtered[0].result.rule_id, "rule-7-third-party-sdk");
}

#[test]
fn test_custom_threshold_changes_floor() {
    let config = ClassifierConfig::builder()
        .small_duplicate_threshold(16 * 1024u64)
        .build()
        .unwrap();
    let classifier = Classifier::new(config);
    let result = classifier.classify(&set(8192, &["App.app/a/x.bin", "App.app/b/x.bin"]));
    assert!(result.should_filter);
    assert_eq!(result.rule_id, "rule-10-small-duplicates");
}

#[test]
fn test_registry_is_reusable_across_callers() {
    let registry = RuleRegistry::default_rules(&ClassifierConfig::default());
    let s = set(8192, &["App.app/a/x.bin", "App.app/b/x.bin"]);
    let first = registry.evaluate(&s);
    let second = registry.evaluate(&s);
    assert_eq!(first, second);
}

#[test]
fn test_end_to_end_bundle() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let plist = vec![b'p'; 5000];
    write(root, "Payload/App.app/Frameworks/A.framework/Info.plist", &plist);
    write(root, "Payload/App.app/Frameworks/B.framework/Info.plist", &plist);

    let marker = vec![b'm'; 9000];
    write(root, "Payload/App.app/Frameworks/GoogleMaps.framework/Resources/marker.png", &marker);
    write(
        root,
        "Payload/App.app/Frameworks/GoogleMapsBase.framework/Resources/marker.png",
        &marker,
    );

    let hero = vec![b'h'; 300 * 1024];
    write(root, "Payload/App.app/images/hero.png", &hero);
    write(root, "Payload/App.app/legacy/hero.png", &hero);

    let model = vec![b'x'; 600 * 1024];
    write(root, "Payload/App.app/model.bin", &model);
    write(root, "Payload/App.app/PlugIns/Widget.appex/model.bin", &model);

    write(root, "Payload/App.app/a/tiny.txt", b"hello world");
    write(root, "Payload/App.app/b/tiny.txt", b"hello world");

    write(root, "Payload/App.app/Frameworks/A.framework/PrivacyInfo.xcprivacy", b"privacy");
    write(root, "Payload/App.app/Frameworks/B.framework/PrivacyInfo.xcprivacy", b"privacy");

    let catalogs = vec![AssetCatalog {
        path: "Payload/App.app/Assets.car".to_string(),
        assets: vec![
            AssetRecord {
                name: "banner".into(),
                asset_type: "Image".into(),
                idiom: "phone".into(),
                scale: 2,
                size: 20_000,
                content_digest: "d1".into(),
            },
            AssetRecord {
                name: "banner".into(),
                asset_type: "Image".into(),
                idiom: "pad".into(),
                scale: 2,
                size: 20_000,
                content_digest: "d1".into(),
            },
        ],
    }];

    let report =
        BundleAnalyzer::with_config(AnalyzerConfig::default()).analyze(root, &catalogs, None);

    assert!(report.warnings.is_empty());
    assert_eq!(report.duplicates.total_count, 6);

    let filtered: Vec<&str> = report
        .duplicates
        .filtered
        .iter()
        .map(|c| c.result.rule_id.as_str())
        .collect();
    assert!(filtered.contains(&"rule-1-info-plist"));
    assert!(filtered.contains(&"rule-7-third-party-sdk"));
    assert!(filtered.contains(&"rule-9-device-variant"));
    assert!(filtered.contains(&"rule-10-small-duplicates"));

    assert_eq!(report.duplicates.actionable.len(), 2);
    assert_eq!(report.optimizations.len(), 2);
    let top = &report.optimizations[0];
    assert_eq!(top.rule_id, "rule-11-extension-duplication");
    assert_eq!(top.severity, Priority::High);
    assert_eq!(top.estimated_savings, 600 * 1024);
    let second = &report.optimizations[1];
    assert_eq!(second.rule_id, "rule-12-asset-duplication");
    assert_eq!(second.severity, Priority::Medium);

    assert!(report
        .duplicates
        .actionable_sets()
        .all(|s| !s.files.iter().any(|f| f.contains("GoogleMaps"))));
    assert_eq!(report.total_savings(), 600 * 1024 + 300 * 1024);
}

#[test]
fn test_failed_detection_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("does-not-exist");

    let catalogs = vec![AssetCatalog {
        path: "App.app/Assets.car".to_string(),
        assets: vec![
            AssetRecord {
                name: "a".into(),
                asset_type: "Data".into(),
                idiom: String::new(),
                scale: 0,
                size: 50_000,
                content_digest: "x".into(),
            },
            AssetRecord {
                name: "b".into(),
                asset_type: "Data".into(),
                idiom: String::new(),
                scale: 0,
                size: 50_000,
                content_digest: "x".into(),
            },
        ],
    }];

    let report = BundleAnalyzer::new().analyze(&missing, &catalogs, Some(1_000_000));

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.duplicates.total_count, 1);
    assert_eq!(report.duplicates.actionable.len(), 1);
    assert_eq!(report.optimizations[0].severity, Priority::Medium);
}

#[test]
fn test_report_serializes() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a/x.bin", &vec![1u8; 10_000]);
    write(temp.path(), "b/x.bin", &vec![1u8; 10_000]);

    let report = BundleAnalyzer::new().analyze(temp.path(), &[], None);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["duplicates"]["total_count"], 1);
    assert_eq!(json["optimizations"][0]["severity"], "high");
}
