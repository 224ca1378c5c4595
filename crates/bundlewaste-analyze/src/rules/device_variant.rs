use itertools::Itertools;

use bundlewaste_core::{DuplicateSet, FilterResult};

use super::Rule;
use crate::paths::{car_root, file_name};

const ID: &str = "rule-9-device-variant";

const SCALE_SUFFIXES: &[&str] = &["@1x", "@2x", "@3x"];
const IDIOM_SUFFIXES: &[&str] = &["~iphone", "~ipad", "~phone", "~pad"];

/// Phone and pad renditions of one compiled asset are selected at runtime
/// and cannot be removed.
pub struct DeviceVariantRule;

/// Strip scale and idiom suffixes from a file stem.
///
/// Returns the base name and whether an idiom suffix was present.
pub fn strip_variant_suffixes(stem: &str) -> (&str, bool) {
    let mut base = stem;
    let mut had_idiom = false;
    loop {
        if let Some(stripped) = SCALE_SUFFIXES.iter().find_map(|s| base.strip_suffix(s)) {
            base = stripped;
        } else if let Some(stripped) = IDIOM_SUFFIXES.iter().find_map(|s| base.strip_suffix(s)) {
            base = stripped;
            had_idiom = true;
        } else {
            return (base, had_idiom);
        }
    }
}

fn stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

impl Rule for DeviceVariantRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Device idiom variant"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        if set.files.is_empty() || !set.files.iter().all(|f| f.contains(".car/")) {
            return FilterResult::no_match();
        }

        let mut any_idiom = false;
        let mut keys = Vec::with_capacity(set.files.len());
        for file in &set.files {
            let (base, had_idiom) = strip_variant_suffixes(stem(file_name(file)));
            any_idiom |= had_idiom;
            keys.push((car_root(file), base));
        }

        if any_idiom && keys.iter().all_equal() {
            FilterResult::filtered(ID, "Device idiom renditions of one asset are chosen at runtime")
        } else {
            FilterResult::no_match()
        }
    }
}
