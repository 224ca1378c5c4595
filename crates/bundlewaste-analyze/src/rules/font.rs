use std::collections::BTreeSet;

use bundlewaste_core::{DuplicateSet, FilterResult};

use super::Rule;
use crate::paths::{extension, extension_root, is_extension_path};

const ID: &str = "rule-8-font-extension";

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "woff", "woff2"];

/// App extensions run sandboxed and cannot load fonts from the host app.
pub struct FontExtensionRule;

impl Rule for FontExtensionRule {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Font extension duplication"
    }

    fn evaluate(&self, set: &DuplicateSet) -> FilterResult {
        if !set.files.iter().all(|f| FONT_EXTENSIONS.contains(&extension(f).as_str())) {
            return FilterResult::no_match();
        }

        let in_extension = set.files.iter().filter(|f| is_extension_path(f)).count();
        if in_extension > 0 && in_extension < set.files.len() {
            return FilterResult::filtered(ID, "Extensions cannot share fonts with the host app");
        }

        let extensions: BTreeSet<String> =
            set.files.iter().filter_map(|f| extension_root(f)).collect();
        if extensions.len() >= 2 {
            return FilterResult::filtered(
                ID,
                format!("Each of {} extensions must bundle its own fonts", extensions.len()),
            );
        }

        FilterResult::no_match()
    }
}
