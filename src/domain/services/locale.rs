//! Locale Service
//!
//! Pure domain logic for picking the best localized name out of a
//! language-code map. This service has NO external dependencies.

use std::collections::BTreeMap;

/// Language every record is expected to carry; used when the requested
/// language is missing.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Pick the best available name for `lang` from a localized-name map.
///
/// Returns the name for the requested language, else the
/// [`FALLBACK_LANGUAGE`] name, else `None`. Total over its inputs: an
/// absent or empty map simply yields `None`.
pub fn localized_name(names: Option<&BTreeMap<&str, &str>>, lang: &str) -> Option<String> {
    let names = names?;
    names
        .get(lang)
        .or_else(|| names.get(FALLBACK_LANGUAGE))
        .map(|name| name.to_string())
}
