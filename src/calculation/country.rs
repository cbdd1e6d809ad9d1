//! Travel destination standardisation.
//!
//! Users type destinations freely ("日本", "japan", "JP"). Statistics and
//! allowance eligibility use one canonical name per country.

use std::collections::BTreeMap;

/// Built-in alias table: (alias, canonical name). Matching is
/// case-insensitive on the trimmed input.
const BUILT_IN_ALIASES: &[(&str, &str)] = &[
    ("japan", "Japan"),
    ("jp", "Japan"),
    ("jpn", "Japan"),
    ("日本", "Japan"),
    ("china", "China"),
    ("cn", "China"),
    ("中國", "China"),
    ("中国", "China"),
    ("大陸", "China"),
    ("united states", "United States"),
    ("usa", "United States"),
    ("us", "United States"),
    ("america", "United States"),
    ("美國", "United States"),
    ("south korea", "South Korea"),
    ("korea", "South Korea"),
    ("kr", "South Korea"),
    ("韓國", "South Korea"),
    ("南韓", "South Korea"),
    ("vietnam", "Vietnam"),
    ("viet nam", "Vietnam"),
    ("越南", "Vietnam"),
    ("thailand", "Thailand"),
    ("th", "Thailand"),
    ("泰國", "Thailand"),
    ("singapore", "Singapore"),
    ("sg", "Singapore"),
    ("新加坡", "Singapore"),
    ("malaysia", "Malaysia"),
    ("my", "Malaysia"),
    ("馬來西亞", "Malaysia"),
    ("philippines", "Philippines"),
    ("ph", "Philippines"),
    ("菲律賓", "Philippines"),
    ("indonesia", "Indonesia"),
    ("id", "Indonesia"),
    ("印尼", "Indonesia"),
    ("india", "India"),
    ("in", "India"),
    ("印度", "India"),
    ("hong kong", "Hong Kong"),
    ("hk", "Hong Kong"),
    ("香港", "Hong Kong"),
    ("germany", "Germany"),
    ("de", "Germany"),
    ("德國", "Germany"),
    ("mexico", "Mexico"),
    ("mx", "Mexico"),
    ("墨西哥", "Mexico"),
];

/// Maps a typed destination to its canonical name.
///
/// User aliases are consulted first, then the built-in table; both match
/// case-insensitively. An unknown destination is returned trimmed but
/// otherwise as typed. Blank input means no destination.
///
/// # Example
///
/// ```
/// use overtime_ledger::calculation::standardize_country;
/// use std::collections::BTreeMap;
///
/// let aliases = BTreeMap::new();
/// assert_eq!(standardize_country("日本", &aliases).as_deref(), Some("Japan"));
/// assert_eq!(standardize_country(" jp ", &aliases).as_deref(), Some("Japan"));
/// assert_eq!(standardize_country("Atlantis", &aliases).as_deref(), Some("Atlantis"));
/// assert_eq!(standardize_country("   ", &aliases), None);
/// ```
pub fn standardize_country(raw: &str, aliases: &BTreeMap<String, String>) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let key = trimmed.to_lowercase();

    let user = aliases
        .iter()
        .find(|(alias, _)| alias.trim().to_lowercase() == key)
        .map(|(_, canonical)| canonical.trim())
        .filter(|canonical| !canonical.is_empty());
    if let Some(canonical) = user {
        return Some(canonical.to_string());
    }

    let canonical = BUILT_IN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(trimmed);
    Some(canonical.to_string())
}
