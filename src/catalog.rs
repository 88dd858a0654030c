//! Static catalog of selectable target languages.
//!
//! Codes are ISO-like identifiers, labels are the display names handed to the
//! oracle as the target language. "Popular" is shown first in the selector,
//! "All" is the full deduplicated list sorted by label.

use serde::Serialize;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Target selected when nothing else is configured
pub const DEFAULT_TARGET: &str = "es";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub label: &'static str,
}

const fn lang(code: &'static str, label: &'static str) -> LanguageOption {
    LanguageOption { code, label }
}

const POPULAR: &[LanguageOption] = &[
    lang("en", "English"),
    lang("es", "Spanish"),
    lang("fr", "French"),
    lang("de", "German"),
    lang("ja", "Japanese"),
    lang("ko", "Korean"),
    lang("zh-CN", "Chinese (Simplified)"),
    lang("it", "Italian"),
    lang("pt", "Portuguese"),
    lang("ru", "Russian"),
];

const EXTRA: &[LanguageOption] = &[
    lang("ar", "Arabic"),
    lang("hi", "Hindi"),
    lang("bn", "Bengali"),
    lang("ur", "Urdu"),
    lang("id", "Indonesian"),
    lang("tr", "Turkish"),
    lang("vi", "Vietnamese"),
    lang("pl", "Polish"),
    lang("nl", "Dutch"),
    lang("sv", "Swedish"),
    lang("fi", "Finnish"),
    lang("da", "Danish"),
    lang("no", "Norwegian"),
    lang("el", "Greek"),
    lang("he", "Hebrew"),
    lang("cs", "Czech"),
    lang("hu", "Hungarian"),
    lang("ro", "Romanian"),
    lang("th", "Thai"),
];

static ALL: LazyLock<Vec<LanguageOption>> = LazyLock::new(|| build_all(POPULAR, EXTRA));

/// Languages shown in the "Popular" group, in display order
pub fn popular() -> &'static [LanguageOption] {
    POPULAR
}

/// Every selectable language, deduplicated and sorted by label
pub fn all() -> &'static [LanguageOption] {
    &ALL
}

pub fn find_by_code(code: &str) -> Option<&'static LanguageOption> {
    all().iter().find(|l| l.code == code)
}

/// Case-insensitive lookup by display name, e.g. a name returned by detection
pub fn find_by_label(label: &str) -> Option<&'static LanguageOption> {
    let wanted = label.trim().to_lowercase();
    all().iter().find(|l| l.label.to_lowercase() == wanted)
}

pub fn is_selectable(code: &str) -> bool {
    find_by_code(code).is_some()
}

fn build_all(popular: &[LanguageOption], extra: &[LanguageOption]) -> Vec<LanguageOption> {
    let mut languages: Vec<LanguageOption> = Vec::with_capacity(popular.len() + extra.len());
    for option in popular.iter().chain(extra) {
        // first occurrence of a (code, label) pair wins
        if !languages.contains(option) {
            languages.push(option.clone());
        }
    }
    languages.sort_by(|a, b| compare_labels(a.label, b.label));
    languages
}

/// Collation used for display ordering: case-insensitive, ties broken by the raw label
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_has_no_duplicate_pairs() {
        let mut seen = HashSet::new();
        for option in all() {
            assert!(seen.insert((option.code, option.label)), "duplicate {:?}", option);
        }
        assert_eq!(all().len(), POPULAR.len() + EXTRA.len());
    }

    #[test]
    fn test_all_is_sorted_by_label() {
        for pair in all().windows(2) {
            assert_ne!(
                compare_labels(pair[0].label, pair[1].label),
                Ordering::Greater,
                "{} should not come after {}",
                pair[0].label,
                pair[1].label
            );
        }
        assert_eq!(all().first().map(|l| l.label), Some("Arabic"));
        assert_eq!(all().last().map(|l| l.label), Some("Vietnamese"));
    }

    #[test]
    fn test_popular_is_subset_of_all() {
        for option in popular() {
            assert!(all().contains(option), "{:?} missing from all", option);
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let list = build_all(
            &[lang("en", "English"), lang("fr", "French")],
            &[lang("en", "English"), lang("en", "english"), lang("ar", "Arabic")],
        );
        let labels: Vec<_> = list.iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["Arabic", "English", "english", "French"]);
    }

    #[test]
    fn test_lookups() {
        assert_eq!(find_by_code("zh-CN").map(|l| l.label), Some("Chinese (Simplified)"));
        assert_eq!(find_by_label("french").map(|l| l.code), Some("fr"));
        assert_eq!(find_by_label(" GERMAN ").map(|l| l.code), Some("de"));
        assert!(find_by_label("Klingon").is_none());
        assert!(is_selectable(DEFAULT_TARGET));
        assert!(!is_selectable("xx"));
    }
}
