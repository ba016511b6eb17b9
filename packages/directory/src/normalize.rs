//! Accent- and case-insensitive text keys for facet values.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalizes a label for similarity comparison.
///
/// Decomposes to NFD, drops combining marks, lowercases and trims, so
/// `"Café"`, `"cafe"` and `"CAFE"` share a key. Total and idempotent.
#[must_use]
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("cafe"), normalize("CAFE"));
        assert_eq!(normalize("Café"), normalize("CAFE"));
    }

    #[test]
    fn handles_precomposed_and_decomposed_input() {
        assert_eq!(normalize("Z\u{e9}n"), normalize("Ze\u{301}n"));
        assert_eq!(normalize("Zén"), "zen");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(normalize("  Theravāda \n"), "theravada");
    }

    #[test]
    fn is_idempotent() {
        for input in ["Thích Nhất Hạnh", "İstanbul", "ÅNGSTRÖM", "  Vajrayāna ", "", "禪"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
