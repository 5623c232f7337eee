//! Text normalization and similarity scoring.

/// Normalizes a name for lookup: lowercase, possessive apostrophes removed,
/// internal whitespace collapsed, trimmed.
///
/// `"Mahomes's"` and `"Mahomes'"` both become `"mahomes"`; apostrophes inside a
/// name are dropped too, so `"Ja'Marr"` becomes `"jamarr"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace(['\u{2019}', '\u{2018}'], "'")
        .split_whitespace()
        .map(|word| {
            let word = word.strip_suffix("'s").unwrap_or(word);
            word.replace('\'', "")
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokens of an already-normalized string, sorted and re-joined.
pub fn token_sort(normalized: &str) -> String {
    let mut tokens: Vec<&str> = normalized.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Token-order-insensitive similarity of two token-sorted strings on a
/// 0-100 scale.
pub fn token_sort_ratio(sorted_a: &str, sorted_b: &str) -> f64 {
    strsim::normalized_levenshtein(sorted_a, sorted_b) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_possessives() {
        assert_eq!(normalize("Mahomes's"), "mahomes");
        assert_eq!(normalize("the Bills' defense"), "the bills defense");
        assert_eq!(normalize("Ja\u{2019}Marr Chase"), "jamarr chase");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Kansas \t City   Chiefs "), "kansas city chiefs");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("'"), "");
    }

    #[test]
    fn test_token_sort_ratio_ignores_order() {
        let a = token_sort(&normalize("Allen Josh"));
        let b = token_sort(&normalize("Josh Allen"));
        assert_eq!(token_sort_ratio(&a, &b), 100.0);
    }

    #[test]
    fn test_token_sort_ratio_misspelling() {
        let score = token_sort_ratio("chefs", "chiefs");
        assert!(score > 80.0 && score < 90.0, "score was {score}");
        assert!(token_sort_ratio("nonteam xyzzy", "chiefs") < 70.0);
    }
}
