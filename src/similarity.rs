//! Text normalization and fuzzy string similarity.
//!
//! The alignment engine compares candidate transcript spans against verse
//! text using a Levenshtein-based similarity ratio expressed as a 0–100
//! percentage. Substitutions are weighted as two edits so the ratio matches
//! the classic "2·matches / total length" sequence-matching formula.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

/// Normalize text for comparison: lowercase, collapse every non-word run to
/// a single space, trim the ends.
pub fn normalize(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), " ").trim().to_string()
}

/// Edit distance over characters with substitution cost 2.
///
/// Insertions and deletions cost 1. With substitutions at cost 2, the
/// distance relates directly to the longest-common-subsequence match count:
/// `distance = len(a) + len(b) - 2·matches`.
fn weighted_edit_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + if ca == cb { 0 } else { 2 };
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Similarity ratio between two strings as a 0–100 percentage.
///
/// 100 means identical, 0 means nothing in common. Two empty strings are
/// considered identical.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();
    if total == 0 {
        return 100;
    }

    let distance = weighted_edit_distance(&a_chars, &b_chars);
    (((total - distance) as f64 * 100.0) / total as f64).round() as u8
}
