//! Numeric genre references in `TCO`/`TCON` values.

use crate::tables::id3v2_genre;

/// Resolve every `(number)` reference in a content-type value.
///
/// `"(17)(6)"` becomes `"Rock Grunge"`. Returns `None` when no reference
/// resolves, in which case the caller keeps the value unchanged.
pub fn resolve_numeric_genres(value: &str) -> Option<String> {
    let mut names = Vec::new();
    for (idx, _) in value.match_indices('(') {
        let digits: String = value[idx + 1..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Some(name) = digits.parse().ok().and_then(id3v2_genre) {
            names.push(name);
        }
    }

    if names.is_empty() {
        None
    } else {
        Some(names.join(" "))
    }
}
