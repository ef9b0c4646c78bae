//! Boat-name canonicalization used as the join key between ships and cabins.
//!
//! The upstream ships and cabins collections share no numeric key, so both
//! sides are reduced to an upper-case alphanumeric key and matched on that.
//! Two different boats whose names reduce to the same key are merged; that is
//! a known limitation of matching on names.

use once_cell::sync::Lazy;
use regex::Regex;

/// A parenthetical segment such as "(Deluxe)". An unclosed "(" runs to the end.
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)?").expect("parenthetical pattern is valid"));

static NON_SLUG_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Upstream misspelling and the spelling it collapses to
const SPELLING_FIXES: &[(&str, &str)] = &[("LIVEBOARD", "LIVEABOARD")];

/// Reduce a free-text boat name to its matching key.
///
/// `"Derya (Deluxe)"`, `"derya"` and `"DERYA "` all produce `"DERYA"`.
/// Spelling fixes run after punctuation is removed so that the result is
/// stable under repeated application.
pub fn normalize_boat_name(name: &str) -> String {
    let upper = name.to_uppercase();
    let without_suffix = PARENTHETICAL.replace_all(&upper, "");

    let mut key: String = without_suffix
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect();

    for (wrong, right) in SPELLING_FIXES {
        if key.contains(wrong) {
            key = key.replace(wrong, right);
        }
    }

    key.trim().to_string()
}

/// Ship id and slug: lower-cased name with every non-alphanumeric run replaced by `-`
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    NON_SLUG_RUN.replace_all(&lower, "-").into_owned()
}
