use crate::models::Profile;

/// Fixed divisor applied to the shared-interest count
pub const INTEREST_NORMALIZER: f64 = 5.0;

/// A score strictly above this counts as a match
pub const MATCH_THRESHOLD: f64 = 0.5;

/// Calculate the compatibility score of `a` towards `b`
///
/// score = (number of `a`'s interests found anywhere in `b`'s interests) / 5.0
///
/// The result is not clamped: more than five shared tags score above 1.0.
/// Duplicated tags in `a` are counted once per occurrence, so the score is
/// not symmetric in general.
#[inline]
pub fn compatibility_score(a: &Profile, b: &Profile) -> f64 {
    shared_interests(a, b).len() as f64 / INTEREST_NORMALIZER
}

/// Interests of `a` that also appear in `b`, in `a`'s order
pub fn shared_interests<'a>(a: &'a Profile, b: &Profile) -> Vec<&'a str> {
    a.interests()
        .iter()
        .filter(|interest| b.interests().contains(interest))
        .map(String::as_str)
        .collect()
}

#[inline]
pub fn is_match(score: f64) -> bool {
    score > MATCH_THRESHOLD
}
