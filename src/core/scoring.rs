use crate::core::interests::InterestSet;

/// Calculate the interest match score (0-1) between two users
///
/// The score is the Jaccard coefficient of the two interest sets:
/// score = |common| / |union|, or 0 when both sets are empty.
/// Returns the rounded score together with the shared tags in subject order.
pub fn calculate_match_score(
    subject: &InterestSet,
    candidate: &InterestSet,
) -> (f64, Vec<String>) {
    let common_interests = subject.intersection(candidate);
    let union_size = subject.union_len(candidate);

    let score = if union_size > 0 {
        common_interests.len() as f64 / union_size as f64
    } else {
        0.0
    };

    (round_score(score), common_interests)
}

/// Round to two decimal places, halves rounding up
#[inline]
pub fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
