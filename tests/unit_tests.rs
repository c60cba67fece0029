// Unit tests for Match Now

use match_now::core::{
    distance::{haversine_distance, calculate_bounding_box, is_within_bounding_box},
    interests::InterestSet,
    scoring::{calculate_match_score, round_score},
};

fn set(tags: &[&str]) -> InterestSet {
    InterestSet::new(tags.iter().copied())
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(37.5665, 126.9780, 37.5665, 126.9780);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_seoul_to_busan() {
    // Seoul to Busan is roughly 325 km in a straight line
    let distance = haversine_distance(37.5665, 126.9780, 35.1796, 129.0756);
    assert!(distance > 300.0 && distance < 350.0, "got {}", distance);
}

#[test]
fn test_haversine_is_symmetric() {
    let there = haversine_distance(37.5665, 126.9780, 37.5172, 127.0473);
    let back = haversine_distance(37.5172, 127.0473, 37.5665, 126.9780);
    assert!((there - back).abs() < 1e-9);
}

#[test]
fn test_point_within_bbox() {
    let bbox = calculate_bounding_box(37.5665, 126.9780, 10.0);

    assert!(is_within_bounding_box(37.5665, 126.9780, &bbox));
    assert!(is_within_bounding_box(37.5172, 127.0473, &bbox));
    assert!(!is_within_bounding_box(bbox.max_lat + 0.01, 126.9780, &bbox));
}

#[test]
fn test_score_symmetric() {
    let pairs = [
        (set(&["개발", "음악"]), set(&["개발", "게임"])),
        (set(&["a", "b", "c", "d"]), set(&["b", "d", "e"])),
        (set(&["x"]), set(&["x", "y", "z"])),
    ];

    for (left, right) in &pairs {
        let (forward, _) = calculate_match_score(left, right);
        let (backward, _) = calculate_match_score(right, left);
        assert_eq!(forward, backward);
    }
}

#[test]
fn test_score_range() {
    let (score, _) = calculate_match_score(&set(&["a", "b", "c"]), &set(&["c", "d"]));
    assert!(score > 0.0 && score <= 1.0);
    assert_eq!(score, 0.25);
}

#[test]
fn test_common_interests_have_no_duplicates() {
    let subject = set(&["개발", "음악", "개발", "영화"]);
    let candidate = set(&["영화", "개발", "영화"]);

    let (_, common) = calculate_match_score(&subject, &candidate);

    assert_eq!(common, vec!["개발", "영화"]);
}

#[test]
fn test_round_half_up() {
    assert_eq!(round_score(0.125), 0.13);
    assert_eq!(round_score(0.375), 0.38);
    assert_eq!(round_score(1.0), 1.0);
}
