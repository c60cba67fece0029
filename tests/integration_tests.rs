// Integration tests for Match Now

use match_now::core::{find_nearby, Matcher, MatchError};
use match_now::models::{Location, UserProfile};
use uuid::Uuid;

fn create_test_profile(username: &str, interests: &[&str]) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        age: 25,
        bio: Some(format!("{} 입니다.", username)),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        is_active: true,
        location: None,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn test_integration_disjoint_interests_excluded() {
    let matcher = Matcher::default();
    let subject = create_test_profile("john_doe", &["개발", "음악", "영화"]);
    let candidates = vec![create_test_profile("jane_smith", &["디자인", "여행", "요리"])];

    let result = matcher.rank(Some(&subject), &candidates, 10).unwrap();

    assert_eq!(result.total, 0);
    assert!(result.matches.is_empty());
}

#[test]
fn test_integration_single_shared_interest() {
    let matcher = Matcher::default();
    let subject = create_test_profile("john_doe", &["개발", "음악"]);
    let candidate = create_test_profile("mike_wilson", &["개발", "게임"]);
    let candidate_id = candidate.id;

    let result = matcher.rank(Some(&subject), &[candidate], 10).unwrap();

    assert_eq!(result.total, 1);
    let m = &result.matches[0];
    assert_eq!(m.id, candidate_id);
    assert_eq!(m.match_score, 0.33);
    assert_eq!(m.common_interests, vec!["개발"]);
    assert_eq!(m.interests, vec!["개발", "게임"]);
    assert_eq!(m.age, Some(25));
}

#[test]
fn test_integration_empty_subject_interests() {
    let matcher = Matcher::default();
    let subject = create_test_profile("john_doe", &[]);
    let candidates = vec![create_test_profile("dev", &["개발"])];

    let result = matcher.rank(Some(&subject), &candidates, 10).unwrap();

    assert_eq!(result.total, 0);
}

#[test]
fn test_integration_top_n_of_ten() {
    let matcher = Matcher::default();
    let subject = create_test_profile("subject", &["a", "b", "c", "d", "e"]);

    // Candidate i shares the first (i % 5) + 1 tags plus i unique tags
    let candidates: Vec<UserProfile> = (0..10)
        .map(|i| {
            let mut tags: Vec<String> = ["a", "b", "c", "d", "e"][..(i % 5) + 1]
                .iter()
                .map(|s| s.to_string())
                .collect();
            tags.extend((0..i).map(|j| format!("extra_{}_{}", i, j)));
            let mut profile = create_test_profile(&format!("user_{}", i), &[]);
            profile.interests = tags;
            profile
        })
        .collect();

    let result = matcher.rank(Some(&subject), &candidates, 3).unwrap();

    assert_eq!(result.matches.len(), 3);
    assert_eq!(result.total, 3);

    for pair in result.matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }

    // The three best scores across the whole pool
    let all = matcher.rank(Some(&subject), &candidates, 100).unwrap();
    let best: Vec<f64> = all.matches.iter().take(3).map(|m| m.match_score).collect();
    let returned: Vec<f64> = result.matches.iter().map(|m| m.match_score).collect();
    assert_eq!(best, returned);
    assert!(all.matches.iter().all(|m| m.match_score > 0.0));
}

#[test]
fn test_integration_identical_interests_score_one() {
    let matcher = Matcher::default();
    let subject = create_test_profile("john_doe", &["개발", "음악", "영화"]);
    let candidates = vec![create_test_profile("twin", &["영화", "개발", "음악", "음악"])];

    let result = matcher.rank(Some(&subject), &candidates, 10).unwrap();

    assert_eq!(result.matches[0].match_score, 1.0);
    assert_eq!(result.matches[0].common_interests, vec!["개발", "음악", "영화"]);
}

#[test]
fn test_integration_rank_is_idempotent() {
    let matcher = Matcher::default();
    let subject = create_test_profile("john_doe", &["개발", "음악", "영화"]);
    let candidates = vec![
        create_test_profile("a", &["개발"]),
        create_test_profile("b", &["음악", "영화"]),
        create_test_profile("c", &["요리"]),
        create_test_profile("d", &["개발", "요리"]),
    ];

    let first = matcher.rank(Some(&subject), &candidates, 10).unwrap();
    let second = matcher.rank(Some(&subject), &candidates, 10).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_integration_missing_subject() {
    let matcher = Matcher::default();
    let candidates = vec![create_test_profile("a", &["개발"])];

    let err = matcher.rank(None, &candidates, 10).unwrap_err();
    assert!(matches!(err, MatchError::InvalidInput(_)));
}

#[test]
fn test_integration_response_shape() {
    let matcher = Matcher::default();
    let subject = create_test_profile("john_doe", &["개발", "음악"]);
    let mut candidate = create_test_profile("mike_wilson", &["개발"]);
    candidate.bio = None;

    let result = matcher.rank(Some(&subject), &[candidate], 10).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["user"]["username"], "john_doe");
    assert!(json["user"].get("email").is_none());
    assert_eq!(json["total"], 1);
    assert_eq!(json["matches"][0]["matchScore"], 0.5);
    assert_eq!(json["matches"][0]["commonInterests"][0], "개발");
    assert!(json["matches"][0].get("bio").is_none());
}

#[test]
fn test_integration_nearby_lookup() {
    let seoul = Location { lat: 37.5665, lng: 126.9780 };

    let mut gangnam = create_test_profile("jane_smith", &[]);
    gangnam.location = Some(Location { lat: 37.5172, lng: 127.0473 });
    let mut city_hall = create_test_profile("john_doe", &[]);
    city_hall.location = Some(seoul);
    let no_location = create_test_profile("mike_wilson", &[]);

    let users = find_nearby(seoul, 15.0, vec![gangnam, no_location, city_hall], 10);

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "john_doe");
    assert_eq!(users[0].distance_km, 0.0);
    assert_eq!(users[1].username, "jane_smith");
    assert!(users[1].distance_km > 5.0 && users[1].distance_km < 15.0);
}
