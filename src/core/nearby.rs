use crate::core::{distance::haversine_distance, scoring::round_score};
use crate::models::{Location, NearbyUser, UserProfile};

/// Select users within `radius_km` of `center`, nearest first
///
/// Candidates without a location are skipped. Equal distances keep the
/// candidate input order. Distances are reported in kilometers rounded to
/// two decimals; the radius check uses the exact value.
pub fn find_nearby(
    center: Location,
    radius_km: f64,
    candidates: Vec<UserProfile>,
    limit: usize,
) -> Vec<NearbyUser> {
    let mut nearby: Vec<(f64, UserProfile, Location)> = candidates
        .into_iter()
        .filter_map(|profile| {
            let location = profile.location?;
            let distance_km = haversine_distance(center.lat, center.lng, location.lat, location.lng);
            (distance_km <= radius_km).then_some((distance_km, profile, location))
        })
        .collect();

    nearby.sort_by(|a, b| a.0.total_cmp(&b.0));
    nearby.truncate(limit);

    nearby
        .into_iter()
        .map(|(distance_km, profile, location)| NearbyUser {
            id: profile.id,
            username: profile.username,
            age: profile.age,
            bio: profile.bio,
            interests: profile.interests,
            location,
            distance_km: round_score(distance_km),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn create_user(username: &str, location: Option<(f64, f64)>) -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            age: 30,
            bio: None,
            interests: vec![],
            is_active: true,
            location: location.map(|(lat, lng)| Location { lat, lng }),
            created_at: None,
            updated_at: None,
        }
    }

    const SEOUL: Location = Location { lat: 37.5665, lng: 126.9780 };

    #[test]
    fn test_sorted_by_distance() {
        let candidates = vec![
            create_user("gangnam", Some((37.5172, 127.0473))),
            create_user("city_hall", Some((37.5663, 126.9779))),
            create_user("busan", Some((35.1796, 129.0756))),
        ];

        let result = find_nearby(SEOUL, 20.0, candidates, 10);

        let names: Vec<&str> = result.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["city_hall", "gangnam"]);
        assert!(result[0].distance_km <= result[1].distance_km);
    }

    #[test]
    fn test_users_without_location_skipped() {
        let candidates = vec![create_user("nowhere", None)];
        assert!(find_nearby(SEOUL, 100.0, candidates, 10).is_empty());
    }

    #[test]
    fn test_limit_applied() {
        let candidates: Vec<UserProfile> = (0..5)
            .map(|i| create_user(&format!("user_{}", i), Some((37.5665 + i as f64 * 0.001, 126.9780))))
            .collect();

        let result = find_nearby(SEOUL, 10.0, candidates, 2);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].username, "user_0");
    }
}
