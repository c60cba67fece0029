//! Match Now - user profile service with interest-based matching
//!
//! This library provides the profile store, HTTP handlers and the match
//! ranker used by the Match Now backend. The ranker scores candidates by the
//! Jaccard similarity of their interest tags.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, MatchError, RankedMatches, InterestSet, distance::{haversine_distance, calculate_bounding_box}};
pub use models::{UserProfile, UserSummary, MatchResult, Location, NearbyUser};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let bbox = calculate_bounding_box(37.5665, 126.9780, 10.0);
        assert!(bbox.min_lat < 37.5665);

        let matcher = Matcher::default();
        assert_eq!(matcher.effective_limit(None), 10);
    }
}
