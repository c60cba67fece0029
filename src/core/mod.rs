// Core algorithm exports
pub mod distance;
pub mod interests;
pub mod matcher;
pub mod nearby;
pub mod scoring;

pub use distance::{haversine_distance, calculate_bounding_box, is_within_bounding_box};
pub use interests::InterestSet;
pub use matcher::{Matcher, MatchError, RankedMatches};
pub use nearby::find_nearby;
pub use scoring::{calculate_match_score, round_score};
