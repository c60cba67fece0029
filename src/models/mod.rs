// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{UserProfile, UserSummary, MatchResult, NearbyUser, Location, BoundingBox, UserListFilter};
pub use requests::{CreateUserRequest, UpdateUserRequest, ListUsersQuery, MatchesQuery, NearbyQuery};
pub use responses::{UserListResponse, NearbyResponse, DeleteUserResponse, ServiceInfoResponse, HealthResponse, ErrorResponse};
