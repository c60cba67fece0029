use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::{calculate_bounding_box, find_nearby, RankedMatches};
use crate::models::{
    CreateUserRequest, DeleteUserResponse, ErrorResponse, ListUsersQuery, Location, MatchesQuery,
    NearbyQuery, NearbyResponse, UpdateUserRequest, UserListFilter, UserListResponse,
};
use crate::routes::{parse_user_id, AppState};
use crate::services::{CacheError, CacheKey};

type HandlerResult = Result<HttpResponse, ErrorResponse>;

/// Configure all user routes (mounted under `/users`)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("", web::post().to(create_user))
        .route("", web::get().to(list_users))
        .route("/nearby", web::get().to(find_nearby_users))
        .route("/{id}", web::get().to(get_user))
        .route("/{id}", web::patch().to(update_user))
        .route("/{id}", web::delete().to(delete_user))
        .route("/{id}/matches", web::get().to(get_user_matches));
}

/// Create a user
///
/// POST /users
///
/// Request body:
/// ```json
/// {
///   "username": "john_doe",
///   "email": "john@example.com",
///   "age": 25,
///   "bio": "string",
///   "interests": ["개발", "음악"],
///   "location": { "lat": 37.5665, "lng": 126.9780 },
///   "isActive": true
/// }
/// ```
async fn create_user(
    state: web::Data<AppState>,
    req: web::Json<CreateUserRequest>,
) -> HandlerResult {
    let req = req.into_inner().normalize();
    req.validate()?;

    let user = state.postgres.create_user(&req).await?;
    state.cache.invalidate_all();

    tracing::info!("Created user {} ({})", user.username, user.id);

    Ok(HttpResponse::Created().json(user))
}

/// List users with pagination, search and activity filter
///
/// GET /users?page=1&limit=10&search=john&isActive=true
async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<ListUsersQuery>,
) -> HandlerResult {
    query.validate()?;

    let limit = query
        .limit
        .unwrap_or(state.pagination.default_page_size)
        .min(state.pagination.max_page_size);

    let filter = UserListFilter {
        page: query.page,
        limit,
        search: query.search.clone(),
        is_active: query.is_active,
    };

    let (data, total) = state.postgres.list_users(&filter).await?;

    tracing::debug!("Listed {} of {} users (page {})", data.len(), total, filter.page);

    Ok(HttpResponse::Ok().json(UserListResponse::new(data, total, filter.page, filter.limit)))
}

/// GET /users/{id}
async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HandlerResult {
    let id = parse_user_id(&path)?;
    let user = state.postgres.get_user(&id).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Partially update a user
///
/// PATCH /users/{id}
async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateUserRequest>,
) -> HandlerResult {
    let id = parse_user_id(&path)?;
    let req = req.into_inner().normalize();
    req.validate()?;

    let user = state.postgres.update_user(&id, &req).await?;
    state.cache.invalidate_all();

    Ok(HttpResponse::Ok().json(user))
}

/// DELETE /users/{id}
async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HandlerResult {
    let id = parse_user_id(&path)?;

    state.postgres.delete_user(&id).await?;
    state.cache.invalidate_all();

    Ok(HttpResponse::Ok().json(DeleteUserResponse {
        message: "User deleted successfully".to_string(),
        deleted_id: id,
    }))
}

/// Active users near a point, nearest first
///
/// GET /users/nearby?lat=37.5665&lng=126.9780&radiusKm=10&limit=10
async fn find_nearby_users(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> HandlerResult {
    query.validate()?;

    let center = Location { lat: query.lat, lng: query.lng };
    let limit = query
        .limit
        .map(|l| l.min(state.pagination.max_page_size as usize))
        .unwrap_or(state.pagination.default_page_size as usize);

    let bbox = calculate_bounding_box(center.lat, center.lng, query.radius_km);
    let candidates = state.postgres.users_in_bounding_box(&bbox).await?;
    let candidate_count = candidates.len();

    let users = find_nearby(center, query.radius_km, candidates, limit);

    tracing::debug!(
        "Nearby lookup at ({}, {}) within {}km: {} of {} boxed candidates",
        center.lat,
        center.lng,
        query.radius_km,
        users.len(),
        candidate_count
    );

    Ok(HttpResponse::Ok().json(NearbyResponse {
        center,
        radius_km: query.radius_km,
        total: users.len(),
        users,
    }))
}

/// Interest-based matches for a user
///
/// GET /users/{id}/matches?limit=10
async fn get_user_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchesQuery>,
) -> HandlerResult {
    let id = parse_user_id(&path)?;
    query.validate()?;

    let limit = state.matcher.effective_limit(query.limit);
    let cache_key = CacheKey::matches(&id, limit);

    match state.cache.get::<RankedMatches>(&cache_key).await {
        Ok(cached) => return Ok(HttpResponse::Ok().json(cached)),
        Err(CacheError::CacheMiss(_)) => {}
        Err(e) => tracing::warn!("Ignoring unreadable cache entry {}: {}", cache_key, e),
    }

    tracing::info!("Finding matches for user: {}, limit: {}", id, limit);

    let generation = state.cache.generation();
    let subject = state.postgres.find_user(&id).await?;
    let candidates = match &subject {
        Some(_) => state.postgres.active_candidates(&id).await?,
        None => Vec::new(),
    };

    let result = state.matcher.rank(subject.as_ref(), &candidates, limit)?;

    if let Err(e) = state.cache.set(&cache_key, &result, generation).await {
        tracing::warn!("Failed to cache matches for {}: {}", id, e);
    }

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        result.total,
        id,
        candidates.len()
    );

    Ok(HttpResponse::Ok().json(result))
}
