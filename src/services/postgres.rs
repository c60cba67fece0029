use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;
use crate::models::{BoundingBox, CreateUserRequest, Location, UpdateUserRequest, UserListFilter, UserProfile};

/// SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for malformed regular expressions
const INVALID_REGEX: &str = "2201B";

const USER_COLUMNS: &str =
    "id, username, email, age, bio, interests, is_active, latitude, longitude, created_at, updated_at";

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    age: i32,
    bio: Option<String>,
    interests: Vec<String>,
    is_active: bool,
    latitude: Option<f64>,
    longitude: Option<f64>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        let location = match (row.latitude, row.longitude) {
            (Some(lat), Some(lng)) => Some(Location { lat, lng }),
            _ => None,
        };

        UserProfile {
            id: row.id,
            username: row.username,
            email: row.email,
            // the table constrains age to 18..=100
            age: u8::try_from(row.age).unwrap_or(u8::MAX),
            bio: row.bio,
            interests: row.interests,
            is_active: row.is_active,
            location,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

/// PostgreSQL-backed user store
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Connect and run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Build a client whose pool connects on first use, without migrating
    pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Insert a new user
    ///
    /// Duplicate usernames or emails surface as `PostgresError::Conflict`.
    pub async fn create_user(&self, req: &CreateUserRequest) -> Result<UserProfile, PostgresError> {
        let query = format!(
            r#"
            INSERT INTO users (id, username, email, age, bio, interests, is_active, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&req.username)
            .bind(&req.email)
            .bind(i32::from(req.age))
            .bind(&req.bio)
            .bind(&req.interests)
            .bind(req.is_active.unwrap_or(true))
            .bind(req.location.map(|l| l.lat))
            .bind(req.location.map(|l| l.lng))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        tracing::debug!("Created user {} ({})", row.username, row.id);

        Ok(row.into())
    }

    /// List users matching a filter, newest first
    ///
    /// Returns the requested page together with the total number of
    /// matching rows.
    pub async fn list_users(
        &self,
        filter: &UserListFilter,
    ) -> Result<(Vec<UserProfile>, i64), PostgresError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filters(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let mut data_query = QueryBuilder::<Postgres>::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_filters(&mut data_query, filter);
        data_query
            .push(" ORDER BY created_at DESC, id OFFSET ")
            .push_bind(filter.offset())
            .push(" LIMIT ")
            .push_bind(i64::from(filter.limit));

        let rows: Vec<UserRow> = data_query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok((rows.into_iter().map(UserProfile::from).collect(), total))
    }

    /// Fetch a user if it exists
    pub async fn find_user(&self, id: &Uuid) -> Result<Option<UserProfile>, PostgresError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserProfile::from))
    }

    /// Fetch a user, failing with `NotFound` if absent
    pub async fn get_user(&self, id: &Uuid) -> Result<UserProfile, PostgresError> {
        self.find_user(id)
            .await?
            .ok_or_else(|| PostgresError::NotFound("User not found".to_string()))
    }

    /// Apply a partial update; absent fields keep their stored value
    pub async fn update_user(
        &self,
        id: &Uuid,
        req: &UpdateUserRequest,
    ) -> Result<UserProfile, PostgresError> {
        let query = format!(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                age = COALESCE($4, age),
                bio = COALESCE($5, bio),
                interests = COALESCE($6, interests),
                is_active = COALESCE($7, is_active),
                latitude = COALESCE($8, latitude),
                longitude = COALESCE($9, longitude),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .bind(&req.username)
            .bind(&req.email)
            .bind(req.age.map(i32::from))
            .bind(&req.bio)
            .bind(&req.interests)
            .bind(req.is_active)
            .bind(req.location.map(|l| l.lat))
            .bind(req.location.map(|l| l.lng))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => {
                tracing::debug!("Updated user {}", id);
                Ok(row.into())
            }
            None => Err(PostgresError::NotFound("User not found".to_string())),
        }
    }

    /// Delete a user
    pub async fn delete_user(&self, id: &Uuid) -> Result<(), PostgresError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PostgresError::NotFound("User not found".to_string()));
        }

        tracing::info!("Deleted user {}", id);
        Ok(())
    }

    /// Candidate pool for ranking: every active user except `exclude_id`
    ///
    /// Ordered by creation time so ranking ties resolve oldest first.
    pub async fn active_candidates(&self, exclude_id: &Uuid) -> Result<Vec<UserProfile>, PostgresError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_active = TRUE AND id <> $1 ORDER BY created_at ASC, id"
        );

        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(exclude_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Loaded {} active candidates excluding {}", rows.len(), exclude_id);

        Ok(rows.into_iter().map(UserProfile::from).collect())
    }

    /// Active users whose stored location falls inside a bounding box
    pub async fn users_in_bounding_box(&self, bbox: &BoundingBox) -> Result<Vec<UserProfile>, PostgresError> {
        let query = format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE is_active = TRUE
              AND latitude BETWEEN $1 AND $2
              AND longitude BETWEEN $3 AND $4
            ORDER BY created_at ASC, id
            "#
        );

        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(bbox.min_lat)
            .bind(bbox.max_lat)
            .bind(bbox.min_lon)
            .bind(bbox.max_lon)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(UserProfile::from).collect())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Append WHERE clauses for the list filter
///
/// The search term is matched as a case-insensitive regular expression
/// against username, email and bio.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &UserListFilter) {
    let mut has_where = false;

    if let Some(is_active) = filter.is_active {
        builder.push(" WHERE is_active = ").push_bind(is_active);
        has_where = true;
    }

    if let Some(search) = filter.search_term() {
        builder.push(if has_where { " AND " } else { " WHERE " });
        builder
            .push("(username ~* ")
            .push_bind(search.to_string())
            .push(" OR email ~* ")
            .push_bind(search.to_string())
            .push(" OR bio ~* ")
            .push_bind(search.to_string())
            .push(")");
    }
}

/// Translate constraint and regex failures into domain errors
fn map_sqlx_error(err: sqlx::Error) -> PostgresError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                let field = match db_err.constraint() {
                    Some(c) if c.contains("email") => "email",
                    Some(c) if c.contains("username") => "username",
                    _ => "value",
                };
                return PostgresError::Conflict(format!("{} already exists", field));
            }
            Some(INVALID_REGEX) => {
                return PostgresError::InvalidInput("Invalid search pattern".to_string());
            }
            _ => {}
        }
    }
    err.into()
}
