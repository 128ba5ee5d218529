/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stable user identifier issued by the identity provider (JWT `sub`).
pub type UserId = uuid::Uuid;

/// Identifier of a single mess (dining hall).
pub type MessId = uuid::Uuid;
