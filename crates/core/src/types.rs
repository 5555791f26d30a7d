/// Every entity key is an opaque random UUID.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity id.
pub fn new_id() -> DbId {
    uuid::Uuid::new_v4()
}
