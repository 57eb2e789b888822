/// Layout identifiers are assigned by the storage backend.
pub type LayoutId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
