/// Server-assigned overlay identifier (the backend's `_id`, a Mongo ObjectId string).
pub type OverlayId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stream grouping key used when none is supplied.
pub const DEFAULT_STREAM_ID: &str = "default";
