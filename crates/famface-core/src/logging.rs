//! Structured logging field name constants for famface.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log output can be filtered by the same names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Unrecoverable failure surfaced to the caller |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (open, load), completed mutations |
//! | DEBUG | Decision points, resolved query parameters, config choices |
//! | TRACE | Per-item iteration (per photo, per edge) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "core", "search", "store", "cli"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "relationships", "query_parser", "file_backend"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "search", "delete_person", "load"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Person id being operated on.
pub const PERSON_ID: &str = "person_id";

/// Photo id being operated on.
pub const PHOTO_ID: &str = "photo_id";

/// Relationship edge id being operated on.
pub const RELATIONSHIP_ID: &str = "relationship_id";

/// Relationship type resolved or stored.
pub const RELATIONSHIP_TYPE: &str = "relationship_type";

/// Search query text.
pub const QUERY: &str = "query";

/// Storage key of the persisted state blob.
pub const STATE_KEY: &str = "state_key";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search or query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of target people a query resolved to.
pub const TARGET_COUNT: &str = "target_count";

/// Number of relationship edges removed by a cascade.
pub const EDGES_REMOVED: &str = "edges_removed";

/// Number of photo tags removed by a cascade.
pub const TAGS_REMOVED: &str = "tags_removed";

/// Number of tags created with a photo.
pub const TAG_COUNT: &str = "tag_count";

/// Byte length of a persisted state blob.
pub const BLOB_LEN: &str = "blob_len";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
