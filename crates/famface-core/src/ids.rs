//! Identifier generation.
//!
//! Entity ids are opaque strings; the core only relies on uniqueness.
//! The default source produces UUIDv7 strings, which sort by creation time.
//! Tests use [`SequentialIds`] for predictable values.

use uuid::Uuid;

/// Source of fresh, unique entity ids.
pub trait IdSource: Send {
    /// Produce an id that has not been returned before.
    fn next_id(&mut self) -> String;
}

/// Generate a new UUIDv7 identifier string.
///
/// # Example
///
/// ```
/// use famface_core::ids::new_v7;
///
/// let a = new_v7();
/// let b = new_v7();
/// assert_ne!(a, b);
/// ```
#[inline]
pub fn new_v7() -> String {
    Uuid::now_v7().to_string()
}

/// Default id source backed by UUIDv7.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        new_v7()
    }
}

/// Deterministic id source yielding `<prefix>1`, `<prefix>2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v7_is_version_7() {
        let id = new_v7();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn test_uuid_ids_unique() {
        let mut ids = UuidIds;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("id-");
        assert_eq!(ids.next_id(), "id-1");
        assert_eq!(ids.next_id(), "id-2");
        assert_eq!(ids.next_id(), "id-3");
    }
}
