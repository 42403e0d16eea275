//! Centralized default constants for famface.
//!
//! **This module is the single source of truth** for shared default values.
//! Other crates reference these constants instead of defining their own
//! magic strings and numbers.

// =============================================================================
// STORAGE
// =============================================================================

/// Key under which the whole application state is persisted.
pub const STATE_KEY: &str = "familyFacesAppState";

/// Default directory for the file storage backend.
pub const DATA_DIR: &str = ".famface";

/// File extension used by the file storage backend.
pub const STATE_FILE_EXTENSION: &str = "json";

/// Whether a missing or unreadable state falls back to the seed dataset.
pub const SEED_ON_MISSING: bool = true;

// =============================================================================
// SEARCH
// =============================================================================

/// Fallback keyword tokens must be strictly longer than this many characters.
pub const KEYWORD_MIN_EXCLUSIVE_LEN: usize = 3;

/// Words in a query that request photos with all target people together.
pub const CONJUNCTION_WORDS: &[&str] = &["together", "with", "and"];

// =============================================================================
// GALLERY
// =============================================================================

/// Number of photos shown in the "recent photos" strip.
pub const RECENT_PHOTO_COUNT: usize = 3;

/// Group label for photos without a date.
pub const NO_DATE_LABEL: &str = "No Date";

/// Group label for photos without an event.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "FAMFACE_DATA_DIR";

/// Environment variable overriding the state key.
pub const ENV_STATE_KEY: &str = "FAMFACE_STATE_KEY";

/// Environment variable toggling the seed dataset fallback.
pub const ENV_SEED: &str = "FAMFACE_SEED";

// =============================================================================
// LOGGING
// =============================================================================

/// `EnvFilter` directives used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str =
    "famface=info,famface_store=info,famface_search=info,famface_core=info";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_is_info_for_every_crate() {
        for target in ["famface", "famface_store", "famface_search", "famface_core"] {
            let directive = format!("{}=info", target);
            assert!(
                DEFAULT_LOG_FILTER.split(',').any(|d| d == directive),
                "missing {}",
                directive
            );
        }
    }
}
