//! # famface-search
//!
//! Lexical photo search for famface.
//!
//! This crate provides:
//! - Query parsing into target people (names, relationship words, named relatives)
//! - Conjunctive ("together"/"with"/"and") versus any-of filtering
//! - Keyword fallback over event, description and location
//!
//! ## Example
//!
//! ```
//! use famface_core::seed::seed_state;
//! use famface_search::search_state;
//!
//! let state = seed_state();
//! let result = search_state("Anjali and her husband", &state);
//! assert_eq!(result.photos.len(), 2);
//! assert!(result.photos.iter().all(|p| p.has_person("p1") && p.has_person("p2")));
//! ```

pub mod engine;
pub mod keywords;
pub mod query;

pub use engine::{
    filter_photos, keyword_tokens, matches_keywords, search_photos, search_state, FilterMode,
};
pub use query::{parse_search_query, ParsedQuery};
