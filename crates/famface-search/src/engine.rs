//! Photo filtering for parsed queries.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use famface_core::defaults::KEYWORD_MIN_EXCLUSIVE_LEN;
use famface_core::{AppState, Person, Photo, Relationship, SearchResult};

use crate::query::{parse_search_query, ParsedQuery};

/// Which filter a query ended up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Photos tagging every target person.
    All,
    /// Photos tagging at least one target person.
    Any,
    /// No target people: match words against event, description and
    /// location.
    Keywords,
}

impl FilterMode {
    pub fn for_query(parsed: &ParsedQuery) -> Self {
        if parsed.requires_all() {
            Self::All
        } else if !parsed.person_ids.is_empty() {
            Self::Any
        } else {
            Self::Keywords
        }
    }
}

/// Lower-cased whitespace-separated words longer than
/// [`KEYWORD_MIN_EXCLUSIVE_LEN`] characters.
pub fn keyword_tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > KEYWORD_MIN_EXCLUSIVE_LEN)
        .map(str::to_string)
        .collect()
}

fn field_contains_any(field: Option<&str>, tokens: &[String]) -> bool {
    field.is_some_and(|value| {
        let value = value.to_lowercase();
        tokens.iter().any(|token| value.contains(token.as_str()))
    })
}

/// True when the photo's event, description or location contains any of
/// `tokens`, ignoring case.
pub fn matches_keywords(photo: &Photo, tokens: &[String]) -> bool {
    field_contains_any(photo.event.as_deref(), tokens)
        || field_contains_any(photo.description.as_deref(), tokens)
        || field_contains_any(photo.location.as_deref(), tokens)
}

/// Apply an already parsed query to `photos`, keeping collection order.
pub fn filter_photos(query: &str, parsed: &ParsedQuery, photos: &[Photo]) -> Vec<Photo> {
    let mode = FilterMode::for_query(parsed);
    debug!(?mode, target_count = parsed.person_ids.len(), "Selected filter mode");

    match mode {
        FilterMode::All => photos
            .iter()
            .filter(|photo| parsed.person_ids.iter().all(|id| photo.has_person(id)))
            .cloned()
            .collect(),
        FilterMode::Any => photos
            .iter()
            .filter(|photo| {
                photo
                    .tagged_person_ids()
                    .any(|id| parsed.person_ids.iter().any(|target| target == id))
            })
            .cloned()
            .collect(),
        FilterMode::Keywords => {
            let tokens = keyword_tokens(query);
            trace!(?tokens, "Keyword fallback tokens");
            if tokens.is_empty() {
                return Vec::new();
            }
            photos
                .iter()
                .filter(|photo| matches_keywords(photo, &tokens))
                .cloned()
                .collect()
        }
    }
}

/// Search `photos` for a free-text query.
///
/// Never fails: an empty or unmatched query yields an empty result, and
/// tags or edges pointing at unknown people simply never match.
#[instrument(skip_all, fields(
    subsystem = "search",
    component = "engine",
    op = "search",
    query = %query,
))]
pub fn search_photos(
    query: &str,
    people: &[Person],
    relationships: &[Relationship],
    photos: &[Photo],
) -> SearchResult {
    let start = Instant::now();
    let parsed = parse_search_query(query, people, relationships);
    let matched = filter_photos(query, &parsed, photos);

    info!(
        result_count = matched.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Photo search completed"
    );

    SearchResult {
        photos: matched,
        query: query.to_string(),
    }
}

/// [`search_photos`] over a whole state snapshot.
pub fn search_state(query: &str, state: &AppState) -> SearchResult {
    search_photos(query, &state.people, &state.relationships, &state.photos)
}
