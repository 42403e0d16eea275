//! Free-text query parsing.
//!
//! A query is reduced to a list of target person ids plus a flag saying
//! whether the people must appear together. Matching is lexical and
//! case-insensitive; there is no tokenisation of names and no fuzzy
//! matching.

use serde::Serialize;
use tracing::debug;

use famface_core::defaults::CONJUNCTION_WORDS;
use famface_core::{Person, Relationship, RelationshipType};

use crate::keywords::{contained_terms, named_relative, resolve_type};

/// How a query was understood.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// Target people, primary person first, without duplicates.
    pub person_ids: Vec<String>,
    /// The query asked for people together ("together", "with", "and").
    pub include_with: bool,
    /// First person whose name occurs in the query.
    pub primary_person_id: Option<String>,
    /// Relationship type named in the query, if one was recognised.
    pub relationship_type: Option<RelationshipType>,
}

impl ParsedQuery {
    /// True when photos must contain every target person.
    pub fn requires_all(&self) -> bool {
        self.include_with && self.person_ids.len() > 1
    }

    fn push_target(&mut self, id: &str) {
        if !self.person_ids.iter().any(|existing| existing == id) {
            self.person_ids.push(id.to_string());
        }
    }
}

/// Resolve `query` into target people.
///
/// 1. The first person in `people` whose lower-cased name occurs in the
///    lower-cased query becomes the primary person.
/// 2. If the query names "bade papa" or "bade mummy", the person with
///    exactly that name is added.
/// 3. Otherwise, if a relationship word is present, every person at the
///    other end of an edge touching the primary person whose stored type
///    string contains the resolved type string is added.
/// 4. "together", "with" or "and" anywhere in the query sets
///    `include_with`, whether or not any person was found.
pub fn parse_search_query(
    query: &str,
    people: &[Person],
    relationships: &[Relationship],
) -> ParsedQuery {
    let query_lower = query.to_lowercase();
    let mut parsed = ParsedQuery::default();

    let primary = people
        .iter()
        .find(|person| query_lower.contains(&person.name.to_lowercase()));

    if let Some(primary) = primary {
        parsed.primary_person_id = Some(primary.id.clone());
        parsed.push_target(&primary.id);

        let terms = contained_terms(&query_lower);
        if !terms.is_empty() {
            parsed.relationship_type = resolve_type(&terms);

            if let Some(phrase) = named_relative(&query_lower) {
                if let Some(relative) = people
                    .iter()
                    .find(|person| person.name.to_lowercase() == phrase)
                {
                    parsed.push_target(&relative.id);
                }
            } else if let Some(target_type) = parsed.relationship_type {
                for rel in relationships {
                    if rel.involves(&primary.id)
                        && rel.relationship_type.as_str().contains(target_type.as_str())
                    {
                        parsed.push_target(rel.other_endpoint(&primary.id));
                    }
                }
            }
        }
    }

    parsed.include_with = CONJUNCTION_WORDS
        .iter()
        .any(|word| query_lower.contains(word));

    debug!(
        query,
        primary_person_id = parsed.primary_person_id.as_deref().unwrap_or("-"),
        relationship_type = parsed.relationship_type.map(|t| t.as_str()).unwrap_or("-"),
        target_count = parsed.person_ids.len(),
        include_with = parsed.include_with,
        "Parsed search query"
    );

    parsed
}
