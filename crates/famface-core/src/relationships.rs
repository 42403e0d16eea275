//! Relationship graph queries.
//!
//! The graph is stored as directed edges in matched pairs: every edge
//! `(p1, p2, t)` has a partner `(p2, p1, t.inverse())` with its own id.
//! Everything here is read-only over borrowed slices. References to people
//! that no longer exist are skipped rather than treated as errors.

use serde::Serialize;
use tracing::trace;

use crate::ids::IdSource;
use crate::models::{Person, Relationship, RelationshipType};

/// The inverse relationship type. See [`RelationshipType::inverse`].
pub fn inverse(relationship_type: RelationshipType) -> RelationshipType {
    relationship_type.inverse()
}

/// Human-readable label, e.g. `"Parent of Anjali"`.
pub fn relationship_label(relationship_type: RelationshipType, other_person_name: &str) -> String {
    relationship_type.label(other_person_name)
}

/// Every edge where `person_id` is the source or the target, in storage
/// order.
pub fn relationships_for_person<'a>(
    person_id: &str,
    relationships: &'a [Relationship],
) -> Vec<&'a Relationship> {
    relationships
        .iter()
        .filter(|rel| rel.involves(person_id))
        .collect()
}

/// First edge going exactly from `person1_id` to `person2_id`.
///
/// The reverse direction is not consulted.
pub fn find_relationship<'a>(
    person1_id: &str,
    person2_id: &str,
    relationships: &'a [Relationship],
) -> Option<&'a Relationship> {
    relationships
        .iter()
        .find(|rel| rel.person1_id == person1_id && rel.person2_id == person2_id)
}

/// The stored edge completing `edge`'s pair, if present.
pub fn find_partner<'a>(
    edge: &Relationship,
    relationships: &'a [Relationship],
) -> Option<&'a Relationship> {
    let expected = edge.relationship_type.inverse();
    relationships.iter().find(|rel| {
        rel.id != edge.id
            && rel.person1_id == edge.person2_id
            && rel.person2_id == edge.person1_id
            && rel.relationship_type == expected
    })
}

/// People connected to `person_id` by `relationship_type`, in `people`
/// order.
///
/// An edge matches when the person is its source with the requested type,
/// or its target and the edge's inverse type is the requested type.
pub fn related_people<'a>(
    person_id: &str,
    relationship_type: RelationshipType,
    relationships: &[Relationship],
    people: &'a [Person],
) -> Vec<&'a Person> {
    let related_ids: Vec<&str> = relationships
        .iter()
        .filter(|rel| {
            (rel.person1_id == person_id && rel.relationship_type == relationship_type)
                || (rel.person2_id == person_id
                    && rel.relationship_type.inverse() == relationship_type)
        })
        .map(|rel| rel.other_endpoint(person_id))
        .collect();

    trace!(
        person_id,
        relationship_type = %relationship_type,
        edge_count = related_ids.len(),
        "Resolved related people"
    );

    people
        .iter()
        .filter(|person| related_ids.contains(&person.id.as_str()))
        .collect()
}

/// A forward edge and its inverse partner, built together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipPair {
    pub forward: Relationship,
    pub inverse: Relationship,
}

impl RelationshipPair {
    pub fn into_edges(self) -> [Relationship; 2] {
        [self.forward, self.inverse]
    }
}

/// Build the edge `(person1_id, person2_id, relationship_type)` and its
/// partner, each with a fresh id from `ids`.
pub fn relationship_pair(
    person1_id: &str,
    person2_id: &str,
    relationship_type: RelationshipType,
    ids: &mut dyn IdSource,
) -> RelationshipPair {
    let forward = Relationship {
        id: ids.next_id(),
        person1_id: person1_id.to_string(),
        person2_id: person2_id.to_string(),
        relationship_type,
    };
    let inverse = Relationship {
        id: ids.next_id(),
        person1_id: person2_id.to_string(),
        person2_id: person1_id.to_string(),
        relationship_type: relationship_type.inverse(),
    };
    RelationshipPair { forward, inverse }
}

/// People who could be related to `person_id`: everyone else with no edge
/// to or from them yet.
pub fn available_partners<'a>(
    person_id: &str,
    people: &'a [Person],
    relationships: &[Relationship],
) -> Vec<&'a Person> {
    people
        .iter()
        .filter(|person| person.id != person_id)
        .filter(|person| {
            !relationships.iter().any(|rel| {
                (rel.person1_id == person_id && rel.person2_id == person.id)
                    || (rel.person1_id == person.id && rel.person2_id == person_id)
            })
        })
        .collect()
}

/// One edge as seen from a particular person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipView<'a> {
    pub relationship: &'a Relationship,
    pub other: &'a Person,
    pub label: String,
}

/// Every edge touching `person_id`, resolved against `people`.
///
/// When the person is the edge source the label names the other person
/// ("Spouse of Raj"). When the person is the target the label is the edge's
/// own label with the person's name. Edges whose other endpoint is unknown
/// are skipped, as is everything when `person_id` itself is unknown.
pub fn describe_relationships<'a>(
    person_id: &str,
    people: &'a [Person],
    relationships: &'a [Relationship],
) -> Vec<RelationshipView<'a>> {
    let Some(person) = people.iter().find(|p| p.id == person_id) else {
        return Vec::new();
    };

    relationships_for_person(person_id, relationships)
        .into_iter()
        .filter_map(|rel| {
            let other_id = rel.other_endpoint(person_id);
            let other = people.iter().find(|p| p.id == other_id)?;
            let label = if rel.person1_id == person_id {
                rel.relationship_type.label(&other.name)
            } else {
                rel.relationship_type.label(&person.name)
            };
            Some(RelationshipView {
                relationship: rel,
                other,
                label,
            })
        })
        .collect()
}

/// Outgoing edges of one person, labelled by target name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRelationships<'a> {
    pub person: &'a Person,
    pub entries: Vec<RelationshipView<'a>>,
}

/// Group edges by their source person, in order of first appearance.
///
/// Sources missing from `people` are dropped, as are entries whose target
/// is missing.
pub fn group_by_person<'a>(
    people: &'a [Person],
    relationships: &'a [Relationship],
) -> Vec<PersonRelationships<'a>> {
    let mut source_order: Vec<&str> = Vec::new();
    for rel in relationships {
        if !source_order.contains(&rel.person1_id.as_str()) {
            source_order.push(&rel.person1_id);
        }
    }

    source_order
        .into_iter()
        .filter_map(|source_id| {
            let person = people.iter().find(|p| p.id == source_id)?;
            let entries = relationships
                .iter()
                .filter(|rel| rel.person1_id == source_id)
                .filter_map(|rel| {
                    let other = people.iter().find(|p| p.id == rel.person2_id)?;
                    Some(RelationshipView {
                        relationship: rel,
                        other,
                        label: rel.relationship_type.label(&other.name),
                    })
                })
                .collect();
            Some(PersonRelationships { person, entries })
        })
        .collect()
}
