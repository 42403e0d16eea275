//! Test fixtures for search integration tests.
//!
//! Builds small, hand-checkable states so expected results can be read
//! straight off the fixture.

#![allow(dead_code)]

use famface_core::{AppState, Person, Photo, PhotoTag, Relationship, RelationshipType};

pub fn person(id: &str, name: &str) -> Person {
    Person::new(id, name)
}

pub fn edge(id: &str, p1: &str, p2: &str, t: RelationshipType) -> Relationship {
    Relationship {
        id: id.to_string(),
        person1_id: p1.to_string(),
        person2_id: p2.to_string(),
        relationship_type: t,
    }
}

/// A photo tagged with `person_ids`, tag ids derived from the photo id.
pub fn photo(id: &str, person_ids: &[&str]) -> Photo {
    let mut p = Photo::new(id, format!("https://example.com/{id}.jpg"));
    p.tags = person_ids
        .iter()
        .enumerate()
        .map(|(i, person_id)| PhotoTag {
            id: format!("{id}-t{i}"),
            person_id: person_id.to_string(),
            photo_id: id.to_string(),
            coordinates: None,
        })
        .collect();
    p
}

pub fn photo_with_meta(
    id: &str,
    event: Option<&str>,
    description: Option<&str>,
    location: Option<&str>,
) -> Photo {
    let mut p = photo(id, &[]);
    p.event = event.map(str::to_string);
    p.description = description.map(str::to_string);
    p.location = location.map(str::to_string);
    p
}

/// Alice and Bob are siblings; photos P1 {A}, P2 {B}, P3 {A, B}.
pub fn siblings_state() -> AppState {
    AppState {
        people: vec![person("a", "Alice"), person("b", "Bob")],
        relationships: vec![
            edge("r1", "a", "b", RelationshipType::Sibling),
            edge("r2", "b", "a", RelationshipType::Sibling),
        ],
        photos: vec![photo("P1", &["a"]), photo("P2", &["b"]), photo("P3", &["a", "b"])],
    }
}

pub fn ids(photos: &[Photo]) -> Vec<&str> {
    photos.iter().map(|p| p.id.as_str()).collect()
}
