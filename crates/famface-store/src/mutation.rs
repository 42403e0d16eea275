//! Whole-state transitions.
//!
//! Every change to [`AppState`] is expressed as a [`Mutation`] and applied
//! by [`reduce`], which builds the next state from the current one without
//! touching it. Validation happens before a mutation is built; `reduce`
//! itself only preserves the structural invariants:
//!
//! - deleting a person removes every edge and tag referencing them;
//! - relationship edges are added, retyped and removed as pairs;
//! - tags always carry their owning photo's id.

use famface_core::relationships::{find_partner, RelationshipPair};
use famface_core::{AppState, Person, Photo, PhotoTag, RelationshipType};

/// One state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddPerson(Person),
    /// Replace the person with the same id.
    UpdatePerson(Person),
    /// Remove a person and cascade to their edges and tags.
    DeletePerson(String),
    AddPhoto(Photo),
    /// Replace the photo with the same id.
    UpdatePhoto(Photo),
    DeletePhoto(String),
    /// Commit both edges of a relationship at once.
    AddRelationshipPair(RelationshipPair),
    /// Retype an edge; its partner receives the inverse type.
    UpdateRelationshipType {
        id: String,
        relationship_type: RelationshipType,
    },
    /// Remove an edge together with its partner.
    DeleteRelationship(String),
    AddTag(PhotoTag),
    RemoveTag { photo_id: String, tag_id: String },
    /// Bulk replacement, used when loading.
    ReplaceState(AppState),
}

impl Mutation {
    /// Operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddPerson(_) => "add_person",
            Self::UpdatePerson(_) => "update_person",
            Self::DeletePerson(_) => "delete_person",
            Self::AddPhoto(_) => "add_photo",
            Self::UpdatePhoto(_) => "update_photo",
            Self::DeletePhoto(_) => "delete_photo",
            Self::AddRelationshipPair(_) => "add_relationship",
            Self::UpdateRelationshipType { .. } => "update_relationship",
            Self::DeleteRelationship(_) => "delete_relationship",
            Self::AddTag(_) => "add_tag",
            Self::RemoveTag { .. } => "remove_tag",
            Self::ReplaceState(_) => "replace_state",
        }
    }
}

fn with_owned_tags(mut photo: Photo) -> Photo {
    for tag in &mut photo.tags {
        if tag.photo_id != photo.id {
            tag.photo_id = photo.id.clone();
        }
    }
    photo
}

/// Compute the state that results from applying `mutation` to `state`.
pub fn reduce(state: &AppState, mutation: Mutation) -> AppState {
    let mut next = state.clone();
    match mutation {
        Mutation::AddPerson(person) => next.people.push(person),
        Mutation::UpdatePerson(person) => {
            if let Some(slot) = next.people.iter_mut().find(|p| p.id == person.id) {
                *slot = person;
            }
        }
        Mutation::DeletePerson(id) => {
            next.people.retain(|p| p.id != id);
            next.relationships.retain(|rel| !rel.involves(&id));
            for photo in &mut next.photos {
                photo.tags.retain(|tag| tag.person_id != id);
            }
        }
        Mutation::AddPhoto(photo) => next.photos.push(with_owned_tags(photo)),
        Mutation::UpdatePhoto(photo) => {
            if let Some(slot) = next.photos.iter_mut().find(|p| p.id == photo.id) {
                *slot = with_owned_tags(photo);
            }
        }
        Mutation::DeletePhoto(id) => next.photos.retain(|p| p.id != id),
        Mutation::AddRelationshipPair(pair) => next.relationships.extend(pair.into_edges()),
        Mutation::UpdateRelationshipType {
            id,
            relationship_type,
        } => {
            let partner_id = state
                .relationship(&id)
                .and_then(|edge| find_partner(edge, &state.relationships))
                .map(|partner| partner.id.clone());
            for rel in &mut next.relationships {
                if rel.id == id {
                    rel.relationship_type = relationship_type;
                } else if partner_id.as_deref() == Some(rel.id.as_str()) {
                    rel.relationship_type = relationship_type.inverse();
                }
            }
        }
        Mutation::DeleteRelationship(id) => {
            let partner_id = state
                .relationship(&id)
                .and_then(|edge| find_partner(edge, &state.relationships))
                .map(|partner| partner.id.clone());
            next.relationships
                .retain(|rel| rel.id != id && partner_id.as_deref() != Some(rel.id.as_str()));
        }
        Mutation::AddTag(tag) => {
            if let Some(photo) = next.photos.iter_mut().find(|p| p.id == tag.photo_id) {
                photo.tags.push(tag);
            }
        }
        Mutation::RemoveTag { photo_id, tag_id } => {
            if let Some(photo) = next.photos.iter_mut().find(|p| p.id == photo_id) {
                photo.tags.retain(|tag| tag.id != tag_id);
            }
        }
        Mutation::ReplaceState(state) => next = state,
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use famface_core::relationships::relationship_pair;
    use famface_core::seed::seed_state;
    use famface_core::SequentialIds;

    #[test]
    fn test_delete_person_cascades() {
        let state = seed_state();
        let next = reduce(&state, Mutation::DeletePerson("p1".into()));

        assert!(next.person("p1").is_none());
        assert!(next.relationships.iter().all(|r| !r.involves("p1")));
        assert!(next.photos.iter().all(|p| !p.has_person("p1")));
        // Photos stay, only tags shrink.
        assert_eq!(next.photos.len(), state.photos.len());
        // The Bade Papa / Bade Mummy spouse pair is untouched.
        assert_eq!(next.relationships.len(), 2);
    }

    #[test]
    fn test_reduce_does_not_touch_input() {
        let state = seed_state();
        let _ = reduce(&state, Mutation::DeletePhoto("photo1".into()));
        assert_eq!(state, seed_state());
    }

    #[test]
    fn test_update_person_with_same_record_is_identity() {
        let state = seed_state();
        let same = state.people[2].clone();
        let next = reduce(&state, Mutation::UpdatePerson(same));
        assert_eq!(next, state);
    }

    #[test]
    fn test_update_unknown_person_changes_nothing() {
        let state = seed_state();
        let next = reduce(
            &state,
            Mutation::UpdatePerson(Person::new("ghost", "Nobody")),
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_add_relationship_pair() {
        let state = seed_state();
        let mut ids = SequentialIds::new("new-r");
        let pair = relationship_pair("p5", "p2", RelationshipType::InLaw, &mut ids);
        let next = reduce(&state, Mutation::AddRelationshipPair(pair));
        assert_eq!(next.relationships.len(), state.relationships.len() + 2);
        let last_two = &next.relationships[next.relationships.len() - 2..];
        assert_eq!(last_two[0].person1_id, "p5");
        assert_eq!(last_two[1].person1_id, "p2");
    }

    #[test]
    fn test_update_relationship_type_retypes_partner() {
        let state = seed_state();
        // r9: Anjali sibling of Maya; r10 is its partner.
        let next = reduce(
            &state,
            Mutation::UpdateRelationshipType {
                id: "r9".into(),
                relationship_type: RelationshipType::UncleAunt,
            },
        );
        assert_eq!(
            next.relationship("r9").unwrap().relationship_type,
            RelationshipType::UncleAunt
        );
        assert_eq!(
            next.relationship("r10").unwrap().relationship_type,
            RelationshipType::NephewNiece
        );
    }

    #[test]
    fn test_delete_relationship_removes_pair() {
        let state = seed_state();
        let next = reduce(&state, Mutation::DeleteRelationship("r2".into()));
        assert!(next.relationship("r1").is_none());
        assert!(next.relationship("r2").is_none());
        assert_eq!(next.relationships.len(), 8);
    }

    #[test]
    fn test_add_photo_normalises_tag_owner() {
        let state = AppState::default();
        let mut photo = Photo::new("ph", "u");
        photo.tags.push(PhotoTag {
            id: "t".into(),
            person_id: "p".into(),
            photo_id: String::new(),
            coordinates: None,
        });
        let next = reduce(&state, Mutation::AddPhoto(photo));
        assert_eq!(next.photos[0].tags[0].photo_id, "ph");
    }

    #[test]
    fn test_add_and_remove_tag() {
        let state = seed_state();
        let tag = PhotoTag {
            id: "t-new".into(),
            person_id: "p5".into(),
            photo_id: "photo3".into(),
            coordinates: None,
        };
        let tagged = reduce(&state, Mutation::AddTag(tag));
        assert!(tagged.photo("photo3").unwrap().has_person("p5"));

        let untagged = reduce(
            &tagged,
            Mutation::RemoveTag {
                photo_id: "photo3".into(),
                tag_id: "t-new".into(),
            },
        );
        assert_eq!(untagged, state);
    }

    #[test]
    fn test_replace_state() {
        let next = reduce(&seed_state(), Mutation::ReplaceState(AppState::default()));
        assert!(next.is_empty());
    }

    #[test]
    fn test_mutation_names() {
        assert_eq!(Mutation::DeletePerson("x".into()).name(), "delete_person");
        assert_eq!(
            Mutation::ReplaceState(AppState::default()).name(),
            "replace_state"
        );
    }
}
