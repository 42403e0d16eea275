//! The family state container.
//!
//! [`FamilyStore`] owns the current [`AppState`], validates every request,
//! applies it through [`reduce`], and writes the whole document back to its
//! [`StateBackend`] afterwards. Persistence is best effort: a failed load
//! falls back to the demo dataset and a failed save is logged, never
//! returned.

use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use famface_core::relationships::{
    find_partner, find_relationship, relationship_pair, RelationshipPair,
};
use famface_core::seed::seed_state;
use famface_core::{
    AppState, Error, IdSource, Person, Photo, PhotoTag, RelationshipType, Result, SearchResult,
    TagCoordinates, UuidIds,
};

use crate::backend::{FileBackend, StateBackend};
use crate::config::StoreConfig;
use crate::mutation::{reduce, Mutation};

/// Request to add a person. The id is generated by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    pub name: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreatePersonRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Request to add a photo, tagging `person_ids` on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhotoRequest {
    pub url: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub person_ids: Vec<String>,
}

/// Request to relate two people: `person1_id` is `relationship_type` of
/// `person2_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationshipRequest {
    pub person1_id: String,
    pub person2_id: String,
    pub relationship_type: RelationshipType,
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Serialize a state document in its persisted layout.
pub fn encode_state(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Parse a persisted state document.
pub fn decode_state(blob: &str) -> Result<AppState> {
    Ok(serde_json::from_str(blob)?)
}

/// Owner of the family state and its persistence.
pub struct FamilyStore {
    state: AppState,
    backend: Box<dyn StateBackend>,
    ids: Box<dyn IdSource>,
    state_key: String,
    seed_on_missing: bool,
}

impl std::fmt::Debug for FamilyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FamilyStore")
            .field("state_key", &self.state_key)
            .field("people", &self.state.people.len())
            .field("relationships", &self.state.relationships.len())
            .field("photos", &self.state.photos.len())
            .finish()
    }
}

impl FamilyStore {
    /// Open a store over `backend`, generating UUIDv7 ids.
    pub fn open(backend: impl StateBackend + 'static, config: &StoreConfig) -> Self {
        Self::open_with_ids(backend, UuidIds, config)
    }

    /// Open a store backed by files under `config.data_dir`.
    pub fn open_file(config: &StoreConfig) -> Result<Self> {
        let backend = FileBackend::open(&config.data_dir)?;
        Ok(Self::open(backend, config))
    }

    /// Open a store with an explicit id source.
    ///
    /// The persisted document is read once. When it is missing or cannot be
    /// parsed the store starts from the demo dataset (or an empty state if
    /// `seed_on_missing` is off), and the resulting state is written back
    /// immediately.
    #[instrument(skip_all, fields(subsystem = "store", component = "family_store", op = "open", state_key = %config.state_key))]
    pub fn open_with_ids(
        backend: impl StateBackend + 'static,
        ids: impl IdSource + 'static,
        config: &StoreConfig,
    ) -> Self {
        let mut store = Self {
            state: AppState::default(),
            backend: Box::new(backend),
            ids: Box::new(ids),
            state_key: config.state_key.clone(),
            seed_on_missing: config.seed_on_missing,
        };
        store.state = store.load();
        store.save();
        info!(
            people = store.state.people.len(),
            relationships = store.state.relationships.len(),
            photos = store.state.photos.len(),
            "Family store opened"
        );
        store
    }

    fn fallback_state(&self) -> AppState {
        if self.seed_on_missing {
            seed_state()
        } else {
            AppState::default()
        }
    }

    fn load(&self) -> AppState {
        match self.backend.read(&self.state_key) {
            Ok(Some(blob)) => match decode_state(&blob) {
                Ok(state) => {
                    debug!(blob_len = blob.len(), "Loaded persisted state");
                    state
                }
                Err(e) => {
                    warn!(error = %e, blob_len = blob.len(), "Persisted state is corrupt, starting fresh");
                    self.fallback_state()
                }
            },
            Ok(None) => {
                debug!("No persisted state found");
                self.fallback_state()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted state, starting fresh");
                self.fallback_state()
            }
        }
    }

    fn save(&self) {
        let written = encode_state(&self.state)
            .and_then(|blob| self.backend.write(&self.state_key, &blob));
        if let Err(e) = written {
            warn!(error = %e, state_key = %self.state_key, "Failed to persist state");
        }
    }

    fn apply(&mut self, mutation: Mutation) {
        let op = mutation.name();
        self.state = reduce(&self.state, mutation);
        debug!(op, "Applied mutation");
        self.save();
    }

    /// The current state snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    fn require_person(&self, id: &str) -> Result<&Person> {
        self.state
            .person(id)
            .ok_or_else(|| Error::PersonNotFound(id.to_string()))
    }

    fn require_photo(&self, id: &str) -> Result<&Photo> {
        self.state
            .photo(id)
            .ok_or_else(|| Error::PhotoNotFound(id.to_string()))
    }

    // =========================================================================
    // People
    // =========================================================================

    pub fn add_person(&mut self, req: CreatePersonRequest) -> Result<Person> {
        let name = require_text(&req.name, "name")?;
        let person = Person {
            id: self.ids.next_id(),
            name,
            profile_image: clean_optional(req.profile_image),
            birthdate: req.birthdate,
            notes: clean_optional(req.notes),
        };
        self.apply(Mutation::AddPerson(person.clone()));
        info!(person_id = %person.id, "Person added");
        Ok(person)
    }

    /// Replace the person with `person.id`.
    pub fn update_person(&mut self, person: Person) -> Result<()> {
        self.require_person(&person.id)?;
        let person = Person {
            name: require_text(&person.name, "name")?,
            profile_image: clean_optional(person.profile_image),
            notes: clean_optional(person.notes),
            ..person
        };
        self.apply(Mutation::UpdatePerson(person));
        Ok(())
    }

    /// Delete a person along with every relationship edge and photo tag
    /// referencing them.
    #[instrument(skip(self), fields(subsystem = "store", op = "delete_person"))]
    pub fn delete_person(&mut self, person_id: &str) -> Result<()> {
        self.require_person(person_id)?;
        let edges_removed = self
            .state
            .relationships
            .iter()
            .filter(|rel| rel.involves(person_id))
            .count();
        let tags_removed = self
            .state
            .photos
            .iter()
            .flat_map(|photo| &photo.tags)
            .filter(|tag| tag.person_id == person_id)
            .count();

        self.apply(Mutation::DeletePerson(person_id.to_string()));
        info!(edges_removed, tags_removed, "Person deleted");
        Ok(())
    }

    // =========================================================================
    // Photos
    // =========================================================================

    /// Add a photo, tagging each distinct person in `req.person_ids`.
    pub fn add_photo(&mut self, req: CreatePhotoRequest) -> Result<Photo> {
        let url = require_text(&req.url, "url")?;
        for person_id in &req.person_ids {
            self.require_person(person_id)?;
        }

        let mut photo = Photo::new(self.ids.next_id(), url);
        photo.date = req.date;
        photo.location = clean_optional(req.location);
        photo.event = clean_optional(req.event);
        photo.description = clean_optional(req.description);
        for person_id in req.person_ids {
            if photo.has_person(&person_id) {
                continue;
            }
            photo.tags.push(PhotoTag {
                id: self.ids.next_id(),
                person_id,
                photo_id: photo.id.clone(),
                coordinates: None,
            });
        }

        self.apply(Mutation::AddPhoto(photo.clone()));
        info!(photo_id = %photo.id, tag_count = photo.tags.len(), "Photo added");
        Ok(photo)
    }

    /// Replace the photo with `photo.id`. Tags are re-pointed at the photo.
    pub fn update_photo(&mut self, photo: Photo) -> Result<()> {
        self.require_photo(&photo.id)?;
        for (i, tag) in photo.tags.iter().enumerate() {
            self.require_person(&tag.person_id)?;
            if photo.tags[..i].iter().any(|t| t.person_id == tag.person_id) {
                return Err(Error::InvalidInput(format!(
                    "{} is tagged more than once in {}",
                    tag.person_id, photo.id
                )));
            }
        }
        let photo = Photo {
            url: require_text(&photo.url, "url")?,
            location: clean_optional(photo.location),
            event: clean_optional(photo.event),
            description: clean_optional(photo.description),
            ..photo
        };
        self.apply(Mutation::UpdatePhoto(photo));
        Ok(())
    }

    pub fn delete_photo(&mut self, photo_id: &str) -> Result<()> {
        self.require_photo(photo_id)?;
        self.apply(Mutation::DeletePhoto(photo_id.to_string()));
        info!(photo_id, "Photo deleted");
        Ok(())
    }

    // =========================================================================
    // Relationships
    // =========================================================================

    /// Relate two people, committing the edge and its inverse partner
    /// together.
    pub fn add_relationship(&mut self, req: CreateRelationshipRequest) -> Result<RelationshipPair> {
        let person1_id = require_text(&req.person1_id, "person1Id")?;
        let person2_id = require_text(&req.person2_id, "person2Id")?;
        if person1_id == person2_id {
            return Err(Error::InvalidInput(
                "A person cannot be related to themselves".to_string(),
            ));
        }
        self.require_person(&person1_id)?;
        self.require_person(&person2_id)?;

        let rels = &self.state.relationships;
        if find_relationship(&person1_id, &person2_id, rels).is_some()
            || find_relationship(&person2_id, &person1_id, rels).is_some()
        {
            return Err(Error::InvalidInput(format!(
                "{} and {} are already related",
                person1_id, person2_id
            )));
        }

        let pair = relationship_pair(
            &person1_id,
            &person2_id,
            req.relationship_type,
            self.ids.as_mut(),
        );
        self.apply(Mutation::AddRelationshipPair(pair.clone()));
        info!(
            relationship_id = %pair.forward.id,
            relationship_type = %req.relationship_type,
            "Relationship added"
        );
        Ok(pair)
    }

    /// Retype an edge. Its partner is retyped to the inverse.
    pub fn update_relationship(
        &mut self,
        relationship_id: &str,
        relationship_type: RelationshipType,
    ) -> Result<()> {
        let edge = self
            .state
            .relationship(relationship_id)
            .ok_or_else(|| Error::RelationshipNotFound(relationship_id.to_string()))?;
        if find_partner(edge, &self.state.relationships).is_none() {
            warn!(
                relationship_id,
                "Relationship has no inverse partner, retyping this edge only"
            );
        }
        self.apply(Mutation::UpdateRelationshipType {
            id: relationship_id.to_string(),
            relationship_type,
        });
        Ok(())
    }

    /// Remove an edge and its partner.
    pub fn delete_relationship(&mut self, relationship_id: &str) -> Result<()> {
        if self.state.relationship(relationship_id).is_none() {
            return Err(Error::RelationshipNotFound(relationship_id.to_string()));
        }
        self.apply(Mutation::DeleteRelationship(relationship_id.to_string()));
        info!(relationship_id, "Relationship deleted");
        Ok(())
    }

    // =========================================================================
    // Tags
    // =========================================================================

    pub fn add_tag(
        &mut self,
        photo_id: &str,
        person_id: &str,
        coordinates: Option<TagCoordinates>,
    ) -> Result<PhotoTag> {
        let photo = self.require_photo(photo_id)?;
        if photo.has_person(person_id) {
            return Err(Error::InvalidInput(format!(
                "{} is already tagged in {}",
                person_id, photo_id
            )));
        }
        self.require_person(person_id)?;

        let tag = PhotoTag {
            id: self.ids.next_id(),
            person_id: person_id.to_string(),
            photo_id: photo_id.to_string(),
            coordinates,
        };
        self.apply(Mutation::AddTag(tag.clone()));
        Ok(tag)
    }

    pub fn remove_tag(&mut self, photo_id: &str, tag_id: &str) -> Result<()> {
        let photo = self.require_photo(photo_id)?;
        if !photo.tags.iter().any(|tag| tag.id == tag_id) {
            return Err(Error::NotFound(format!("Tag {} on photo {}", tag_id, photo_id)));
        }
        self.apply(Mutation::RemoveTag {
            photo_id: photo_id.to_string(),
            tag_id: tag_id.to_string(),
        });
        Ok(())
    }

    // =========================================================================
    // Whole state
    // =========================================================================

    /// Replace the entire state, e.g. with an imported document.
    pub fn replace_state(&mut self, state: AppState) {
        self.apply(Mutation::ReplaceState(state));
    }

    /// Discard everything and start again from the demo dataset.
    pub fn reset_to_seed(&mut self) {
        self.apply(Mutation::ReplaceState(seed_state()));
        info!("State reset to demo dataset");
    }

    /// Run a photo search over the current state.
    pub fn search(&self, query: &str) -> SearchResult {
        let start = Instant::now();
        let result = famface_search::search_state(query, &self.state);
        debug!(
            result_count = result.photos.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Store search finished"
        );
        result
    }
}
