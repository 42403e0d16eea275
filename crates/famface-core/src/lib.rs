//! # famface-core
//!
//! Core types and read-side queries for the famface family photo organizer.
//!
//! This crate provides the domain model (people, relationship edges, photos,
//! tags), the relationship graph queries, gallery helpers, and the demo
//! dataset. Nothing here mutates state; the store crate owns mutation.

pub mod defaults;
pub mod error;
pub mod gallery;
pub mod ids;
pub mod logging;
pub mod models;
pub mod relationships;
pub mod seed;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use gallery::{
    filter_people_by_name, format_date, gallery_stats, group_by_date, group_by_event,
    photos_of, recent_photos, recent_photos_of, sort_by_date_desc, tagged_people, DateGroup, EventGroup,
    GalleryStats,
};
pub use ids::{new_v7, IdSource, SequentialIds, UuidIds};
pub use models::*;
pub use relationships::{
    available_partners, describe_relationships, find_partner, find_relationship,
    group_by_person, inverse, related_people, relationship_label, relationship_pair,
    relationships_for_person, PersonRelationships, RelationshipPair, RelationshipView,
};
pub use seed::seed_state;
