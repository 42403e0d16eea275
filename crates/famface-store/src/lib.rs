//! # famface-store
//!
//! State ownership and persistence for famface.
//!
//! This crate provides:
//! - [`FamilyStore`]: validated mutations that keep the relationship pairing
//!   and person-deletion cascade invariants
//! - [`reduce`]: the pure whole-state transition behind every mutation
//! - Pluggable blob storage ([`FileBackend`], [`MemoryBackend`])
//! - [`StoreConfig`] loaded from TOML or `FAMFACE_*` environment variables
//!
//! ## Example
//!
//! ```
//! use famface_store::{CreatePersonRequest, FamilyStore, MemoryBackend, StoreConfig};
//!
//! let mut store = FamilyStore::open(MemoryBackend::new(), &StoreConfig::default());
//! let person = store.add_person(CreatePersonRequest::new("Priya")).unwrap();
//! assert!(store.state().person(&person.id).is_some());
//! ```

pub mod backend;
pub mod config;
pub mod mutation;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StateBackend};
pub use config::StoreConfig;
pub use mutation::{reduce, Mutation};
pub use store::{
    decode_state, encode_state, CreatePersonRequest, CreatePhotoRequest,
    CreateRelationshipRequest, FamilyStore,
};
