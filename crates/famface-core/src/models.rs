//! Core data models for famface.
//!
//! These types are shared across all famface crates. Field names serialize
//! in camelCase so the persisted document keeps the layout existing state
//! blobs already use.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// PERSON TYPES
// =============================================================================

/// A family member who can be tagged in photos and related to others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Person {
    /// Create a person with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            profile_image: None,
            birthdate: None,
            notes: None,
        }
    }
}

// =============================================================================
// RELATIONSHIP TYPES
// =============================================================================

/// Kind of family relationship carried by a directed edge.
///
/// An edge `(p1, p2, t)` reads "p1 is `t` of p2".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    #[serde(rename = "parent")]
    Parent,
    #[serde(rename = "child")]
    Child,
    #[serde(rename = "sibling")]
    Sibling,
    #[serde(rename = "spouse")]
    Spouse,
    #[serde(rename = "grandparent")]
    Grandparent,
    #[serde(rename = "grandchild")]
    Grandchild,
    #[serde(rename = "uncle/aunt")]
    UncleAunt,
    #[serde(rename = "nephew/niece")]
    NephewNiece,
    #[serde(rename = "cousin")]
    Cousin,
    #[serde(rename = "in-law")]
    InLaw,
    #[serde(rename = "other")]
    Other,
}

impl RelationshipType {
    /// Every relationship type, in the order relationship forms list them.
    pub const ALL: [RelationshipType; 11] = [
        Self::Parent,
        Self::Child,
        Self::Sibling,
        Self::Spouse,
        Self::Grandparent,
        Self::Grandchild,
        Self::UncleAunt,
        Self::NephewNiece,
        Self::Cousin,
        Self::InLaw,
        Self::Other,
    ];

    /// The type of the partner edge: if p1 is `self` of p2, then p2 is
    /// `self.inverse()` of p1.
    pub fn inverse(self) -> Self {
        match self {
            Self::Parent => Self::Child,
            Self::Child => Self::Parent,
            Self::Grandparent => Self::Grandchild,
            Self::Grandchild => Self::Grandparent,
            Self::UncleAunt => Self::NephewNiece,
            Self::NephewNiece => Self::UncleAunt,
            Self::Sibling | Self::Spouse | Self::Cousin | Self::InLaw | Self::Other => self,
        }
    }

    /// True when the type is its own inverse.
    pub fn is_symmetric(self) -> bool {
        self.inverse() == self
    }

    /// Persisted string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Sibling => "sibling",
            Self::Spouse => "spouse",
            Self::Grandparent => "grandparent",
            Self::Grandchild => "grandchild",
            Self::UncleAunt => "uncle/aunt",
            Self::NephewNiece => "nephew/niece",
            Self::Cousin => "cousin",
            Self::InLaw => "in-law",
            Self::Other => "other",
        }
    }

    /// Title-cased name for pickers and listings.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Parent => "Parent",
            Self::Child => "Child",
            Self::Sibling => "Sibling",
            Self::Spouse => "Spouse",
            Self::Grandparent => "Grandparent",
            Self::Grandchild => "Grandchild",
            Self::UncleAunt => "Uncle/Aunt",
            Self::NephewNiece => "Nephew/Niece",
            Self::Cousin => "Cousin",
            Self::InLaw => "In-law",
            Self::Other => "Other",
        }
    }

    /// Human-readable phrase describing this relationship to `name`.
    pub fn label(self, name: &str) -> String {
        match self {
            Self::Parent => format!("Parent of {}", name),
            Self::Child => format!("Child of {}", name),
            Self::Sibling => format!("Sibling of {}", name),
            Self::Spouse => format!("Spouse of {}", name),
            Self::Grandparent => format!("Grandparent of {}", name),
            Self::Grandchild => format!("Grandchild of {}", name),
            Self::UncleAunt => format!("Uncle/Aunt of {}", name),
            Self::NephewNiece => format!("Nephew/Niece of {}", name),
            Self::Cousin => format!("Cousin of {}", name),
            Self::InLaw => format!("In-law of {}", name),
            Self::Other => format!("Related to {}", name),
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parent" => Ok(Self::Parent),
            "child" => Ok(Self::Child),
            "sibling" => Ok(Self::Sibling),
            "spouse" => Ok(Self::Spouse),
            "grandparent" => Ok(Self::Grandparent),
            "grandchild" => Ok(Self::Grandchild),
            "uncle/aunt" | "uncle_aunt" | "uncle-aunt" => Ok(Self::UncleAunt),
            "nephew/niece" | "nephew_niece" | "nephew-niece" => Ok(Self::NephewNiece),
            "cousin" => Ok(Self::Cousin),
            "in-law" | "in_law" | "inlaw" => Ok(Self::InLaw),
            "other" => Ok(Self::Other),
            _ => Err(format!("Invalid relationship type: {}", s)),
        }
    }
}

/// Directed relationship edge: `person1_id` is `relationship_type` of
/// `person2_id`.
///
/// Edges are always stored in matched pairs; see
/// [`crate::relationships::relationship_pair`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub person1_id: String,
    pub person2_id: String,
    pub relationship_type: RelationshipType,
}

impl Relationship {
    /// True when `person_id` is either endpoint of this edge.
    pub fn involves(&self, person_id: &str) -> bool {
        self.person1_id == person_id || self.person2_id == person_id
    }

    /// The endpoint opposite `person_id`. Returns `person1_id` when
    /// `person_id` is not the source.
    pub fn other_endpoint(&self, person_id: &str) -> &str {
        if self.person1_id == person_id {
            &self.person2_id
        } else {
            &self.person1_id
        }
    }
}

// =============================================================================
// PHOTO TYPES
// =============================================================================

/// Bounding box of a tagged face, in image-relative units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagCoordinates {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Links one person to one photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoTag {
    pub id: String,
    pub person_id: String,
    pub photo_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<TagCoordinates>,
}

/// A photo referenced by URL, with optional metadata and its tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<PhotoTag>,
}

impl Photo {
    /// Create an untagged photo with no metadata.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            date: None,
            location: None,
            event: None,
            description: None,
            tags: Vec::new(),
        }
    }

    /// True when any tag on this photo references `person_id`.
    pub fn has_person(&self, person_id: &str) -> bool {
        self.tags.iter().any(|tag| tag.person_id == person_id)
    }

    /// Person ids tagged in this photo, in tag order.
    pub fn tagged_person_ids(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.person_id.as_str())
    }
}

// =============================================================================
// AGGREGATE STATE
// =============================================================================

/// The single aggregate root holding every entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl AppState {
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn photo(&self, id: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Name of the person with `id`, if known.
    pub fn person_name(&self, id: &str) -> Option<&str> {
        self.person(id).map(|p| p.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.relationships.is_empty() && self.photos.is_empty()
    }
}

// =============================================================================
// SEARCH TYPES
// =============================================================================

/// Photos matching a search query, in collection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub photos: Vec<Photo>,
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_is_involution() {
        for t in RelationshipType::ALL {
            assert_eq!(t.inverse().inverse(), t, "inverse not involutive for {}", t);
        }
    }

    #[test]
    fn test_inverse_true_pairs() {
        assert_eq!(RelationshipType::Parent.inverse(), RelationshipType::Child);
        assert_eq!(
            RelationshipType::Grandchild.inverse(),
            RelationshipType::Grandparent
        );
        assert_eq!(
            RelationshipType::UncleAunt.inverse(),
            RelationshipType::NephewNiece
        );
    }

    #[test]
    fn test_symmetric_types() {
        let symmetric: Vec<_> = RelationshipType::ALL
            .into_iter()
            .filter(|t| t.is_symmetric())
            .collect();
        assert_eq!(
            symmetric,
            vec![
                RelationshipType::Sibling,
                RelationshipType::Spouse,
                RelationshipType::Cousin,
                RelationshipType::InLaw,
                RelationshipType::Other,
            ]
        );
    }

    #[test]
    fn test_display_name_is_title_cased() {
        assert_eq!(RelationshipType::UncleAunt.display_name(), "Uncle/Aunt");
        assert_eq!(RelationshipType::InLaw.display_name(), "In-law");
        for t in RelationshipType::ALL {
            let first = t.display_name().chars().next().unwrap();
            assert!(first.is_ascii_uppercase(), "{}", t);
        }
    }

    #[test]
    fn test_label_parent() {
        assert_eq!(RelationshipType::Parent.label("Anjali"), "Parent of Anjali");
    }

    #[test]
    fn test_label_other_reads_related_to() {
        assert_eq!(RelationshipType::Other.label("Maya"), "Related to Maya");
        assert_eq!(RelationshipType::InLaw.label("Raj"), "In-law of Raj");
    }

    #[test]
    fn test_relationship_type_serde_uses_persisted_strings() {
        let json = serde_json::to_string(&RelationshipType::UncleAunt).unwrap();
        assert_eq!(json, "\"uncle/aunt\"");

        let parsed: RelationshipType = serde_json::from_str("\"in-law\"").unwrap();
        assert_eq!(parsed, RelationshipType::InLaw);
    }

    #[test]
    fn test_relationship_type_from_str_round_trips_as_str() {
        for t in RelationshipType::ALL {
            assert_eq!(t.as_str().parse::<RelationshipType>().unwrap(), t);
        }
        assert_eq!(
            "Nephew/Niece".parse::<RelationshipType>().unwrap(),
            RelationshipType::NephewNiece
        );
        assert!("stepfather".parse::<RelationshipType>().is_err());
    }

    #[test]
    fn test_relationship_serializes_camel_case() {
        let rel = Relationship {
            id: "r1".into(),
            person1_id: "p1".into(),
            person2_id: "p3".into(),
            relationship_type: RelationshipType::Child,
        };
        let value = serde_json::to_value(&rel).unwrap();
        assert_eq!(value["person1Id"], "p1");
        assert_eq!(value["person2Id"], "p3");
        assert_eq!(value["relationshipType"], "child");
    }

    #[test]
    fn test_person_omits_absent_optionals() {
        let person = Person::new("p9", "Dev");
        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(value, serde_json::json!({"id": "p9", "name": "Dev"}));
    }

    #[test]
    fn test_person_parses_birthdate() {
        let person: Person = serde_json::from_str(
            r#"{"id":"p1","name":"Anjali","birthdate":"1990-05-15","profileImage":"x.jpg"}"#,
        )
        .unwrap();
        assert_eq!(person.birthdate, NaiveDate::from_ymd_opt(1990, 5, 15));
        assert_eq!(person.profile_image.as_deref(), Some("x.jpg"));
    }

    #[test]
    fn test_photo_tags_default_to_empty() {
        let photo: Photo = serde_json::from_str(r#"{"id":"ph","url":"u"}"#).unwrap();
        assert!(photo.tags.is_empty());
        assert!(!photo.has_person("p1"));
    }

    #[test]
    fn test_relationship_other_endpoint() {
        let rel = Relationship {
            id: "r".into(),
            person1_id: "a".into(),
            person2_id: "b".into(),
            relationship_type: RelationshipType::Sibling,
        };
        assert_eq!(rel.other_endpoint("a"), "b");
        assert_eq!(rel.other_endpoint("b"), "a");
        assert!(rel.involves("b"));
        assert!(!rel.involves("c"));
    }

    #[test]
    fn test_app_state_lookups() {
        let state = AppState {
            people: vec![Person::new("p1", "Anjali")],
            relationships: vec![],
            photos: vec![Photo::new("ph1", "https://example.com/1.jpg")],
        };
        assert_eq!(state.person_name("p1"), Some("Anjali"));
        assert!(state.person("missing").is_none());
        assert!(state.photo("ph1").is_some());
        assert!(state.relationship("r1").is_none());
        assert!(!state.is_empty());
        assert!(AppState::default().is_empty());
    }
}
