//! Demo dataset used when no persisted state is available.

use chrono::NaiveDate;

use crate::models::{AppState, Person, Photo, PhotoTag, Relationship, RelationshipType};

const PEXELS_PARAMS: &str = "auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1";

fn pexels(photo_number: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{n}/pexels-photo-{n}.jpeg?{PEXELS_PARAMS}",
        n = photo_number
    )
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn person(id: &str, name: &str, image: u32, birthdate: Option<NaiveDate>) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        profile_image: Some(pexels(image)),
        birthdate,
        notes: None,
    }
}

fn edge(id: &str, p1: &str, p2: &str, relationship_type: RelationshipType) -> Relationship {
    Relationship {
        id: id.to_string(),
        person1_id: p1.to_string(),
        person2_id: p2.to_string(),
        relationship_type,
    }
}

struct PhotoSeed<'a> {
    id: &'a str,
    image: u32,
    date: Option<NaiveDate>,
    event: &'a str,
    location: &'a str,
    description: &'a str,
    tags: &'a [(&'a str, &'a str)],
}

impl PhotoSeed<'_> {
    fn build(&self) -> Photo {
        Photo {
            id: self.id.to_string(),
            url: pexels(self.image),
            date: self.date,
            location: Some(self.location.to_string()),
            event: Some(self.event.to_string()),
            description: Some(self.description.to_string()),
            tags: self
                .tags
                .iter()
                .map(|(tag_id, person_id)| PhotoTag {
                    id: tag_id.to_string(),
                    person_id: person_id.to_string(),
                    photo_id: self.id.to_string(),
                    coordinates: None,
                })
                .collect(),
        }
    }
}

pub fn seed_people() -> Vec<Person> {
    vec![
        person("p1", "Anjali", 1239291, date(1990, 5, 15)),
        person("p2", "Raj", 220453, date(1988, 10, 20)),
        person("p3", "Bade Papa", 834863, date(1960, 3, 12)),
        person("p4", "Bade Mummy", 3152046, date(1962, 7, 28)),
        person("p5", "Maya", 733872, date(1992, 11, 30)),
    ]
}

pub fn seed_relationships() -> Vec<Relationship> {
    use RelationshipType::*;
    vec![
        edge("r1", "p1", "p3", Child),
        edge("r2", "p3", "p1", Parent),
        edge("r3", "p1", "p4", Child),
        edge("r4", "p4", "p1", Parent),
        edge("r5", "p3", "p4", Spouse),
        edge("r6", "p4", "p3", Spouse),
        edge("r7", "p1", "p2", Spouse),
        edge("r8", "p2", "p1", Spouse),
        edge("r9", "p1", "p5", Sibling),
        edge("r10", "p5", "p1", Sibling),
    ]
}

pub fn seed_photos() -> Vec<Photo> {
    [
        PhotoSeed {
            id: "photo1",
            image: 1128318,
            date: date(2023, 1, 15),
            event: "Family Dinner",
            location: "Home",
            description: "Family dinner celebration",
            tags: &[("t1", "p1"), ("t2", "p2")],
        },
        PhotoSeed {
            id: "photo2",
            image: 3767420,
            date: date(2023, 2, 20),
            event: "Birthday Party",
            location: "Garden",
            description: "Anjali's birthday celebration",
            tags: &[("t3", "p1"), ("t4", "p3"), ("t5", "p4")],
        },
        PhotoSeed {
            id: "photo3",
            image: 1416736,
            date: date(2022, 12, 25),
            event: "Christmas",
            location: "Living Room",
            description: "Christmas family gathering",
            tags: &[("t6", "p3"), ("t7", "p4")],
        },
        PhotoSeed {
            id: "photo4",
            image: 1157940,
            date: date(2023, 3, 10),
            event: "Picnic",
            location: "Park",
            description: "Family picnic at the park",
            tags: &[("t8", "p1"), ("t9", "p5")],
        },
        PhotoSeed {
            id: "photo5",
            image: 1471235,
            date: date(2023, 4, 5),
            event: "Vacation",
            location: "Beach",
            description: "Family vacation at the beach",
            tags: &[("t10", "p1"), ("t11", "p2"), ("t12", "p5")],
        },
    ]
    .iter()
    .map(PhotoSeed::build)
    .collect()
}

/// The full demo state: five people, five relationship pairs' worth of
/// edges, and five tagged photos.
pub fn seed_state() -> AppState {
    AppState {
        people: seed_people(),
        relationships: seed_relationships(),
        photos: seed_photos(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationships::find_partner;

    #[test]
    fn test_seed_counts() {
        let state = seed_state();
        assert_eq!(state.people.len(), 5);
        assert_eq!(state.relationships.len(), 10);
        assert_eq!(state.photos.len(), 5);
    }

    #[test]
    fn test_seed_edges_are_paired() {
        let state = seed_state();
        for rel in &state.relationships {
            assert!(
                find_partner(rel, &state.relationships).is_some(),
                "edge {} has no partner",
                rel.id
            );
        }
    }

    #[test]
    fn test_seed_tags_point_at_owning_photo_and_known_people() {
        let state = seed_state();
        for photo in &state.photos {
            for tag in &photo.tags {
                assert_eq!(tag.photo_id, photo.id);
                assert!(state.person(&tag.person_id).is_some());
            }
        }
    }
}
