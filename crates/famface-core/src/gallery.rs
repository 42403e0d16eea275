//! Gallery views over the photo collection: per-person filters, date and
//! event grouping, and summary counts.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::defaults::{NO_DATE_LABEL, RECENT_PHOTO_COUNT, UNCATEGORIZED_LABEL};
use crate::models::{Person, Photo};

/// Photos in which `person_id` is tagged, in collection order.
pub fn photos_of<'a>(person_id: &str, photos: &'a [Photo]) -> Vec<&'a Photo> {
    photos
        .iter()
        .filter(|photo| photo.has_person(person_id))
        .collect()
}

/// People tagged in `photo`, in tag order. Tags naming unknown people are
/// skipped.
pub fn tagged_people<'a>(photo: &Photo, people: &'a [Person]) -> Vec<&'a Person> {
    photo
        .tags
        .iter()
        .filter_map(|tag| people.iter().find(|p| p.id == tag.person_id))
        .collect()
}

/// Newest first; undated photos keep their relative order at the end.
pub fn sort_by_date_desc(photos: &[Photo]) -> Vec<&Photo> {
    let mut sorted: Vec<&Photo> = photos.iter().collect();
    // Option orders None first, so reversing the comparison puts it last.
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// The `count` most recent photos.
pub fn recent_photos(photos: &[Photo], count: usize) -> Vec<&Photo> {
    let mut sorted = sort_by_date_desc(photos);
    sorted.truncate(count);
    sorted
}

/// The most recent photos tagging `person_id`, as shown on a profile.
pub fn recent_photos_of<'a>(person_id: &str, photos: &'a [Photo]) -> Vec<&'a Photo> {
    let mut tagged = photos_of(person_id, photos);
    tagged.sort_by(|a, b| b.date.cmp(&a.date));
    tagged.truncate(RECENT_PHOTO_COUNT);
    tagged
}

/// Photos sharing a date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup<'a> {
    pub date: Option<NaiveDate>,
    pub photos: Vec<&'a Photo>,
}

impl DateGroup<'_> {
    /// Heading for the group: a formatted date or "No Date".
    pub fn heading(&self) -> String {
        match self.date {
            Some(date) => format_date(date),
            None => NO_DATE_LABEL.to_string(),
        }
    }
}

/// Group photos by date, newest date first and undated photos last.
/// Photos inside a group keep collection order.
pub fn group_by_date(photos: &[Photo]) -> Vec<DateGroup<'_>> {
    let mut groups: Vec<DateGroup<'_>> = Vec::new();
    for photo in photos {
        match groups.iter_mut().find(|g| g.date == photo.date) {
            Some(group) => group.photos.push(photo),
            None => groups.push(DateGroup {
                date: photo.date,
                photos: vec![photo],
            }),
        }
    }
    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

/// Photos sharing an event name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventGroup<'a> {
    pub event: String,
    pub photos: Vec<&'a Photo>,
}

/// Group photos by event, alphabetically, with uncategorized photos last.
pub fn group_by_event(photos: &[Photo]) -> Vec<EventGroup<'_>> {
    let mut groups: Vec<EventGroup<'_>> = Vec::new();
    for photo in photos {
        let event = photo
            .event
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(UNCATEGORIZED_LABEL);
        match groups.iter_mut().find(|g| g.event == event) {
            Some(group) => group.photos.push(photo),
            None => groups.push(EventGroup {
                event: event.to_string(),
                photos: vec![photo],
            }),
        }
    }
    groups.sort_by(|a, b| {
        let a_unc = a.event == UNCATEGORIZED_LABEL;
        let b_unc = b.event == UNCATEGORIZED_LABEL;
        a_unc
            .cmp(&b_unc)
            .then_with(|| a.event.to_lowercase().cmp(&b.event.to_lowercase()))
    });
    groups
}

/// Summary counts shown above a gallery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GalleryStats {
    pub photo_count: usize,
    pub people_tagged: usize,
    pub event_count: usize,
}

pub fn gallery_stats<'a, I>(photos: I) -> GalleryStats
where
    I: IntoIterator<Item = &'a Photo>,
{
    let mut photo_count = 0;
    let mut people: HashSet<&str> = HashSet::new();
    let mut events: HashSet<&str> = HashSet::new();

    for photo in photos {
        photo_count += 1;
        people.extend(photo.tagged_person_ids());
        if let Some(event) = photo.event.as_deref().filter(|e| !e.is_empty()) {
            events.insert(event);
        }
    }

    GalleryStats {
        photo_count,
        people_tagged: people.len(),
        event_count: events.len(),
    }
}

/// People whose name contains `query`, ignoring case. An empty query keeps
/// everyone.
pub fn filter_people_by_name<'a>(people: &'a [Person], query: &str) -> Vec<&'a Person> {
    let needle = query.to_lowercase();
    people
        .iter()
        .filter(|person| person.name.to_lowercase().contains(&needle))
        .collect()
}

/// Long-form date, e.g. `January 15, 2023`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
