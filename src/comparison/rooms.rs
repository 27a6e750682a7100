use serde::{Deserialize, Serialize};

use crate::comparison::matcher::{match_objects, ObjectBuckets};
use crate::models::{normalize_name, DetectedObject, Inspection, Photo};

/// Comparison of one room between the entry and the exit inspection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomComparison {
    pub room: String,
    pub entry_photo_urls: Vec<String>,
    pub exit_photo_urls: Vec<String>,
    pub buckets: ObjectBuckets,
}

impl RoomComparison {
    pub fn photo_count(&self) -> usize {
        self.entry_photo_urls.len() + self.exit_photo_urls.len()
    }
}

/// Objects of all photos on one side, each stamped with its photo URL when
/// the detector did not provide one.
fn collect_objects(photos: &[&Photo]) -> Vec<DetectedObject> {
    photos
        .iter()
        .filter_map(|photo| photo.analysis.as_ref().map(|analysis| (photo, analysis)))
        .flat_map(|(photo, analysis)| {
            analysis.objects.iter().map(move |obj| {
                let mut obj = obj.clone();
                if obj.photo_url.is_none() {
                    obj.photo_url = Some(photo.photo_url.clone());
                }
                obj
            })
        })
        .collect()
}

/// Match one room. The side of a bucket entry that has no object falls back
/// to that side's first room photo, so `new` entries still show the entry room
/// and `missing` entries show the exit photo proving absence.
pub fn compare_room(room: &str, entry_photos: &[&Photo], exit_photos: &[&Photo]) -> RoomComparison {
    let entry_photo_urls: Vec<String> = entry_photos.iter().map(|p| p.photo_url.clone()).collect();
    let exit_photo_urls: Vec<String> = exit_photos.iter().map(|p| p.photo_url.clone()).collect();

    let mut buckets = match_objects(&collect_objects(entry_photos), &collect_objects(exit_photos));

    for compared in buckets
        .changed
        .iter_mut()
        .chain(buckets.unchanged.iter_mut())
        .chain(buckets.new.iter_mut())
        .chain(buckets.missing.iter_mut())
    {
        if compared.entry_photo_url.is_none() {
            compared.entry_photo_url = entry_photo_urls.first().cloned();
        }
        if compared.exit_photo_url.is_none() {
            compared.exit_photo_url = exit_photo_urls.first().cloned();
        }
    }

    RoomComparison {
        room: room.to_string(),
        entry_photo_urls,
        exit_photo_urls,
        buckets,
    }
}

/// Compare every room of two inspections. Entry rooms come first in creation
/// order, followed by rooms that only exist at exit.
pub fn compare_inspections(entry: &Inspection, exit: &Inspection) -> Vec<RoomComparison> {
    let mut rooms = entry.rooms();
    let entry_keys: Vec<String> = rooms.iter().map(|room| normalize_name(room)).collect();
    rooms.extend(
        exit.rooms()
            .into_iter()
            .filter(|room| !entry_keys.contains(&normalize_name(room))),
    );

    rooms
        .iter()
        .map(|room| compare_room(room, &entry.photos_in_room(room), &exit.photos_in_room(room)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AnalysisResult, InspectionStatus, InspectionType, ObjectCondition,
    };
    use chrono::{TimeZone, Utc};

    fn photo(id: &str, room: &str, objects: &[(&str, ObjectCondition)], minute: u32) -> Photo {
        Photo {
            id: id.into(),
            inspection_id: "insp".into(),
            photo_url: format!("https://cdn/{id}.jpg"),
            room: room.into(),
            analysis: Some(AnalysisResult {
                objects: objects
                    .iter()
                    .map(|(item, condition)| DetectedObject {
                        id: format!("{id}-{item}"),
                        item: (*item).into(),
                        condition: *condition,
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }),
            image_hash: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, minute, 0).unwrap(),
        }
    }

    fn inspection(kind: InspectionType, photos: Vec<Photo>) -> Inspection {
        Inspection {
            id: kind.as_str().into(),
            property_id: "prop".into(),
            inspection_date: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            status: InspectionStatus::InProgress,
            inspection_type: kind,
            general_observations: None,
            photos,
        }
    }

    #[test]
    fn test_room_present_only_at_entry_yields_missing() {
        let entry = inspection(
            InspectionType::Entry,
            vec![photo("e1", "Sala", &[("sofá", ObjectCondition::Good)], 0)],
        );
        let exit = inspection(InspectionType::Exit, Vec::new());

        let rooms = compare_inspections(&entry, &exit);

        assert_eq!(rooms.len(), 1);
        let sala = &rooms[0];
        assert_eq!(sala.buckets.missing.len(), 1);
        assert_eq!(sala.buckets.missing[0].entry_photo_url.as_deref(), Some("https://cdn/e1.jpg"));
        assert!(sala.buckets.missing[0].exit_photo_url.is_none());
    }

    #[test]
    fn test_room_present_only_at_exit_yields_only_new() {
        let entry = inspection(
            InspectionType::Entry,
            vec![photo("e1", "Sala", &[("sofá", ObjectCondition::Good)], 0)],
        );
        let exit = inspection(
            InspectionType::Exit,
            vec![
                photo("x1", "Sala", &[("sofá", ObjectCondition::Good)], 0),
                photo(
                    "x2",
                    "Varanda",
                    &[("rede", ObjectCondition::Good), ("vaso", ObjectCondition::Worn)],
                    1,
                ),
            ],
        );

        let rooms = compare_inspections(&entry, &exit);

        assert_eq!(rooms.len(), 2);
        let varanda = &rooms[1];
        assert_eq!(varanda.room, "Varanda");
        assert!(varanda.entry_photo_urls.is_empty());
        assert_eq!(varanda.buckets.new.len(), 2);
        assert!(varanda.buckets.changed.is_empty());
        assert!(varanda.buckets.unchanged.is_empty());
        assert!(varanda.buckets.missing.is_empty());
        assert!(varanda.buckets.new.iter().all(|o| o.entry.is_none()
            && o.exit_photo_url.as_deref() == Some("https://cdn/x2.jpg")));
    }

    #[test]
    fn test_new_object_keeps_entry_room_photo_for_context() {
        let entry = inspection(InspectionType::Entry, vec![photo("e1", "Quarto", &[], 0)]);
        let exit = inspection(
            InspectionType::Exit,
            vec![photo("x1", "quarto", &[("cama", ObjectCondition::New)], 0)],
        );

        let rooms = compare_inspections(&entry, &exit);

        assert_eq!(rooms.len(), 1);
        let new = &rooms[0].buckets.new[0];
        assert_eq!(new.entry_photo_url.as_deref(), Some("https://cdn/e1.jpg"));
        assert_eq!(new.exit_photo_url.as_deref(), Some("https://cdn/x1.jpg"));
    }

    #[test]
    fn test_exit_only_rooms_come_after_entry_rooms() {
        let entry = inspection(
            InspectionType::Entry,
            vec![photo("e1", "Cozinha", &[], 0), photo("e2", "Sala", &[], 1)],
        );
        let exit = inspection(
            InspectionType::Exit,
            vec![photo("x1", "Varanda", &[], 0), photo("x2", "Sala", &[], 1)],
        );

        let names: Vec<String> = compare_inspections(&entry, &exit)
            .into_iter()
            .map(|room| room.room)
            .collect();

        assert_eq!(names, vec!["Cozinha", "Sala", "Varanda"]);
    }

    #[test]
    fn test_objects_across_photos_of_a_room_are_pooled() {
        let entry = inspection(
            InspectionType::Entry,
            vec![
                photo("e1", "Banheiro", &[("pia", ObjectCondition::Good)], 0),
                photo("e2", "Banheiro", &[("espelho", ObjectCondition::Good)], 1),
            ],
        );
        let exit = inspection(
            InspectionType::Exit,
            vec![photo(
                "x1",
                "Banheiro",
                &[("espelho", ObjectCondition::Damaged), ("pia", ObjectCondition::Good)],
                0,
            )],
        );

        let rooms = compare_inspections(&entry, &exit);
        let buckets = &rooms[0].buckets;

        assert_eq!(buckets.changed.len(), 1);
        assert_eq!(buckets.changed[0].entry_photo_url.as_deref(), Some("https://cdn/e2.jpg"));
        assert_eq!(buckets.unchanged.len(), 1);
        assert_eq!(rooms[0].photo_count(), 3);
    }
}
