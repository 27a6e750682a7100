use crate::comparison::{compare_inspections, Bucket, RoomComparison};
use crate::errors::InspectionError;
use crate::markers::assign_markers;
use crate::models::{Inspection, InspectionType};
use crate::report::config::{BucketVisibility, ComparisonVisibility, ReportContext};
use crate::report::document::{
    AnalysisBlock, BucketBlock, BucketContent, Header, PhotoAnalysisBlock, PhotoPairBlock,
    ReportDocument, ReportMode, RoomSection, SummaryBlock,
};

/// Copy of the inspection with marker coordinates filled in for every object.
fn with_markers(inspection: &Inspection) -> Inspection {
    let mut enriched = inspection.clone();
    for photo in &mut enriched.photos {
        if let Some(analysis) = photo.analysis.as_mut() {
            assign_markers(&mut analysis.objects);
        }
    }
    enriched
}

fn header(title: &str, context: &ReportContext, date: chrono::DateTime<chrono::Utc>) -> Header {
    Header {
        title: title.to_string(),
        property: context.property.clone(),
        inspector: context.inspector.clone(),
        branding: context.branding.clone(),
        date,
        generated_at: context.generated_at,
        legal_boilerplate: context.legal_boilerplate.clone(),
    }
}

/// Report for one inspection: one analysis block per photo, grouped by room.
pub fn assemble_single(inspection: &Inspection, context: &ReportContext) -> ReportDocument {
    let inspection = with_markers(inspection);

    let rooms: Vec<RoomSection> = inspection
        .rooms()
        .into_iter()
        .map(|room| {
            let blocks = inspection
                .photos_in_room(&room)
                .into_iter()
                .map(|photo| {
                    PhotoAnalysisBlock::Analysis(AnalysisBlock {
                        photo_id: photo.id.clone(),
                        photo_url: photo.photo_url.clone(),
                        analysis: photo.analysis.clone(),
                    })
                })
                .collect();
            RoomSection { room, blocks }
        })
        .collect();

    let title = match inspection.inspection_type {
        InspectionType::Entry => "Entry inspection report",
        InspectionType::Exit => "Exit inspection report",
    };

    ReportDocument {
        mode: ReportMode::Single,
        header: header(title, context, inspection.inspection_date),
        summary: SummaryBlock::for_single(&rooms),
        observations: inspection.general_observations.clone(),
        rooms,
    }
}

fn bucket_label(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Changed => "Changed",
        Bucket::Unchanged => "Unchanged",
        Bucket::New => "New items",
        Bucket::Missing => "Missing items",
    }
}

/// Section for one compared room, or `None` when nothing enabled is left to
/// show.
fn comparison_section(room: RoomComparison, visibility: BucketVisibility) -> Option<RoomSection> {
    let bucket_blocks: Vec<PhotoAnalysisBlock> = Bucket::ALL
        .into_iter()
        .filter(|bucket| visibility.is_visible(*bucket))
        .filter(|bucket| !room.buckets.get(*bucket).is_empty())
        .map(|bucket| {
            let items = room.buckets.get(bucket);
            let content = match bucket {
                Bucket::Unchanged => BucketContent::Count(items.len()),
                _ => BucketContent::Items(items.to_vec()),
            };
            PhotoAnalysisBlock::Bucket(BucketBlock {
                bucket,
                label: bucket_label(bucket).to_string(),
                content,
            })
        })
        .collect();

    if bucket_blocks.is_empty() {
        return None;
    }

    let mut blocks = Vec::with_capacity(bucket_blocks.len() + 1);
    blocks.push(PhotoAnalysisBlock::PhotoPair(PhotoPairBlock {
        entry_photo_urls: room.entry_photo_urls,
        exit_photo_urls: room.exit_photo_urls,
    }));
    blocks.extend(bucket_blocks);

    Some(RoomSection {
        room: room.room,
        blocks,
    })
}

/// Entry/exit comparison report. Rooms with no visible bucket content are
/// left out.
pub fn assemble_comparison(
    entry: &Inspection,
    exit: &Inspection,
    visibility: &ComparisonVisibility,
    context: &ReportContext,
) -> Result<ReportDocument, InspectionError> {
    if entry.inspection_type != InspectionType::Entry || exit.inspection_type != InspectionType::Exit {
        return Err(InspectionError::InspectionMismatch(format!(
            "expected entry/exit, got {}/{}",
            entry.inspection_type.as_str(),
            exit.inspection_type.as_str()
        )));
    }
    if entry.property_id != exit.property_id {
        return Err(InspectionError::InspectionMismatch(format!(
            "property {} differs from {}",
            entry.property_id, exit.property_id
        )));
    }

    let entry = with_markers(entry);
    let exit = with_markers(exit);

    let rooms: Vec<RoomSection> = compare_inspections(&entry, &exit)
        .into_iter()
        .filter_map(|room| {
            let room_visibility = visibility.for_room(&room.room);
            comparison_section(room, room_visibility)
        })
        .collect();

    Ok(ReportDocument {
        mode: ReportMode::Comparison,
        header: header("Entry/exit comparison report", context, exit.inspection_date),
        summary: SummaryBlock::for_comparison(&rooms),
        observations: exit.general_observations.clone(),
        rooms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AnalysisResult, DetectedIssue, DetectedObject, InspectionStatus, ObjectCondition, Photo,
    };
    use crate::report::config::{CompanyBranding, InspectorInfo, PropertyInfo};
    use chrono::{TimeZone, Utc};

    fn context() -> ReportContext {
        ReportContext {
            property: PropertyInfo {
                id: "prop-1".into(),
                name: "Apto 101".into(),
                address: Some("Rua A, 10".into()),
            },
            inspector: InspectorInfo {
                name: "Ana".into(),
                registration: None,
            },
            branding: CompanyBranding {
                name: "Vistorias Ltda".into(),
                ..Default::default()
            },
            legal_boilerplate: "Documento gerado automaticamente.".into(),
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn photo(id: &str, room: &str, objects: &[(&str, ObjectCondition)], issues: usize) -> Photo {
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
                issues: (0..issues).map(|_| DetectedIssue::default()).collect(),
                ..Default::default()
            }),
            image_hash: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    fn inspection(kind: InspectionType, photos: Vec<Photo>) -> Inspection {
        Inspection {
            id: kind.as_str().into(),
            property_id: "prop-1".into(),
            inspection_date: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            status: InspectionStatus::InProgress,
            inspection_type: kind,
            general_observations: Some("Sem observações".into()),
            photos,
        }
    }

    #[test]
    fn test_single_report_has_block_per_photo_and_markers() {
        let mut no_analysis = photo("p3", "Sala", &[], 0);
        no_analysis.analysis = None;
        let entry = inspection(
            InspectionType::Entry,
            vec![
                photo("p1", "Sala", &[("sofá", ObjectCondition::Good), ("quadro", ObjectCondition::Good)], 2),
                photo("p2", "Cozinha", &[], 1),
                no_analysis,
            ],
        );

        let doc = assemble_single(&entry, &context());

        assert_eq!(doc.mode, ReportMode::Single);
        assert_eq!(doc.rooms.len(), 2);
        assert_eq!(doc.rooms[0].room, "Sala");
        assert_eq!(doc.rooms[0].blocks.len(), 2);
        assert_eq!(
            doc.summary,
            SummaryBlock::Single {
                total_rooms: 2,
                total_photos: 3,
                total_issues: 3
            }
        );
        match &doc.rooms[0].blocks[0] {
            PhotoAnalysisBlock::Analysis(block) => {
                let objects = &block.analysis.as_ref().unwrap().objects;
                assert!(objects.iter().all(|o| o.marker_coordinates.is_some()));
            }
            other => panic!("unexpected block {other:?}"),
        }
        assert_eq!(doc.header.property.name, "Apto 101");
        assert_eq!(doc.header.title, "Entry inspection report");
        assert_eq!(doc.header.generated_at, context().generated_at);
        assert_ne!(doc.header.date, doc.header.generated_at);
    }

    #[test]
    fn test_comparison_emits_pair_then_visible_buckets() {
        let entry = inspection(
            InspectionType::Entry,
            vec![photo(
                "e1",
                "Cozinha",
                &[("geladeira", ObjectCondition::Good), ("pia", ObjectCondition::Good)],
                0,
            )],
        );
        let exit = inspection(
            InspectionType::Exit,
            vec![photo(
                "x1",
                "Cozinha",
                &[("geladeira", ObjectCondition::Damaged), ("pia", ObjectCondition::Good)],
                0,
            )],
        );

        let doc = assemble_comparison(&entry, &exit, &ComparisonVisibility::default(), &context())
            .unwrap();

        let blocks = &doc.rooms[0].blocks;
        assert!(matches!(blocks[0], PhotoAnalysisBlock::PhotoPair(_)));
        match &blocks[1] {
            PhotoAnalysisBlock::Bucket(block) => {
                assert_eq!(block.bucket, Bucket::Changed);
                assert_eq!(block.count(), 1);
            }
            other => panic!("unexpected block {other:?}"),
        }
        match &blocks[2] {
            PhotoAnalysisBlock::Bucket(block) => {
                assert_eq!(block.content, BucketContent::Count(1));
            }
            other => panic!("unexpected block {other:?}"),
        }
        assert_eq!(
            doc.summary,
            SummaryBlock::Comparison {
                total_rooms: 1,
                total_photos: 2,
                changed: 1,
                unchanged: 1,
                new: 0,
                missing: 0
            }
        );
    }

    #[test]
    fn test_room_without_visible_content_is_omitted() {
        let entry = inspection(
            InspectionType::Entry,
            vec![
                photo("e1", "Sala", &[("sofá", ObjectCondition::Good)], 0),
                photo("e2", "Quarto", &[("cama", ObjectCondition::Good)], 0),
            ],
        );
        let exit = inspection(
            InspectionType::Exit,
            vec![
                photo("x1", "Sala", &[("sofá", ObjectCondition::Good)], 0),
                photo("x2", "Quarto", &[], 0),
            ],
        );
        let visibility = ComparisonVisibility::new(BucketVisibility {
            unchanged: false,
            ..Default::default()
        });

        let doc = assemble_comparison(&entry, &exit, &visibility, &context()).unwrap();

        assert_eq!(doc.rooms.len(), 1);
        assert_eq!(doc.rooms[0].room, "Quarto");
        assert_eq!(
            doc.summary,
            SummaryBlock::Comparison {
                total_rooms: 1,
                total_photos: 2,
                changed: 0,
                unchanged: 0,
                new: 0,
                missing: 1
            }
        );
    }

    #[test]
    fn test_swapped_inspections_are_rejected() {
        let entry = inspection(InspectionType::Entry, Vec::new());
        let exit = inspection(InspectionType::Exit, Vec::new());

        let result = assemble_comparison(&exit, &entry, &ComparisonVisibility::default(), &context());

        assert!(matches!(result, Err(InspectionError::InspectionMismatch(_))));
    }

    #[test]
    fn test_compared_objects_carry_markers() {
        let entry = inspection(InspectionType::Entry, vec![photo("e1", "Sala", &[("tv", ObjectCondition::Good)], 0)]);
        let exit = inspection(InspectionType::Exit, vec![photo("x1", "Sala", &[], 0)]);

        let doc = assemble_comparison(&entry, &exit, &ComparisonVisibility::default(), &context())
            .unwrap();

        match &doc.rooms[0].blocks[1] {
            PhotoAnalysisBlock::Bucket(BucketBlock {
                content: BucketContent::Items(items),
                ..
            }) => {
                let entry_obj = items[0].entry.as_ref().unwrap();
                assert!(entry_obj.marker_coordinates.is_some());
            }
            other => panic!("unexpected block {other:?}"),
        }
    }
}
