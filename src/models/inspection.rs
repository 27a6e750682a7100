//! Inspection and photo models.
//!
//! Rooms are not stored: they are the distinct `room` labels of an
//! inspection's photos, in the order the photos were created.

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use super::analysis::{normalize_name, AnalysisResult};
use super::records::{InspectionRecord, PhotoRecord};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionStatus {
    Pending,
    InProgress,
    Completed,
}

impl InspectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::Pending => "pending",
            InspectionStatus::InProgress => "in-progress",
            InspectionStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pending" => Some(InspectionStatus::Pending),
            "in-progress" | "in_progress" => Some(InspectionStatus::InProgress),
            "completed" => Some(InspectionStatus::Completed),
            _ => None,
        }
    }

    /// Status after moving towards `next`. Never moves backwards.
    pub fn advance(self, next: InspectionStatus) -> InspectionStatus {
        self.max(next)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InspectionType {
    Entry,
    Exit,
}

impl InspectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionType::Entry => "entry",
            InspectionType::Exit => "exit",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "entry" => Some(InspectionType::Entry),
            "exit" => Some(InspectionType::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub inspection_id: String,
    pub photo_url: String,
    pub room: String,
    pub analysis: Option<AnalysisResult>,
    pub image_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// Build a photo from a storage record. A broken analysis document is
    /// dropped rather than failing the whole inspection.
    pub fn from_record(record: PhotoRecord) -> Self {
        let analysis = record.ai_analysis_result.as_deref().and_then(|raw| {
            match serde_json::from_str::<AnalysisResult>(raw) {
                Ok(analysis) => Some(analysis),
                Err(err) => {
                    warn!("Photo {} has an unreadable analysis: {err}", record.id);
                    None
                }
            }
        });

        Self {
            created_at: parse_loose_datetime(&record.created_at).unwrap_or_else(|| {
                warn!("Photo {} has invalid created_at; using now", record.id);
                Utc::now()
            }),
            id: record.id,
            inspection_id: record.inspection_id,
            photo_url: record.photo_url,
            room: record.room,
            analysis,
            image_hash: record.image_hash,
        }
    }

    pub fn to_record(&self) -> anyhow::Result<PhotoRecord> {
        let ai_analysis_result = self
            .analysis
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        Ok(PhotoRecord {
            id: self.id.clone(),
            inspection_id: self.inspection_id.clone(),
            photo_url: self.photo_url.clone(),
            room: self.room.clone(),
            ai_analysis_result,
            image_hash: self.image_hash.clone(),
            created_at: self.created_at.to_rfc3339(),
        })
    }

    pub fn room_key(&self) -> String {
        normalize_name(&self.room)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub property_id: String,
    pub inspection_date: DateTime<Utc>,
    pub status: InspectionStatus,
    pub inspection_type: InspectionType,
    pub general_observations: Option<String>,
    pub photos: Vec<Photo>,
}

impl Inspection {
    /// Build an inspection from storage records, defaulting malformed fields
    /// so a report can still be rendered.
    pub fn from_record(record: InspectionRecord, photo_records: Vec<PhotoRecord>) -> Self {
        let inspection_date = record
            .inspection_date
            .as_deref()
            .and_then(parse_loose_datetime)
            .unwrap_or_else(|| {
                warn!("Inspection {} has no valid date; using now", record.id);
                Utc::now()
            });

        let status = record
            .status
            .as_deref()
            .and_then(InspectionStatus::parse)
            .unwrap_or_else(|| {
                warn!("Inspection {} has unknown status; using pending", record.id);
                InspectionStatus::Pending
            });

        let inspection_type = record
            .inspection_type
            .as_deref()
            .and_then(InspectionType::parse)
            .unwrap_or_else(|| {
                warn!("Inspection {} has unknown type; using entry", record.id);
                InspectionType::Entry
            });

        let mut photos: Vec<Photo> = photo_records.into_iter().map(Photo::from_record).collect();
        // Stable sort keeps storage order for photos created at the same instant.
        photos.sort_by_key(|photo| photo.created_at);

        Self {
            id: record.id,
            property_id: record.property_id,
            inspection_date,
            status,
            inspection_type,
            general_observations: record.general_observations,
            photos,
        }
    }

    /// Storage record for the inspection fields; photos are stored separately.
    pub fn to_record(&self) -> InspectionRecord {
        InspectionRecord {
            id: self.id.clone(),
            property_id: self.property_id.clone(),
            inspection_date: Some(self.inspection_date.to_rfc3339()),
            status: Some(self.status.as_str().to_string()),
            inspection_type: Some(self.inspection_type.as_str().to_string()),
            general_observations: self.general_observations.clone(),
        }
    }

    /// Distinct room labels in first-appearance order. Labels that differ only
    /// by case or padding collapse onto the first one seen.
    pub fn rooms(&self) -> Vec<String> {
        let mut seen = Vec::new();
        let mut rooms = Vec::new();
        for photo in &self.photos {
            let key = photo.room_key();
            if !seen.contains(&key) {
                seen.push(key);
                rooms.push(photo.room.trim().to_string());
            }
        }
        rooms
    }

    pub fn photos_in_room(&self, room: &str) -> Vec<&Photo> {
        let key = normalize_name(room);
        self.photos
            .iter()
            .filter(|photo| photo.room_key() == key)
            .collect()
    }
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates.
pub fn parse_loose_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
