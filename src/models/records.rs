//! Raw record shapes exchanged with the storage collaborator.
//!
//! Fields that the backend may leave empty or malformed are kept as loose
//! strings here; `Inspection::from_record` and `Photo::from_record` turn them
//! into the validated domain types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectionRecord {
    pub id: String,
    pub property_id: String,
    pub inspection_date: Option<String>,
    pub status: Option<String>,
    pub inspection_type: Option<String>,
    pub general_observations: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoRecord {
    pub id: String,
    pub inspection_id: String,
    pub photo_url: String,
    pub room: String,
    /// JSON document matching `AnalysisResult`.
    pub ai_analysis_result: Option<String>,
    pub image_hash: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyRecord {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
}
