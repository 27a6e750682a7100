//! Front-end facing operations. Errors come back as the plain-language text
//! from `InspectionError::user_message`; the technical cause goes to the log.

use chrono::{DateTime, Utc};
use image::RgbaImage;

use crate::analysis::{AnalysisProvider, PhotoUpload, UploadStore};
use crate::errors::InspectionError;
use crate::models::{DetectedObject, Inspection, InspectionType, Photo, PropertyRecord};
use crate::pagination::{encode_png, ProtectedRegion};
use crate::report::{ComparisonVisibility, ReportDocument};
use crate::service::InspectionService;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_error;

fn to_user_error(err: InspectionError) -> String {
    log_error!("{err}");
    err.user_message()
}

pub async fn create_inspection<P: AnalysisProvider, U: UploadStore>(
    service: &InspectionService<P, U>,
    property: PropertyRecord,
    inspection_type: InspectionType,
    inspection_date: Option<DateTime<Utc>>,
) -> Result<Inspection, String> {
    service
        .create_inspection(property, inspection_type, inspection_date)
        .await
        .map_err(to_user_error)
}

pub async fn get_inspection<P: AnalysisProvider, U: UploadStore>(
    service: &InspectionService<P, U>,
    inspection_id: String,
) -> Result<Inspection, String> {
    service
        .load_inspection(&inspection_id)
        .await
        .map_err(to_user_error)
}

pub async fn add_photo<P: AnalysisProvider, U: UploadStore>(
    service: &InspectionService<P, U>,
    upload: PhotoUpload,
) -> Result<Photo, String> {
    service.add_photo(upload).await.map_err(to_user_error)
}

pub async fn delete_photo<P: AnalysisProvider, U: UploadStore>(
    service: &InspectionService<P, U>,
    photo_id: String,
) -> Result<(), String> {
    service.delete_photo(&photo_id).await.map_err(to_user_error)
}

pub async fn save_observations<P: AnalysisProvider, U: UploadStore>(
    service: &InspectionService<P, U>,
    inspection_id: String,
    observations: String,
) -> Result<(), String> {
    service
        .save_observations(&inspection_id, &observations)
        .await
        .map_err(to_user_error)
}

pub async fn update_object<P: AnalysisProvider, U: UploadStore>(
    service: &InspectionService<P, U>,
    photo_id: String,
    object: DetectedObject,
) -> Result<Photo, String> {
    service
        .update_object(&photo_id, object)
        .await
        .map_err(to_user_error)
}

pub async fn generate_report<P: AnalysisProvider, U: UploadStore>(
    service: &InspectionService<P, U>,
    inspection_id: String,
) -> Result<ReportDocument, String> {
    service
        .generate_report(&inspection_id)
        .await
        .map_err(to_user_error)
}

pub async fn generate_comparison<P: AnalysisProvider, U: UploadStore>(
    service: &InspectionService<P, U>,
    property_id: String,
    visibility: Option<ComparisonVisibility>,
) -> Result<ReportDocument, String> {
    service
        .generate_comparison(&property_id, visibility)
        .await
        .map_err(to_user_error)
}

/// Paginate a rendered report and return each page as PNG bytes.
pub fn export_pages<P: AnalysisProvider, U: UploadStore>(
    service: &InspectionService<P, U>,
    canvas: &RgbaImage,
    regions: &[ProtectedRegion],
) -> Result<Vec<Vec<u8>>, String> {
    let document = service.paginate_rendered(canvas, regions);
    document
        .pages
        .iter()
        .map(encode_png)
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| to_user_error(e.into()))
}
