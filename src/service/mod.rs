//! Inspection workflow on top of storage, settings and photo intake.
//!
//! Every operation loads a fresh snapshot of the records it needs, so a
//! report reflects storage at the moment it was requested.

pub mod commands;

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use image::RgbaImage;
use uuid::Uuid;

use crate::analysis::{AnalysisProvider, PhotoIntake, PhotoUpload, UploadStore};
use crate::db::Database;
use crate::errors::InspectionError;
use crate::markers::assign_markers;
use crate::models::{DetectedObject, Inspection, InspectionStatus, InspectionType, Photo, PropertyRecord};
use crate::pagination::{
    measure_document, paginate, plan_pages, LayoutMeasurer, PaginatedDocument, PaginationPlan,
    ProtectedRegion,
};
use crate::report::{
    assemble_comparison, assemble_single, ComparisonVisibility, PropertyInfo, ReportContext,
    ReportDocument,
};
use crate::settings::SettingsStore;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

pub struct InspectionService<P, U> {
    db: Database,
    settings: SettingsStore,
    intake: PhotoIntake<P, U>,
}

impl<P, U> InspectionService<P, U>
where
    P: AnalysisProvider,
    U: UploadStore,
{
    pub fn new(db: Database, settings: SettingsStore, intake: PhotoIntake<P, U>) -> Self {
        Self {
            db,
            settings,
            intake,
        }
    }

    /// Open the database and settings file under `data_dir`.
    pub fn open(data_dir: &Path, provider: P, uploads: U) -> anyhow::Result<Self> {
        let db = Database::new(data_dir.join("vistoria.db"))
            .context("failed to initialize database")?;
        let settings = SettingsStore::new(data_dir.join("settings.json"))
            .context("failed to initialize settings store")?;
        log_info!("inspection service ready at {}", data_dir.display());
        Ok(Self::new(db, settings, PhotoIntake::new(provider, uploads)))
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Register the property if needed and open a pending inspection on it.
    pub async fn create_inspection(
        &self,
        property: PropertyRecord,
        inspection_type: InspectionType,
        inspection_date: Option<DateTime<Utc>>,
    ) -> Result<Inspection, InspectionError> {
        self.db.upsert_property(&property).await?;

        let inspection = Inspection {
            id: Uuid::new_v4().to_string(),
            property_id: property.id,
            inspection_date: inspection_date.unwrap_or_else(Utc::now),
            status: InspectionStatus::Pending,
            inspection_type,
            general_observations: None,
            photos: Vec::new(),
        };
        self.db.insert_inspection(&inspection.to_record()).await?;

        log_info!(
            "created {} inspection {} for property {}",
            inspection.inspection_type.as_str(),
            inspection.id,
            inspection.property_id
        );
        Ok(inspection)
    }

    /// Inspection with its photos, in creation order.
    pub async fn load_inspection(&self, inspection_id: &str) -> Result<Inspection, InspectionError> {
        let record = self
            .db
            .get_inspection(inspection_id)
            .await?
            .ok_or_else(|| InspectionError::InspectionNotFound(inspection_id.to_string()))?;
        let photos = self.db.get_photos_for_inspection(inspection_id).await?;
        Ok(Inspection::from_record(record, photos))
    }

    /// Analyze and store an uploaded photo. Exit photos are checked against
    /// the entry inspection's photos of the same room.
    ///
    /// Nothing is stored when analysis fails, and the upload is removed.
    pub async fn add_photo(&self, upload: PhotoUpload) -> Result<Photo, InspectionError> {
        let inspection = self.load_inspection(&upload.inspection_id).await?;

        let entry = match inspection.inspection_type {
            InspectionType::Exit => {
                self.latest_of_type(&inspection.property_id, InspectionType::Entry)
                    .await?
            }
            InspectionType::Entry => None,
        };
        let entry_photos = entry
            .as_ref()
            .map(|entry| entry.photos_in_room(&upload.room))
            .unwrap_or_default();

        let options = self.settings.get().intake_options();
        let photo = self
            .intake
            .analyze_photo(upload, &entry_photos, &options)
            .await?;

        let stored = match photo.to_record() {
            Ok(record) => self.db.insert_photo(&record).await,
            Err(err) => Err(err),
        };
        if let Err(err) = stored {
            self.intake.discard_upload(&photo.photo_url).await;
            return Err(err.into());
        }

        self.advance_status(&inspection, InspectionStatus::InProgress)
            .await?;
        Ok(photo)
    }

    /// Remove a photo and its uploaded file.
    pub async fn delete_photo(&self, photo_id: &str) -> Result<(), InspectionError> {
        let removed = self
            .db
            .delete_photo(photo_id)
            .await?
            .ok_or_else(|| InspectionError::PhotoNotFound(photo_id.to_string()))?;
        self.intake.discard_upload(&removed.photo_url).await;
        Ok(())
    }

    /// Store the free-text observations; blank text clears them.
    pub async fn save_observations(
        &self,
        inspection_id: &str,
        observations: &str,
    ) -> Result<(), InspectionError> {
        let trimmed = observations.trim();
        let value = (!trimmed.is_empty()).then(|| trimmed.to_string());
        if !self.db.update_observations(inspection_id, value).await? {
            return Err(InspectionError::InspectionNotFound(inspection_id.to_string()));
        }
        Ok(())
    }

    /// Apply a manual edit to one object of a photo's analysis. An object
    /// whose id is not in the analysis is added to it.
    pub async fn update_object(
        &self,
        photo_id: &str,
        object: DetectedObject,
    ) -> Result<Photo, InspectionError> {
        let record = self
            .db
            .get_photo(photo_id)
            .await?
            .ok_or_else(|| InspectionError::PhotoNotFound(photo_id.to_string()))?;
        let mut photo = Photo::from_record(record);

        let mut edited = object;
        edited.is_manual = true;
        if edited.id.is_empty() {
            edited.id = Uuid::new_v4().to_string();
        }

        let analysis = photo.analysis.get_or_insert_with(Default::default);
        match analysis.objects.iter_mut().find(|o| o.id == edited.id) {
            Some(existing) => *existing = edited,
            None => analysis.objects.push(edited),
        }
        assign_markers(&mut analysis.objects);

        let json = serde_json::to_string(&*analysis).context("failed to serialize analysis")?;
        if !self.db.update_photo_analysis(photo_id, Some(json)).await? {
            return Err(InspectionError::PhotoNotFound(photo_id.to_string()));
        }
        Ok(photo)
    }

    /// Report for one inspection. Marks it completed; generating again
    /// yields the same content.
    pub async fn generate_report(&self, inspection_id: &str) -> Result<ReportDocument, InspectionError> {
        let mut inspection = self.load_inspection(inspection_id).await?;
        inspection.status = self
            .advance_status(&inspection, InspectionStatus::Completed)
            .await?;

        let context = self.report_context(&inspection.property_id).await?;
        Ok(assemble_single(&inspection, &context))
    }

    /// Comparison of the latest entry and latest exit inspection of a
    /// property. Both are marked completed.
    pub async fn generate_comparison(
        &self,
        property_id: &str,
        visibility: Option<ComparisonVisibility>,
    ) -> Result<ReportDocument, InspectionError> {
        let entry = self.latest_of_type(property_id, InspectionType::Entry).await?;
        let exit = self.latest_of_type(property_id, InspectionType::Exit).await?;
        let (Some(mut entry), Some(mut exit)) = (entry, exit) else {
            return Err(InspectionError::ComparisonUnavailable(property_id.to_string()));
        };

        let visibility = visibility.unwrap_or_else(|| {
            ComparisonVisibility::new(self.settings.get().default_visibility)
        });
        let context = self.report_context(property_id).await?;
        let document = assemble_comparison(&entry, &exit, &visibility, &context)?;

        entry.status = self
            .advance_status(&entry, InspectionStatus::Completed)
            .await?;
        exit.status = self
            .advance_status(&exit, InspectionStatus::Completed)
            .await?;
        Ok(document)
    }

    /// Estimate the layout of `document` and plan its pages, before any
    /// rendering happens.
    pub fn plan_document(
        &self,
        document: &ReportDocument,
        measurer: &dyn LayoutMeasurer,
    ) -> PaginationPlan {
        let config = self.settings.pagination();
        let geometry = measure_document(document, measurer, config.content_width());
        plan_pages(geometry.total_height, &geometry.regions, &config)
    }

    /// Cut an already rendered report into pages with the configured geometry.
    pub fn paginate_rendered(
        &self,
        canvas: &RgbaImage,
        regions: &[ProtectedRegion],
    ) -> PaginatedDocument {
        let config = self.settings.pagination();
        let document = paginate(canvas, regions, &config);
        if !document.plan.converged {
            log_warn!(
                "rendered report paginated partially: {} of {}px",
                document.plan.covered_height(),
                canvas.height()
            );
        }
        document
    }

    /// Most recent inspection of `kind` for the property, with its photos.
    async fn latest_of_type(
        &self,
        property_id: &str,
        kind: InspectionType,
    ) -> Result<Option<Inspection>, InspectionError> {
        let records = self.db.get_inspections_for_property(property_id).await?;
        let latest = records
            .into_iter()
            .map(|record| Inspection::from_record(record, Vec::new()))
            .filter(|inspection| inspection.inspection_type == kind)
            .max_by_key(|inspection| inspection.inspection_date);

        match latest {
            Some(inspection) => self.load_inspection(&inspection.id).await.map(Some),
            None => Ok(None),
        }
    }

    async fn advance_status(
        &self,
        inspection: &Inspection,
        next: InspectionStatus,
    ) -> Result<InspectionStatus, InspectionError> {
        let status = inspection.status.advance(next);
        if status != inspection.status {
            self.db.update_inspection_status(&inspection.id, status).await?;
            log_info!("inspection {} is now {}", inspection.id, status.as_str());
        }
        Ok(status)
    }

    async fn report_context(&self, property_id: &str) -> Result<ReportContext, InspectionError> {
        let property = match self.db.get_property(property_id).await? {
            Some(record) => PropertyInfo {
                id: record.id,
                name: record.name,
                address: record.address,
            },
            None => {
                log_warn!("property {property_id} has no record; header will be blank");
                PropertyInfo {
                    id: property_id.to_string(),
                    ..Default::default()
                }
            }
        };

        let settings = self.settings.get();
        Ok(ReportContext {
            property,
            inspector: settings.inspector,
            branding: settings.branding,
            legal_boilerplate: settings.legal_boilerplate,
            generated_at: Utc::now(),
        })
    }
}
