use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::analysis::provider::{assign_ids, image_seed, AnalysisProvider, AnalysisRequest, UploadStore};
use crate::errors::InspectionError;
use crate::guard::{check_duplicate_with_hashes, compute_phash, derive_exit_analysis, DuplicateVerdict, GuardConfig};
use crate::markers::assign_markers;
use crate::models::{AnalysisResult, Photo};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// A freshly uploaded photo waiting for analysis.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub inspection_id: String,
    pub room: String,
    pub photo_url: String,
    /// Raw image bytes, when the caller has them; enables the perceptual hash.
    pub image_bytes: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct IntakeOptions {
    pub guard: GuardConfig,
    pub timeout: Duration,
}

impl Default for IntakeOptions {
    fn default() -> Self {
        Self {
            guard: GuardConfig::default(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Turns uploads into analyzed photos, either by deriving the entry analysis
/// (duplicate image) or by asking the provider.
pub struct PhotoIntake<P, U> {
    provider: P,
    uploads: U,
}

impl<P, U> PhotoIntake<P, U>
where
    P: AnalysisProvider,
    U: UploadStore,
{
    pub fn new(provider: P, uploads: U) -> Self {
        Self { provider, uploads }
    }

    /// Analyze `upload`. `entry_photos` are the entry inspection's photos of
    /// the same room; empty for entry uploads.
    ///
    /// On failure the uploaded file is removed and nothing is returned to
    /// persist.
    pub async fn analyze_photo(
        &self,
        upload: PhotoUpload,
        entry_photos: &[&Photo],
        options: &IntakeOptions,
    ) -> Result<Photo, InspectionError> {
        let image_hash = upload.image_bytes.as_deref().and_then(|bytes| match compute_phash(bytes) {
            Ok(hash) => Some(hash),
            Err(e) => {
                log_warn!("could not hash {}: {e:#}", upload.photo_url);
                None
            }
        });

        let (verdict, source) = guard_against_entry(&upload.photo_url, image_hash.as_deref(), entry_photos, &options.guard);

        let mut analysis = match source.and_then(|photo| photo.analysis.as_ref()) {
            Some(entry_analysis) => {
                log_info!(
                    "reusing entry analysis for {} in '{}' ({verdict:?})",
                    upload.photo_url,
                    upload.room
                );
                derive_exit_analysis(entry_analysis)
            }
            None => {
                let request = build_request(&upload, entry_photos, verdict.is_duplicate());
                match self.request_analysis(request, &upload.room, options.timeout).await {
                    Ok(analysis) => analysis,
                    Err(e) => {
                        self.discard_upload(&upload.photo_url).await;
                        return Err(e);
                    }
                }
            }
        };

        assign_markers(&mut analysis.objects);

        Ok(Photo {
            id: Uuid::new_v4().to_string(),
            inspection_id: upload.inspection_id,
            photo_url: upload.photo_url,
            room: upload.room,
            analysis: Some(analysis),
            image_hash,
            created_at: Utc::now(),
        })
    }

    async fn request_analysis(
        &self,
        request: AnalysisRequest,
        room: &str,
        timeout: Duration,
    ) -> Result<AnalysisResult, InspectionError> {
        match tokio::time::timeout(timeout, self.provider.analyze(request)).await {
            Ok(Ok(mut analysis)) => {
                assign_ids(&mut analysis);
                Ok(analysis)
            }
            Ok(Err(source)) => {
                log_error!("analysis failed for room '{room}': {source:#}");
                Err(InspectionError::AnalysisFailed {
                    room: room.to_string(),
                    source,
                })
            }
            Err(_) => {
                log_error!("analysis timed out after {}s for room '{room}'", timeout.as_secs());
                Err(InspectionError::AnalysisTimedOut {
                    room: room.to_string(),
                    timeout_secs: timeout.as_secs(),
                })
            }
        }
    }

    /// Best-effort removal of an uploaded file that will not be persisted.
    pub async fn discard_upload(&self, photo_url: &str) {
        if let Err(e) = self.uploads.delete(photo_url).await {
            log_error!("failed to delete upload {photo_url}: {e:#}");
        }
    }
}

/// First entry photo the upload duplicates, with the verdict that matched.
fn guard_against_entry<'a>(
    photo_url: &str,
    image_hash: Option<&str>,
    entry_photos: &[&'a Photo],
    config: &GuardConfig,
) -> (DuplicateVerdict, Option<&'a Photo>) {
    entry_photos
        .iter()
        .map(|entry| {
            let verdict = check_duplicate_with_hashes(
                &entry.photo_url,
                photo_url,
                entry.image_hash.as_deref(),
                image_hash,
                config,
            );
            (verdict, *entry)
        })
        .find(|(verdict, _)| verdict.is_duplicate())
        .map(|(verdict, entry)| (verdict, Some(entry)))
        .unwrap_or((DuplicateVerdict::Distinct, None))
}

fn build_request(upload: &PhotoUpload, entry_photos: &[&Photo], is_duplicate_image: bool) -> AnalysisRequest {
    let consistency_mode = !entry_photos.is_empty();
    let entry_objects = consistency_mode.then(|| {
        entry_photos
            .iter()
            .filter_map(|photo| photo.analysis.as_ref())
            .flat_map(|analysis| analysis.objects.iter().cloned())
            .collect()
    });

    AnalysisRequest {
        image_url: upload.photo_url.clone(),
        room_name: upload.room.clone(),
        entry_objects,
        image_seed: image_seed(&upload.photo_url),
        is_duplicate_image,
        consistency_mode,
    }
}
