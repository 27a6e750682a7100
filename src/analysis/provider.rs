use std::future::Future;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::guard::duplicate::file_name;
use crate::models::{AnalysisResult, DetectedObject};

/// Request sent to the AI analysis collaborator for one photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub image_url: String,
    pub room_name: String,
    /// Objects seen in the same room at entry; present for exit photos so the
    /// collaborator can compare conservatively.
    pub entry_objects: Option<Vec<DetectedObject>>,
    pub image_seed: u64,
    pub is_duplicate_image: bool,
    pub consistency_mode: bool,
}

/// The AI analysis collaborator.
pub trait AnalysisProvider: Send + Sync {
    fn analyze(&self, request: AnalysisRequest) -> impl Future<Output = Result<AnalysisResult>> + Send;
}

/// Storage holding uploaded image files.
pub trait UploadStore: Send + Sync {
    fn delete(&self, photo_url: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Stable seed for an image, from its file name (FNV-1a, 64 bit).
pub fn image_seed(image_url: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;

    file_name(image_url)
        .bytes()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

/// Give every object, issue and finish of a received payload a fresh id and
/// clamp confidences into `[0, 1]`.
pub fn assign_ids(analysis: &mut AnalysisResult) {
    analysis.confidence = analysis.confidence.clamp(0.0, 1.0);
    for object in &mut analysis.objects {
        object.id = Uuid::new_v4().to_string();
        object.confidence = object.confidence.clamp(0.0, 1.0);
    }
    for issue in &mut analysis.issues {
        issue.id = Uuid::new_v4().to_string();
    }
    for finish in &mut analysis.finishes {
        finish.id = Uuid::new_v4().to_string();
    }
}
