use uuid::Uuid;

use crate::guard::phash::compute_hamming_distance;
use crate::guard::GuardConfig;
use crate::models::{AnalysisResult, ObjectCondition};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Room words that show up in file names produced by the capture flow.
pub const ROOM_KEYWORDS: &[&str] = &[
    "sala",
    "cozinha",
    "quarto",
    "banheiro",
    "lavanderia",
    "varanda",
    "escritorio",
    "corredor",
    "garagem",
    "closet",
    "suite",
];

/// A derived analysis never claims more certainty than this.
pub const DERIVED_CONFIDENCE_CAP: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateVerdict {
    SameFile,
    SharedRoomKeyword(&'static str),
    SimilarImage { distance: u32 },
    Distinct,
}

impl DuplicateVerdict {
    pub fn is_duplicate(&self) -> bool {
        !matches!(self, DuplicateVerdict::Distinct)
    }
}

/// Last path segment of a URL, without query string or fragment.
pub fn file_name(url: &str) -> &str {
    let end = url.find(|c| c == '?' || c == '#').unwrap_or(url.len());
    let path = &url[..end];
    path.rsplit('/').next().unwrap_or(path)
}

/// Cheap approximate check that the exit photo is the image used at entry.
pub fn check_duplicate(entry_url: &str, exit_url: &str) -> DuplicateVerdict {
    let entry_name = file_name(entry_url);
    let exit_name = file_name(exit_url);

    if !entry_name.is_empty() && entry_name == exit_name {
        return DuplicateVerdict::SameFile;
    }

    let entry_lower = entry_name.to_lowercase();
    let exit_lower = exit_name.to_lowercase();
    ROOM_KEYWORDS
        .iter()
        .find(|keyword| entry_lower.contains(*keyword) && exit_lower.contains(*keyword))
        .map(|keyword| DuplicateVerdict::SharedRoomKeyword(*keyword))
        .unwrap_or(DuplicateVerdict::Distinct)
}

/// `check_duplicate`, extended with a perceptual hash comparison when both
/// hashes are known.
pub fn check_duplicate_with_hashes(
    entry_url: &str,
    exit_url: &str,
    entry_hash: Option<&str>,
    exit_hash: Option<&str>,
    config: &GuardConfig,
) -> DuplicateVerdict {
    let verdict = check_duplicate(entry_url, exit_url);
    if verdict.is_duplicate() {
        log_info!("duplicate guard: {verdict:?} for {exit_url}");
        return verdict;
    }

    if let (Some(entry_hash), Some(exit_hash)) = (entry_hash, exit_hash) {
        let distance = compute_hamming_distance(entry_hash, exit_hash);
        if distance <= config.max_hash_distance {
            log_info!("duplicate guard: similar image (distance {distance}) for {exit_url}");
            return DuplicateVerdict::SimilarImage { distance };
        }
    }

    DuplicateVerdict::Distinct
}

/// Exit analysis for a photo that is the entry image itself.
///
/// Ids are regenerated, `not_found` becomes `good`, manual flags are cleared
/// and confidences are capped at `DERIVED_CONFIDENCE_CAP`.
pub fn derive_exit_analysis(entry: &AnalysisResult) -> AnalysisResult {
    let mut derived = entry.clone();
    derived.confidence = derived.confidence.min(DERIVED_CONFIDENCE_CAP);

    for object in &mut derived.objects {
        object.id = Uuid::new_v4().to_string();
        object.is_manual = false;
        object.confidence = object.confidence.min(DERIVED_CONFIDENCE_CAP);
        if object.condition == ObjectCondition::NotFound {
            object.condition = ObjectCondition::Good;
        }
    }
    for issue in &mut derived.issues {
        issue.id = Uuid::new_v4().to_string();
    }
    for finish in &mut derived.finishes {
        finish.id = Uuid::new_v4().to_string();
        if finish.condition == ObjectCondition::NotFound {
            finish.condition = ObjectCondition::Good;
        }
    }

    derived
}
