use thiserror::Error;

/// Failures that reach the person using the app. `Display` is the technical
/// description for logs; `user_message` is what gets shown.
#[derive(Debug, Error)]
pub enum InspectionError {
    #[error("analysis request failed for room '{room}': {source}")]
    AnalysisFailed {
        room: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("analysis request timed out after {timeout_secs}s for room '{room}'")]
    AnalysisTimedOut { room: String, timeout_secs: u64 },

    #[error("inspection {0} not found")]
    InspectionNotFound(String),

    #[error("photo {0} not found")]
    PhotoNotFound(String),

    #[error("property {0} has no entry/exit inspection pair")]
    ComparisonUnavailable(String),

    #[error("inspections cannot be compared: {0}")]
    InspectionMismatch(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl InspectionError {
    pub fn user_message(&self) -> String {
        match self {
            InspectionError::AnalysisFailed { room, .. } => format!(
                "We couldn't analyze the photo for {room}. Please try again."
            ),
            InspectionError::AnalysisTimedOut { room, .. } => format!(
                "Analyzing the photo for {room} took too long. Check your connection and try again."
            ),
            InspectionError::InspectionNotFound(_) => {
                "This inspection could not be found. Refresh the page and try again.".to_string()
            }
            InspectionError::PhotoNotFound(_) => {
                "This photo could not be found. It may have already been removed.".to_string()
            }
            InspectionError::ComparisonUnavailable(_) => {
                "Both an entry and an exit inspection are needed to build a comparison. Finish the missing inspection and try again.".to_string()
            }
            InspectionError::InspectionMismatch(_) => {
                "These inspections can't be compared. Pick an entry and an exit inspection of the same property.".to_string()
            }
            InspectionError::Storage(_) => {
                "Something went wrong while saving or loading your data. Please try again.".to_string()
            }
        }
    }
}
