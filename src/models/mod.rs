pub mod analysis;
pub mod inspection;
pub mod records;

pub use analysis::{
    normalize_name, AnalysisResult, DetectedIssue, DetectedObject, Finish, IssueSeverity,
    MarkerCoordinates, ObjectCondition, RoomCondition, SafetyAssessment,
};
pub use inspection::{Inspection, InspectionStatus, InspectionType, Photo};
pub use records::{InspectionRecord, PhotoRecord, PropertyRecord};
