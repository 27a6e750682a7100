//! Photo intake: the boundary with the AI analysis collaborator and the
//! upload store.

pub mod intake;
pub mod provider;

pub use intake::{IntakeOptions, PhotoIntake, PhotoUpload};
pub use provider::{assign_ids, image_seed, AnalysisProvider, AnalysisRequest, UploadStore};
