pub mod assembler;
pub mod config;
pub mod document;

pub use assembler::{assemble_comparison, assemble_single};
pub use config::{
    BucketVisibility, CompanyBranding, ComparisonVisibility, InspectorInfo, PropertyInfo,
    ReportContext,
};
pub use document::{
    AnalysisBlock, BucketBlock, BucketContent, Header, PhotoAnalysisBlock, PhotoPairBlock,
    ReportDocument, ReportMode, RoomSection, SummaryBlock,
};
