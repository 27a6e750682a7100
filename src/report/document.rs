//! Logical document tree handed to the renderer.
//!
//! `Header → SummaryBlock → RoomSection[] → PhotoAnalysisBlock[]`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comparison::{Bucket, ComparedObject};
use crate::models::AnalysisResult;
use crate::report::config::{CompanyBranding, InspectorInfo, PropertyInfo};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    Single,
    Comparison,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub title: String,
    pub property: PropertyInfo,
    pub inspector: InspectorInfo,
    pub branding: CompanyBranding,
    pub date: DateTime<Utc>,
    /// When the document was assembled; `date` is the inspection date.
    pub generated_at: DateTime<Utc>,
    pub legal_boilerplate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum SummaryBlock {
    #[serde(rename_all = "camelCase")]
    Single {
        total_rooms: usize,
        total_photos: usize,
        total_issues: usize,
    },
    #[serde(rename_all = "camelCase")]
    Comparison {
        total_rooms: usize,
        total_photos: usize,
        changed: usize,
        unchanged: usize,
        new: usize,
        missing: usize,
    },
}

impl SummaryBlock {
    /// Totals of a single-inspection report, folded from its sections.
    pub fn for_single(sections: &[RoomSection]) -> Self {
        let analysis_blocks = || {
            sections
                .iter()
                .flat_map(|section| section.blocks.iter())
                .filter_map(|block| match block {
                    PhotoAnalysisBlock::Analysis(analysis) => Some(analysis),
                    _ => None,
                })
        };

        SummaryBlock::Single {
            total_rooms: sections.len(),
            total_photos: analysis_blocks().count(),
            total_issues: analysis_blocks()
                .filter_map(|block| block.analysis.as_ref())
                .map(|analysis| analysis.issues.len())
                .sum(),
        }
    }

    /// Totals of a comparison report, folded from its sections so they always
    /// agree with what each room shows.
    pub fn for_comparison(sections: &[RoomSection]) -> Self {
        let mut total_photos = 0;
        let mut counts = [0usize; 4];

        for block in sections.iter().flat_map(|section| section.blocks.iter()) {
            match block {
                PhotoAnalysisBlock::PhotoPair(pair) => {
                    total_photos += pair.entry_photo_urls.len() + pair.exit_photo_urls.len();
                }
                PhotoAnalysisBlock::Bucket(bucket_block) => {
                    let slot = match bucket_block.bucket {
                        Bucket::Changed => 0,
                        Bucket::Unchanged => 1,
                        Bucket::New => 2,
                        Bucket::Missing => 3,
                    };
                    counts[slot] += bucket_block.count();
                }
                PhotoAnalysisBlock::Analysis(_) => {}
            }
        }

        SummaryBlock::Comparison {
            total_rooms: sections.len(),
            total_photos,
            changed: counts[0],
            unchanged: counts[1],
            new: counts[2],
            missing: counts[3],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBlock {
    pub photo_id: String,
    pub photo_url: String,
    /// `None` when the photo has no usable analysis.
    pub analysis: Option<AnalysisResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPairBlock {
    pub entry_photo_urls: Vec<String>,
    pub exit_photo_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum BucketContent {
    Items(Vec<ComparedObject>),
    /// Unchanged objects are reported by count only.
    Count(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BucketBlock {
    pub bucket: Bucket,
    pub label: String,
    pub content: BucketContent,
}

impl BucketBlock {
    pub fn count(&self) -> usize {
        match &self.content {
            BucketContent::Items(items) => items.len(),
            BucketContent::Count(count) => *count,
        }
    }
}

/// Atomic unit of the report; the paginator never splits one across pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PhotoAnalysisBlock {
    Analysis(AnalysisBlock),
    PhotoPair(PhotoPairBlock),
    Bucket(BucketBlock),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSection {
    pub room: String,
    pub blocks: Vec<PhotoAnalysisBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub mode: ReportMode,
    pub header: Header,
    pub summary: SummaryBlock,
    pub observations: Option<String>,
    pub rooms: Vec<RoomSection>,
}
