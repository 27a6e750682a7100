//! Layout measurement: turns a document tree into vertical geometry without
//! rasterizing it, so pages can be planned for any rendering target.

use serde::{Deserialize, Serialize};

use crate::pagination::paginator::{ProtectedRegion, RegionKind};
use crate::report::{
    BucketContent, Header, PhotoAnalysisBlock, ReportDocument, SummaryBlock,
};

/// An element of the document whose height a measurer can report.
#[derive(Debug, Clone, Copy)]
pub enum LayoutElement<'a> {
    Header(&'a Header),
    Summary(&'a SummaryBlock),
    Observations(&'a str),
    RoomHeading(&'a str),
    Block(&'a PhotoAnalysisBlock),
}

pub trait LayoutMeasurer {
    /// Height in pixels of `element` laid out `width` pixels wide.
    fn measure(&self, element: LayoutElement<'_>, width: u32) -> u32;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentGeometry {
    pub width: u32,
    pub total_height: u32,
    pub regions: Vec<ProtectedRegion>,
}

/// Stack the document top to bottom and record its protected regions: one
/// `RoomContainer` per room, one `RoomSection` for each heading plus its first
/// block, one `PhotoBlock` per block.
pub fn measure_document(
    document: &ReportDocument,
    measurer: &dyn LayoutMeasurer,
    width: u32,
) -> DocumentGeometry {
    let mut y = 0u32;
    let mut regions = Vec::new();

    y += measurer.measure(LayoutElement::Header(&document.header), width);
    y += measurer.measure(LayoutElement::Summary(&document.summary), width);
    if let Some(observations) = document.observations.as_deref() {
        y += measurer.measure(LayoutElement::Observations(observations), width);
    }

    for section in &document.rooms {
        let room_top = y;
        y += measurer.measure(LayoutElement::RoomHeading(&section.room), width);

        for (index, block) in section.blocks.iter().enumerate() {
            let block_top = y;
            y += measurer.measure(LayoutElement::Block(block), width);
            if index == 0 {
                regions.push(ProtectedRegion::new(room_top, y, RegionKind::RoomSection));
            }
            regions.push(ProtectedRegion::new(block_top, y, RegionKind::PhotoBlock));
        }

        regions.push(ProtectedRegion::new(room_top, y, RegionKind::RoomContainer));
    }

    DocumentGeometry {
        width,
        total_height: y,
        regions,
    }
}

/// Deterministic height estimates from content counts, for planning pages
/// before (or without) an actual render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimatingMeasurer {
    pub line_height: u32,
    pub char_width: u32,
    pub block_padding: u32,
    /// Photo height as a fraction of the width it is drawn at.
    pub photo_aspect: f64,
    pub thumbnail_height: u32,
}

impl Default for EstimatingMeasurer {
    fn default() -> Self {
        Self {
            line_height: 20,
            char_width: 8,
            block_padding: 24,
            photo_aspect: 0.75,
            thumbnail_height: 96,
        }
    }
}

impl EstimatingMeasurer {
    fn text_lines(&self, text: &str, width: u32) -> u32 {
        if text.trim().is_empty() {
            return 0;
        }
        let per_line = (width / self.char_width.max(1)).max(1) as usize;
        text.lines()
            .map(|line| line.chars().count().div_ceil(per_line).max(1) as u32)
            .sum()
    }

    fn photo_height(&self, width: u32) -> u32 {
        (f64::from(width) * self.photo_aspect).round() as u32
    }

    fn list_height(&self, entries: usize) -> u32 {
        if entries == 0 {
            0
        } else {
            // heading line plus one line per entry
            self.line_height * (entries as u32 + 1)
        }
    }

    fn block_height(&self, block: &PhotoAnalysisBlock, width: u32) -> u32 {
        let body = match block {
            PhotoAnalysisBlock::Analysis(block) => {
                let photo = self.photo_height(width);
                let details = match &block.analysis {
                    Some(analysis) => {
                        self.line_height * (self.text_lines(&analysis.description, width) + 1)
                            + self.list_height(analysis.objects.len())
                            + self.list_height(analysis.issues.len())
                            + self.list_height(analysis.finishes.len())
                            + self.list_height(analysis.safety.hazards.len())
                            + self.list_height(analysis.maintenance.len())
                    }
                    None => self.line_height,
                };
                photo + details
            }
            PhotoAnalysisBlock::PhotoPair(_) => self.photo_height(width / 2),
            PhotoAnalysisBlock::Bucket(bucket) => {
                let rows = match &bucket.content {
                    BucketContent::Items(items) => {
                        items.len() as u32 * self.thumbnail_height.max(self.line_height * 2)
                    }
                    BucketContent::Count(_) => 0,
                };
                self.line_height + rows
            }
        };
        body + self.block_padding
    }
}

impl LayoutMeasurer for EstimatingMeasurer {
    fn measure(&self, element: LayoutElement<'_>, width: u32) -> u32 {
        match element {
            LayoutElement::Header(header) => {
                let fixed_lines = 5;
                self.line_height * (fixed_lines + self.text_lines(&header.legal_boilerplate, width))
                    + self.block_padding
            }
            LayoutElement::Summary(summary) => {
                let lines = match summary {
                    SummaryBlock::Single { .. } => 4,
                    SummaryBlock::Comparison { .. } => 7,
                };
                self.line_height * lines + self.block_padding
            }
            LayoutElement::Observations(text) => {
                self.line_height * (self.text_lines(text, width) + 1) + self.block_padding
            }
            LayoutElement::RoomHeading(_) => self.line_height * 2,
            LayoutElement::Block(block) => self.block_height(block, width),
        }
    }
}
