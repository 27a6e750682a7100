//! Pagination of a rendered report into print pages without splitting any
//! protected region.

pub mod config;
pub mod layout;
pub mod paginator;
pub mod raster;

use image::RgbaImage;

pub use config::PaginationConfig;
pub use layout::{measure_document, DocumentGeometry, EstimatingMeasurer, LayoutElement, LayoutMeasurer};
pub use paginator::{plan_pages, PageSpan, PaginationPlan, ProtectedRegion, RegionKind};
pub use raster::{encode_png, slice_pages};

#[derive(Debug, Clone)]
pub struct PaginatedDocument {
    pub plan: PaginationPlan,
    pub pages: Vec<RgbaImage>,
}

/// Plan pages for a rendered canvas and cut it into page bitmaps. The page
/// height is scaled to the canvas width first, so a canvas rendered at a
/// higher resolution still fills each page.
pub fn paginate(
    canvas: &RgbaImage,
    regions: &[ProtectedRegion],
    config: &PaginationConfig,
) -> PaginatedDocument {
    let config = config.fit_to_canvas_width(canvas.width());
    let plan = plan_pages(canvas.height(), regions, &config);
    let pages = slice_pages(canvas, &plan, &config);
    PaginatedDocument { plan, pages }
}
