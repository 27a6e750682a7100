use std::io::Cursor;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::pagination::config::PaginationConfig;
use crate::pagination::paginator::PaginationPlan;

const PAGE_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Cut the rendered canvas along the plan and place each slice on a page.
pub fn slice_pages(canvas: &RgbaImage, plan: &PaginationPlan, config: &PaginationConfig) -> Vec<RgbaImage> {
    let (width, height) = canvas.dimensions();
    let last_index = plan.pages.len().saturating_sub(1);

    plan.pages
        .iter()
        .enumerate()
        .filter_map(|(index, span)| {
            let start = span.start.min(height);
            let end = span.end.min(height);
            if end <= start || width == 0 {
                return None;
            }
            let slice = imageops::crop_imm(canvas, 0, start, width, end - start).to_image();
            Some(place_on_page(&slice, config, index == last_index))
        })
        .collect()
}

/// Centre `slice` horizontally under the top margin, scaling it down when it
/// does not fit the content box. Only the last page is shorter than a full page.
fn place_on_page(slice: &RgbaImage, config: &PaginationConfig, is_last: bool) -> RgbaImage {
    let content_width = config.content_width();
    let content_height = config.content_height();
    let (slice_width, slice_height) = slice.dimensions();

    let scale = (f64::from(content_width) / f64::from(slice_width))
        .min(f64::from(content_height) / f64::from(slice_height))
        .min(1.0);

    let placed = if scale < 1.0 {
        let w = ((f64::from(slice_width) * scale).round() as u32).max(1);
        let h = ((f64::from(slice_height) * scale).round() as u32).max(1);
        imageops::resize(slice, w, h, FilterType::Triangle)
    } else {
        slice.clone()
    };

    let page_height = if is_last {
        config
            .margin_top
            .saturating_add(placed.height())
            .saturating_add(config.margin_bottom)
            .min(config.page_height)
    } else {
        config.page_height
    };

    let mut page = RgbaImage::from_pixel(config.page_width, page_height, PAGE_BACKGROUND);
    let x = config
        .margin_x
        .saturating_add(content_width.saturating_sub(placed.width()) / 2);
    imageops::overlay(&mut page, &placed, i64::from(x), i64::from(config.margin_top));
    page
}

pub fn encode_png(page: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(page.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("failed to encode page as PNG")?;
    Ok(buf)
}
