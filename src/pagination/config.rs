use serde::{Deserialize, Serialize};

/// Page geometry and loop bounds for pagination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationConfig {
    /// Content height of one page, in pixels of a canvas rendered at the
    /// content width.
    pub max_page_height: u32,
    /// Output page size in pixels.
    pub page_width: u32,
    pub page_height: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub margin_x: u32,
    /// Upper bound on planning iterations before giving up.
    pub max_iterations: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        // A4 at 96 dpi
        Self {
            max_page_height: 1043,
            page_width: 794,
            page_height: 1123,
            margin_top: 40,
            margin_bottom: 40,
            margin_x: 40,
            max_iterations: 10_000,
        }
    }
}

impl PaginationConfig {
    pub fn content_width(&self) -> u32 {
        self.page_width
            .saturating_sub(self.margin_x.saturating_mul(2))
            .max(1)
    }

    pub fn content_height(&self) -> u32 {
        self.page_height
            .saturating_sub(self.margin_top.saturating_add(self.margin_bottom))
            .max(1)
    }

    /// Same config with `max_page_height` expressed in the pixels of a canvas
    /// `canvas_width` wide, so a full page of canvas fills the same share of
    /// the content box at any render scale.
    pub fn fit_to_canvas_width(&self, canvas_width: u32) -> Self {
        if canvas_width == 0 {
            return self.clone();
        }
        let scaled = u64::from(self.max_page_height) * u64::from(canvas_width)
            / u64::from(self.content_width());
        Self {
            max_page_height: u32::try_from(scaled).unwrap_or(u32::MAX).max(1),
            ..self.clone()
        }
    }
}
