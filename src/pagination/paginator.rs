use serde::{Deserialize, Serialize};

use crate::pagination::config::PaginationConfig;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_warn;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RegionKind {
    /// A whole room, heading and every block.
    RoomContainer,
    /// Room heading together with its first block.
    RoomSection,
    /// One photo with its analysis.
    PhotoBlock,
}

impl RegionKind {
    /// Atomic regions are emitted whole even when taller than a page;
    /// oversized containers are split between their children instead.
    pub fn is_atomic(&self) -> bool {
        matches!(self, RegionKind::PhotoBlock)
    }
}

/// Vertical span `[top, bottom)` of rendered content that must not be split.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedRegion {
    pub top: u32,
    pub bottom: u32,
    pub kind: RegionKind,
}

impl ProtectedRegion {
    pub fn new(top: u32, bottom: u32, kind: RegionKind) -> Self {
        Self { top, bottom, kind }
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// True when a break at `y` would cut this region.
    pub fn is_cut_at(&self, y: u32) -> bool {
        self.top < y && y < self.bottom
    }
}

/// One page worth of canvas rows, `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageSpan {
    pub start: u32,
    pub end: u32,
}

impl PageSpan {
    pub fn height(&self) -> u32 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationPlan {
    pub pages: Vec<PageSpan>,
    /// False when planning stopped early; `pages` then only covers a prefix.
    pub converged: bool,
}

impl PaginationPlan {
    pub fn covered_height(&self) -> u32 {
        self.pages.iter().map(PageSpan::height).sum()
    }
}

/// Break a canvas of `total_height` rows into pages no taller than
/// `config.max_page_height`, moving each break up to the top of any protected
/// region it would cut.
///
/// Greedy and single-pass: a page only ever ends earlier than the height
/// budget, except for an atomic region taller than a page, which gets a page
/// of its own.
pub fn plan_pages(
    total_height: u32,
    regions: &[ProtectedRegion],
    config: &PaginationConfig,
) -> PaginationPlan {
    let max_page_height = config.max_page_height;
    let mut pages = Vec::new();
    let mut current = 0u32;
    let mut iterations = 0usize;

    while current < total_height {
        if iterations >= config.max_iterations {
            log_warn!(
                "pagination stopped after {iterations} iterations at y={current} of {total_height}"
            );
            return PaginationPlan {
                pages,
                converged: false,
            };
        }
        iterations += 1;

        let naive_end = current.saturating_add(max_page_height).min(total_height);

        let oversized_bottom = regions
            .iter()
            .filter(|r| r.kind.is_atomic() && r.top == current)
            .filter(|r| r.height() > max_page_height && r.bottom > naive_end)
            .map(|r| r.bottom)
            .max();

        let page_end = match oversized_bottom {
            Some(bottom) => {
                log_warn!(
                    "block at y={current} is {}px, taller than a page ({max_page_height}px); placing it on its own page",
                    bottom - current
                );
                bottom.min(total_height)
            }
            None => break_before_protected(current, naive_end, regions),
        };

        if page_end <= current {
            log_warn!(
                "pagination made no progress at y={current} (max page height {max_page_height}); returning {} pages",
                pages.len()
            );
            return PaginationPlan {
                pages,
                converged: false,
            };
        }

        pages.push(PageSpan {
            start: current,
            end: page_end,
        });
        current = page_end;
    }

    PaginationPlan {
        pages,
        converged: true,
    }
}

/// Pull `page_end` up to the top of every region that starts on this page but
/// would be cut, until no such region is left.
fn break_before_protected(current: u32, naive_end: u32, regions: &[ProtectedRegion]) -> u32 {
    let mut page_end = naive_end;
    loop {
        let earliest = regions
            .iter()
            .filter(|r| r.top > current && r.is_cut_at(page_end))
            .map(|r| r.top)
            .min();

        match earliest {
            Some(top) => page_end = top,
            None => return page_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(max_page_height: u32) -> PaginationConfig {
        PaginationConfig {
            max_page_height,
            ..Default::default()
        }
    }

    fn spans(plan: &PaginationPlan) -> Vec<(u32, u32)> {
        plan.pages.iter().map(|p| (p.start, p.end)).collect()
    }

    #[test]
    fn test_break_moves_before_endangered_region() {
        let regions = [ProtectedRegion::new(350, 450, RegionKind::PhotoBlock)];

        let plan = plan_pages(1000, &regions, &config(400));

        assert!(plan.converged);
        assert_eq!(spans(&plan), vec![(0, 350), (350, 750), (750, 1000)]);
        assert_eq!(plan.covered_height(), 1000);
    }

    #[test]
    fn test_no_regions_gives_even_pages() {
        let plan = plan_pages(1000, &[], &config(400));
        assert_eq!(spans(&plan), vec![(0, 400), (400, 800), (800, 1000)]);
    }

    #[test]
    fn test_empty_canvas_has_no_pages() {
        let plan = plan_pages(0, &[], &config(400));
        assert!(plan.converged);
        assert!(plan.pages.is_empty());
    }

    #[test]
    fn test_region_ending_exactly_at_break_is_untouched() {
        let regions = [ProtectedRegion::new(300, 400, RegionKind::PhotoBlock)];
        let plan = plan_pages(800, &regions, &config(400));
        assert_eq!(spans(&plan), vec![(0, 400), (400, 800)]);
    }

    #[test]
    fn test_cascading_regions_move_break_to_earliest() {
        let regions = [
            ProtectedRegion::new(300, 420, RegionKind::RoomSection),
            ProtectedRegion::new(320, 420, RegionKind::PhotoBlock),
            ProtectedRegion::new(250, 330, RegionKind::PhotoBlock),
        ];

        let plan = plan_pages(1000, &regions, &config(400));

        assert_eq!(plan.pages[0], PageSpan { start: 0, end: 250 });
    }

    #[test]
    fn test_oversized_photo_block_gets_its_own_page() {
        let regions = [
            ProtectedRegion::new(100, 700, RegionKind::PhotoBlock),
            ProtectedRegion::new(0, 900, RegionKind::RoomContainer),
        ];

        let plan = plan_pages(900, &regions, &config(400));

        assert!(plan.converged);
        assert_eq!(spans(&plan), vec![(0, 100), (100, 700), (700, 900)]);
    }

    #[test]
    fn test_oversized_container_is_split_between_children() {
        let regions = [
            ProtectedRegion::new(0, 1000, RegionKind::RoomContainer),
            ProtectedRegion::new(0, 300, RegionKind::PhotoBlock),
            ProtectedRegion::new(300, 600, RegionKind::PhotoBlock),
            ProtectedRegion::new(600, 1000, RegionKind::PhotoBlock),
        ];

        let plan = plan_pages(1000, &regions, &config(500));

        assert_eq!(spans(&plan), vec![(0, 300), (300, 600), (600, 1000)]);
    }

    #[test]
    fn test_zero_page_height_stops_without_looping() {
        let plan = plan_pages(1000, &[], &config(0));
        assert!(!plan.converged);
        assert!(plan.pages.is_empty());
    }

    #[test]
    fn test_iteration_bound_returns_partial_pages() {
        let config = PaginationConfig {
            max_page_height: 100,
            max_iterations: 3,
            ..Default::default()
        };

        let plan = plan_pages(1000, &[], &config);

        assert!(!plan.converged);
        assert_eq!(plan.pages.len(), 3);
        assert_eq!(plan.covered_height(), 300);
    }

    /// Rooms laid out the way `measure_document` does it: a container per
    /// room, a section for heading plus first block, and one region per block.
    fn rooms_strategy() -> impl Strategy<Value = (u32, Vec<ProtectedRegion>)> {
        prop::collection::vec(
            (10u32..60, prop::collection::vec(20u32..300, 1..6)),
            0..8,
        )
        .prop_map(|rooms| {
            let mut regions = Vec::new();
            let mut y = 120;
            for (heading, blocks) in rooms {
                let room_top = y;
                y += heading;
                for (i, block) in blocks.iter().enumerate() {
                    if i == 0 {
                        regions.push(ProtectedRegion::new(room_top, y + block, RegionKind::RoomSection));
                    }
                    regions.push(ProtectedRegion::new(y, y + block, RegionKind::PhotoBlock));
                    y += block;
                }
                regions.push(ProtectedRegion::new(room_top, y, RegionKind::RoomContainer));
            }
            (y + 40, regions)
        })
    }

    proptest! {
        #[test]
        fn prop_pages_tile_canvas_without_splitting_fitting_regions(
            (total, regions) in rooms_strategy(),
            max_page_height in 360u32..900,
        ) {
            let plan = plan_pages(total, &regions, &config(max_page_height));

            prop_assert!(plan.converged);
            prop_assert_eq!(plan.covered_height(), total);

            let mut expected_start = 0;
            for page in &plan.pages {
                prop_assert_eq!(page.start, expected_start);
                prop_assert!(page.end > page.start);
                prop_assert!(page.height() <= max_page_height);
                expected_start = page.end;
            }

            for page in &plan.pages {
                for region in regions.iter().filter(|r| r.height() <= max_page_height) {
                    prop_assert!(!region.is_cut_at(page.end), "{:?} cut at {}", region, page.end);
                }
            }
        }
    }
}
