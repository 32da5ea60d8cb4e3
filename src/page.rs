//! # Page Cursor & Chrome
//!
//! The page is the fundamental unit of composition. A [`PageCursor`] owns
//! the growing page list and the single monotonically-advancing vertical
//! write position that every section renderer threads through.
//!
//! Chrome (the border frame or banner band that identifies a themed page)
//! is drawn exactly once per page, before any content, including every
//! continuation page. Sections never draw above `content_top` or below
//! `bottom_limit`.

use crate::assets::{ImageAsset, RasterBlock};
use crate::text::FontId;
use crate::theme::{Color, Layout, ThemeStyle};

// US Letter, points.
pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;
pub const MARGIN: f64 = 40.0;

/// First-page banner band height.
pub const BANNER_HEIGHT: f64 = 108.0;
/// Continuation pages get a thin bar instead of the full band.
pub const CONTINUATION_BAR_HEIGHT: f64 = 12.0;

/// Bordered chrome: outer and inner frame insets from the page edge.
pub const FRAME_OUTER_INSET: f64 = 16.0;
pub const FRAME_INNER_INSET: f64 = 22.0;

/// Below this many points of free space, a content sliver is not worth
/// starting; the paginator defers to a fresh page instead.
pub const MIN_SLICE: f64 = 20.0;

/// One drawing primitive, positioned in top-down page coordinates. The PDF
/// serializer flips to bottom-up PDF space.
#[derive(Debug, Clone)]
pub enum DrawOp {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f64,
        radius: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
    },
    /// `y` is the text baseline measured from the page top.
    Text {
        x: f64,
        y: f64,
        content: String,
        font: FontId,
        size: f64,
        color: Color,
    },
    /// A whole registered image asset.
    Image {
        image: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    /// One horizontal band of a registered raster block: `src_y_px` rows in,
    /// `src_h_px` rows tall, drawn into the `w`×`h` point rectangle.
    Slice {
        raster: usize,
        src_y_px: u32,
        src_h_px: u32,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
}

/// One finished page of draw operations.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// The per-render cursor: page list, write position, registered assets.
///
/// Created once per render call, advanced monotonically (never rewound),
/// then handed to the PDF serializer.
pub struct PageCursor {
    style: ThemeStyle,
    pub pages: Vec<Page>,
    pub images: Vec<ImageAsset>,
    pub rasters: Vec<RasterBlock>,
    /// Current vertical write offset from the page top.
    pub y: f64,
}

impl PageCursor {
    /// Open page one and draw its chrome.
    pub fn new(style: ThemeStyle) -> Self {
        let mut cursor = Self {
            style,
            pages: Vec::new(),
            images: Vec::new(),
            rasters: Vec::new(),
            y: 0.0,
        };
        cursor.open_page(true);
        cursor
    }

    pub fn style(&self) -> &ThemeStyle {
        &self.style
    }

    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    /// Left edge of the content area.
    pub fn content_left(&self) -> f64 {
        match self.style.layout {
            Layout::Banner => MARGIN,
            Layout::Bordered => FRAME_INNER_INSET + 18.0,
        }
    }

    pub fn content_right(&self) -> f64 {
        PAGE_WIDTH - self.content_left()
    }

    pub fn content_width(&self) -> f64 {
        self.content_right() - self.content_left()
    }

    /// Lowest y content may extend to on any page.
    pub fn bottom_limit(&self) -> f64 {
        match self.style.layout {
            Layout::Banner => PAGE_HEIGHT - MARGIN,
            Layout::Bordered => PAGE_HEIGHT - FRAME_INNER_INSET - 18.0,
        }
    }

    /// Free vertical space left on the current page.
    pub fn remaining(&self) -> f64 {
        (self.bottom_limit() - self.y).max(0.0)
    }

    /// Content start offset on a fresh page.
    pub fn content_top(&self, first_page: bool) -> f64 {
        match self.style.layout {
            Layout::Banner => {
                if first_page {
                    BANNER_HEIGHT + 26.0
                } else {
                    CONTINUATION_BAR_HEIGHT + 26.0
                }
            }
            Layout::Bordered => FRAME_INNER_INSET + 30.0,
        }
    }

    /// Usable content height of a continuation page.
    pub fn full_page_space(&self) -> f64 {
        self.bottom_limit() - self.content_top(false)
    }

    /// Start a continuation page: append it, redraw chrome, reset the
    /// write position.
    pub fn new_page(&mut self) {
        self.open_page(false);
    }

    /// If `needed` points do not fit on the current page, move to a new one.
    pub fn ensure_room(&mut self, needed: f64) {
        if self.remaining() < needed {
            self.new_page();
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.pages
            .last_mut()
            .expect("cursor always holds an open page")
            .ops
            .push(op);
    }

    pub fn add_image(&mut self, asset: ImageAsset) -> usize {
        self.images.push(asset);
        self.images.len() - 1
    }

    pub fn add_raster(&mut self, block: RasterBlock) -> usize {
        self.rasters.push(block);
        self.rasters.len() - 1
    }

    fn open_page(&mut self, first: bool) {
        self.pages.push(Page::default());
        self.draw_chrome(first);
        self.y = self.content_top(first);
    }

    /// Draw the per-page chrome. Bordered pages get the same concentric
    /// frame on every page; banner pages get the full band only on page one
    /// and a thin bar on continuations, so the title area is not repeated.
    fn draw_chrome(&mut self, first: bool) {
        match self.style.layout {
            Layout::Bordered => {
                let border = self.style.border;
                self.push(DrawOp::Rect {
                    x: FRAME_OUTER_INSET,
                    y: FRAME_OUTER_INSET,
                    w: PAGE_WIDTH - 2.0 * FRAME_OUTER_INSET,
                    h: PAGE_HEIGHT - 2.0 * FRAME_OUTER_INSET,
                    fill: None,
                    stroke: Some(border),
                    stroke_width: 2.0,
                    radius: 0.0,
                });
                self.push(DrawOp::Rect {
                    x: FRAME_INNER_INSET,
                    y: FRAME_INNER_INSET,
                    w: PAGE_WIDTH - 2.0 * FRAME_INNER_INSET,
                    h: PAGE_HEIGHT - 2.0 * FRAME_INNER_INSET,
                    fill: None,
                    stroke: Some(border),
                    stroke_width: 0.75,
                    radius: 0.0,
                });
            }
            Layout::Banner => {
                let height = if first {
                    BANNER_HEIGHT
                } else {
                    CONTINUATION_BAR_HEIGHT
                };
                self.push(DrawOp::Rect {
                    x: 0.0,
                    y: 0.0,
                    w: PAGE_WIDTH,
                    h: height,
                    fill: Some(self.style.header_background),
                    stroke: None,
                    stroke_width: 0.0,
                    radius: 0.0,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn banner_cursor() -> PageCursor {
        PageCursor::new(theme::resolve("modern").clone())
    }

    fn bordered_cursor() -> PageCursor {
        PageCursor::new(theme::resolve("classic").clone())
    }

    #[test]
    fn test_first_page_has_chrome() {
        let cur = banner_cursor();
        assert_eq!(cur.pages.len(), 1);
        assert_eq!(cur.pages[0].ops.len(), 1, "banner chrome is one filled rect");
        match &cur.pages[0].ops[0] {
            DrawOp::Rect { h, fill, .. } => {
                assert_eq!(*h, BANNER_HEIGHT);
                assert!(fill.is_some());
            }
            other => panic!("unexpected chrome op: {:?}", other),
        }
    }

    #[test]
    fn test_continuation_banner_is_thin_bar() {
        let mut cur = banner_cursor();
        cur.new_page();
        match &cur.pages[1].ops[0] {
            DrawOp::Rect { h, .. } => assert_eq!(*h, CONTINUATION_BAR_HEIGHT),
            other => panic!("unexpected chrome op: {:?}", other),
        }
        assert_eq!(cur.y, cur.content_top(false));
    }

    #[test]
    fn test_bordered_chrome_identical_every_page() {
        let mut cur = bordered_cursor();
        cur.new_page();
        assert_eq!(cur.pages[0].ops.len(), 2, "two concentric frame rects");
        assert_eq!(cur.pages[1].ops.len(), 2);
        for page in &cur.pages {
            for op in &page.ops {
                match op {
                    DrawOp::Rect { fill, stroke, .. } => {
                        assert!(fill.is_none(), "bordered chrome never fills");
                        assert!(stroke.is_some());
                    }
                    other => panic!("unexpected chrome op: {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_ensure_room_breaks_page() {
        let mut cur = banner_cursor();
        let before = cur.pages.len();
        cur.ensure_room(10.0);
        assert_eq!(cur.pages.len(), before, "plenty of room, no break");
        cur.ensure_room(10_000.0);
        assert_eq!(cur.pages.len(), before + 1);
    }

    #[test]
    fn test_cursor_is_monotonic_within_page() {
        let mut cur = banner_cursor();
        let start = cur.y;
        cur.y += 100.0;
        assert!(cur.y > start);
        assert!(cur.remaining() < cur.full_page_space() + cur.content_top(false));
    }
}
