//! # Rich-Content Paginator
//!
//! Slices an arbitrarily tall rasterized content block across as many pages
//! as needed. The block is rendered once, off-page, by the rasterizer
//! collaborator; this module only plans and emits horizontal bands.
//!
//! The plan is a pure function of (content height, free space on the
//! current page, free space on a continuation page), with no hidden state,
//! so it is unit-tested directly against synthetic heights.

use crate::assets::RasterBlock;
use crate::page::{DrawOp, PageCursor, MIN_SLICE};

/// Pixels per point when rasterizing markup.
pub(crate) const RASTER_SCALE: f64 = 2.0;

/// One planned band of the source raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    /// Row offset into the source buffer.
    pub src_y_px: u32,
    /// Band height in source rows.
    pub h_px: u32,
    /// Whether a fresh page (with chrome redraw) precedes this band.
    pub page_break_before: bool,
}

/// Plan the band sequence for a block of `total_px` rows.
///
/// `first_window_px` is the free space on the current page,
/// `page_window_px` the free space on a continuation page. Invariants:
/// band heights sum to `total_px` exactly (no gaps, no overlaps), and a
/// band smaller than `min_px` is never the first thing on a page while
/// more than `min_px` of content remains (no orphaned slivers).
pub fn plan_slices(
    total_px: u32,
    first_window_px: u32,
    page_window_px: u32,
    min_px: u32,
) -> Vec<Slice> {
    debug_assert!(page_window_px > min_px);

    let mut plan = Vec::new();
    let mut remaining = total_px;
    let mut src_y_px = 0u32;
    let mut window = first_window_px;
    let mut page_break_before = false;

    while remaining > 0 {
        // Too little space for a useful band (or none at all): defer the
        // whole remainder to a fresh page rather than draw a sliver.
        if window == 0 || (window < min_px && remaining > min_px) {
            window = page_window_px;
            page_break_before = true;
        }

        let h_px = remaining.min(window);
        plan.push(Slice {
            src_y_px,
            h_px,
            page_break_before,
        });
        src_y_px += h_px;
        remaining -= h_px;

        window = page_window_px;
        page_break_before = true;
    }

    plan
}

/// Consume a raster block: draw its bands at the cursor, starting new
/// pages (chrome redrawn by the cursor) as needed. `inset` narrows the
/// draw width symmetrically, used by certificate-style prose.
pub(crate) fn paginate(cur: &mut PageCursor, block: RasterBlock, inset: f64) {
    if block.width_px == 0 || block.height_px == 0 {
        return;
    }

    let x = cur.content_left() + inset;
    let w = cur.content_width() - 2.0 * inset;
    // Source pixels per destination point.
    let scale = block.width_px as f64 / w;

    let total_px = block.height_px;
    let first_window_px = (cur.remaining() * scale).floor() as u32;
    let page_window_px = (cur.full_page_space() * scale).floor() as u32;
    let min_px = (MIN_SLICE * scale).ceil() as u32;

    let raster = cur.add_raster(block);

    for slice in plan_slices(total_px, first_window_px, page_window_px, min_px) {
        if slice.page_break_before {
            cur.new_page();
        }
        let h_pt = slice.h_px as f64 / scale;
        cur.push(DrawOp::Slice {
            raster,
            src_y_px: slice.src_y_px,
            src_h_px: slice.h_px,
            x,
            y: cur.y,
            w,
            h: h_pt,
        });
        cur.y += h_pt;
    }
}
