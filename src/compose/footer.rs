//! Trailing sections: the optional note/terms paragraph and the signature
//! block.

use crate::page::{DrawOp, PageCursor};
use crate::text::{self, FontId};

/// Target draw width for the signature image.
pub(crate) const SIGNATURE_WIDTH: f64 = 110.0;
/// Worst-case height of the signature block: image, rule, label, margins.
pub(crate) const SIGNATURE_BLOCK_HEIGHT: f64 = 96.0;

const NOTE_SIZE: f64 = 9.5;
const NOTE_LINE_H: f64 = 13.0;

/// A registered signature asset: image index plus aspect-scaled height at
/// [`SIGNATURE_WIDTH`].
pub(crate) type SignatureRef = Option<(usize, f64)>;

pub(crate) fn draw_notes(cur: &mut PageCursor, notes: &str) {
    if notes.is_empty() {
        return;
    }

    let style = cur.style().clone();
    let label_font = FontId::from_family(style.body_font, true);
    let body_font = FontId::from_family(style.body_font, false);
    let x = cur.content_left();

    cur.y += 8.0;
    cur.ensure_room(10.0 + 2.0 * NOTE_LINE_H);
    cur.y += 10.0;
    cur.push(DrawOp::Text {
        x,
        y: cur.y,
        content: "NOTES".to_string(),
        font: label_font,
        size: 9.0,
        color: style.secondary,
    });

    // A long paragraph may spill; continue line by line on fresh pages.
    for line in text::wrap(body_font, NOTE_SIZE, notes, cur.content_width()) {
        cur.ensure_room(NOTE_LINE_H + 2.0);
        cur.y += NOTE_LINE_H;
        cur.push(DrawOp::Text {
            x,
            y: cur.y,
            content: line,
            font: body_font,
            size: NOTE_SIZE,
            color: style.text,
        });
    }
    cur.y += 10.0;
}

/// Signature image, rule beneath, label beneath the rule. Absent signature
/// means no space is reserved at all.
pub(crate) fn draw_signature(cur: &mut PageCursor, signature: SignatureRef, label: &str) {
    let Some((image, height)) = signature else {
        return;
    };

    // Pre-check: the block is never split across a page boundary.
    cur.ensure_room(SIGNATURE_BLOCK_HEIGHT);

    let style = cur.style().clone();
    let font = FontId::from_family(style.body_font, false);
    let x = cur.content_left();
    let img_h = height.min(48.0);
    let img_w = SIGNATURE_WIDTH * img_h / height.max(1e-9);

    cur.y += 14.0;
    cur.push(DrawOp::Image {
        image,
        x,
        y: cur.y,
        w: img_w,
        h: img_h,
    });
    cur.y += img_h + 6.0;

    let rule_w = 180.0;
    cur.push(DrawOp::Line {
        x1: x,
        y1: cur.y,
        x2: x + rule_w,
        y2: cur.y,
        color: style.text,
        width: 0.8,
    });

    cur.y += 12.0;
    cur.push(DrawOp::Text {
        x,
        y: cur.y,
        content: label.to_string(),
        font,
        size: 8.5,
        color: style.secondary,
    });
    cur.y += 8.0;
}
