//! Header block: title, identifier, dates, optional logo. Two variants
//! keyed off the theme's layout: drawn into the banner band, or centered
//! under the certificate frame.

use crate::model::RenderRequest;
use crate::page::{DrawOp, PageCursor, BANNER_HEIGHT, MARGIN, PAGE_WIDTH};
use crate::text::{self, FontId};
use crate::theme::Layout;

/// Target draw width for the logo; height follows the aspect ratio.
pub(crate) const LOGO_WIDTH: f64 = 64.0;

/// A registered logo: image index plus aspect-scaled height at [`LOGO_WIDTH`].
pub(crate) type LogoRef = Option<(usize, f64)>;

pub(crate) fn draw(cur: &mut PageCursor, req: &RenderRequest, logo: LogoRef) {
    let title = req.kind.display_title(req.valuation);
    match cur.style().layout {
        Layout::Banner => draw_banner(cur, req, title, logo),
        Layout::Bordered => draw_bordered(cur, req, title, logo),
    }
}

fn draw_banner(cur: &mut PageCursor, req: &RenderRequest, title: &str, logo: LogoRef) {
    let style = cur.style().clone();
    let header_font = FontId::from_family(style.header_font, true);
    let detail_font = FontId::from_family(style.body_font, false);
    let right = PAGE_WIDTH - MARGIN;

    if let Some((image, height)) = logo {
        // Keep the logo inside the band with a little breathing room.
        let max_h = BANNER_HEIGHT - 24.0;
        let (w, h) = if height > max_h {
            (LOGO_WIDTH * max_h / height, max_h)
        } else {
            (LOGO_WIDTH, height)
        };
        cur.push(DrawOp::Image {
            image,
            x: MARGIN,
            y: (BANNER_HEIGHT - h) / 2.0,
            w,
            h,
        });
    }

    let title_size = 26.0;
    cur.push(DrawOp::Text {
        x: right - text::measure(header_font, title_size, title),
        y: 44.0,
        content: title.to_string(),
        font: header_font,
        size: title_size,
        color: style.header_text,
    });

    let mut line_y = 64.0;
    let mut detail = |cur: &mut PageCursor, content: String| {
        if content.is_empty() {
            return;
        }
        cur.push(DrawOp::Text {
            x: right - text::measure(detail_font, 10.0, &content),
            y: line_y,
            content,
            font: detail_font,
            size: 10.0,
            color: style.header_text,
        });
        line_y += 14.0;
    };
    detail(cur, req.number.clone());
    detail(cur, req.issued.clone());
    detail(cur, req.due.clone());

    // The band was drawn by the chrome; content resumes below it, where
    // the cursor already sits.
}

fn draw_bordered(cur: &mut PageCursor, req: &RenderRequest, title: &str, logo: LogoRef) {
    let style = cur.style().clone();
    let header_font = FontId::from_family(style.header_font, true);
    let detail_font = FontId::from_family(style.body_font, false);

    if let Some((image, height)) = logo {
        cur.push(DrawOp::Image {
            image,
            x: (PAGE_WIDTH - LOGO_WIDTH) / 2.0,
            y: cur.y,
            w: LOGO_WIDTH,
            h: height,
        });
        cur.y += height + 14.0;
    }

    let title_size = 24.0;
    cur.y += title_size;
    cur.push(DrawOp::Text {
        x: (PAGE_WIDTH - text::measure(header_font, title_size, title)) / 2.0,
        y: cur.y,
        content: title.to_string(),
        font: header_font,
        size: title_size,
        color: style.header_text,
    });

    // Identifier and dates share one centered line.
    let detail: Vec<&str> = [req.number.as_str(), req.issued.as_str(), req.due.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !detail.is_empty() {
        let line = detail.join("  ·  ");
        cur.y += 18.0;
        cur.push(DrawOp::Text {
            x: (PAGE_WIDTH - text::measure(detail_font, 10.0, &line)) / 2.0,
            y: cur.y,
            content: line,
            font: detail_font,
            size: 10.0,
            color: style.secondary,
        });
    }

    cur.y += 28.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentKind;
    use crate::theme;

    fn request(kind: DocumentKind) -> RenderRequest {
        serde_json::from_value(serde_json::json!({
            "kind": kind,
            "number": "INV-1024",
            "issued": "March 4, 2026",
        }))
        .unwrap()
    }

    #[test]
    fn test_banner_header_draws_into_band() {
        let mut cur = PageCursor::new(theme::resolve("modern").clone());
        let before = cur.y;
        draw(&mut cur, &request(DocumentKind::Invoice), None);
        assert_eq!(cur.y, before, "banner header must not consume body space");

        let texts: Vec<&str> = cur.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"INVOICE"));
        assert!(texts.contains(&"INV-1024"));
    }

    #[test]
    fn test_bordered_header_advances_cursor() {
        let mut cur = PageCursor::new(theme::resolve("classic").clone());
        let before = cur.y;
        draw(&mut cur, &request(DocumentKind::Warranty), None);
        assert!(cur.y > before);

        let has_title = cur.pages[0].ops.iter().any(|op| {
            matches!(op, DrawOp::Text { content, .. } if content == "WARRANTY")
        });
        assert!(has_title);
    }
}
