//! Party contact grids: the two-column FROM/TO block, and the three-column
//! vendor / ship-to / bill-to variant purchase orders insert before the
//! table.

use crate::model::Party;
use crate::page::{DrawOp, PageCursor};
use crate::text::{self, FontId};

const LABEL_SIZE: f64 = 8.0;
const NAME_SIZE: f64 = 11.0;
const DETAIL_SIZE: f64 = 9.5;
const LINE_H: f64 = 13.0;
const COLUMN_GAP: f64 = 18.0;

/// Draw labeled party columns at the cursor. The first column is treated as
/// the issuer when `first_is_issuer` is set, which adds the combined
/// phone · website contact line.
///
/// Either party may be entirely empty; the name line height is still
/// reserved so the columns stay vertically aligned.
pub(crate) fn draw_grid(cur: &mut PageCursor, columns: &[(&str, &Party)], first_is_issuer: bool) {
    let style = cur.style().clone();
    let name_font = FontId::from_family(style.body_font, true);
    let label_font = FontId::from_family(style.body_font, true);
    let detail_font = FontId::from_family(style.body_font, false);

    let n = columns.len() as f64;
    let col_w = (cur.content_width() - COLUMN_GAP * (n - 1.0)) / n;
    let wrap_w = col_w - 8.0;
    let top = cur.y;
    let mut tallest = 0.0f64;

    for (i, (label, party)) in columns.iter().enumerate() {
        let x = cur.content_left() + i as f64 * (col_w + COLUMN_GAP);
        let mut y = top;

        y += LABEL_SIZE;
        cur.push(DrawOp::Text {
            x,
            y,
            content: (*label).to_string(),
            font: label_font,
            size: LABEL_SIZE,
            color: style.secondary,
        });
        y += 6.0;

        // Name line is reserved even for an empty party.
        y += LINE_H;
        if !party.name.is_empty() {
            cur.push(DrawOp::Text {
                x,
                y,
                content: text::truncate(name_font, NAME_SIZE, &party.name, wrap_w),
                font: name_font,
                size: NAME_SIZE,
                color: style.text,
            });
        }

        if !party.address.is_empty() {
            for line in text::wrap(detail_font, DETAIL_SIZE, &party.address, wrap_w) {
                y += LINE_H;
                cur.push(DrawOp::Text {
                    x,
                    y,
                    content: line,
                    font: detail_font,
                    size: DETAIL_SIZE,
                    color: style.text,
                });
            }
        }

        if !party.email.is_empty() {
            y += LINE_H;
            cur.push(DrawOp::Text {
                x,
                y,
                content: text::truncate(detail_font, DETAIL_SIZE, &party.email, wrap_w),
                font: detail_font,
                size: DETAIL_SIZE,
                color: style.text,
            });
        }

        if first_is_issuer && i == 0 {
            let contact = contact_line(party);
            if !contact.is_empty() {
                y += LINE_H;
                cur.push(DrawOp::Text {
                    x,
                    y,
                    content: text::truncate(detail_font, DETAIL_SIZE, &contact, wrap_w),
                    font: detail_font,
                    size: DETAIL_SIZE,
                    color: style.secondary,
                });
            }
        }

        tallest = tallest.max(y - top);
    }

    cur.y = top + tallest + 20.0;
}

/// Phone and website joined on one line; either may be missing.
fn contact_line(party: &Party) -> String {
    match (party.phone.is_empty(), party.website.is_empty()) {
        (false, false) => format!("{}  ·  {}", party.phone, party.website),
        (false, true) => party.phone.clone(),
        (true, false) => party.website.clone(),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn party(name: &str, address: &str) -> Party {
        Party {
            name: name.to_string(),
            address: address.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_parties_still_reserve_height() {
        let mut cur = PageCursor::new(theme::resolve("standard").clone());
        let top = cur.y;
        draw_grid(&mut cur, &[("FROM", &Party::default()), ("TO", &Party::default())], true);
        // Label + name line + margin, even with nothing to print.
        assert!(cur.y - top >= LABEL_SIZE + LINE_H);
    }

    #[test]
    fn test_taller_column_wins() {
        let mut cur = PageCursor::new(theme::resolve("standard").clone());
        let short = party("Acme Builders", "12 Short St");
        let tall = party(
            "Widget Industries",
            "Unit 4, 400 Industrial Way\nDock 9\nSpringfield, IL 62701",
        );
        let top = cur.y;
        draw_grid(&mut cur, &[("FROM", &short), ("TO", &tall)], true);
        let consumed_both = cur.y - top;

        let mut cur2 = PageCursor::new(theme::resolve("standard").clone());
        let top2 = cur2.y;
        draw_grid(&mut cur2, &[("FROM", &short), ("TO", &short)], true);
        assert!(consumed_both > cur2.y - top2);
    }

    #[test]
    fn test_issuer_contact_line() {
        let issuer = Party {
            name: "Acme Builders".into(),
            phone: "(555) 010-2299".into(),
            website: "acme.example".into(),
            ..Default::default()
        };
        let mut cur = PageCursor::new(theme::resolve("standard").clone());
        draw_grid(&mut cur, &[("FROM", &issuer), ("TO", &Party::default())], true);
        let joined = cur.pages[0].ops.iter().any(|op| {
            matches!(op, DrawOp::Text { content, .. }
                if content.contains("(555) 010-2299") && content.contains("acme.example"))
        });
        assert!(joined, "phone and website combine onto one line");
    }
}
