//! Line-item table and the totals cascade.
//!
//! Rows never split across pages: when the next row would overflow, the
//! cursor moves to a fresh page and the column header is re-drawn there.
//! The totals block is likewise placed whole.

use crate::model::{format_money, RenderRequest, Totals, ValuationMode};
use crate::page::{DrawOp, PageCursor};
use crate::text::{self, FontId};
use crate::theme::Color;

const HEADER_ROW_H: f64 = 22.0;
const ROW_H: f64 = 20.0;
const CELL_PAD: f64 = 6.0;
const BODY_SIZE: f64 = 9.5;
const TOTAL_LINE_H: f64 = 16.0;

struct Column {
    header: &'static str,
    frac: f64,
    numeric: bool,
}

/// Column set for the document's valuation mode; cost-tracking kinds get
/// the extra unit-cost column when any item carries one.
fn columns(mode: ValuationMode, show_unit_cost: bool) -> Vec<Column> {
    match (mode, show_unit_cost) {
        (ValuationMode::QuantityRate, false) => vec![
            Column { header: "Description", frac: 0.52, numeric: false },
            Column { header: "Qty", frac: 0.12, numeric: true },
            Column { header: "Rate", frac: 0.18, numeric: true },
            Column { header: "Amount", frac: 0.18, numeric: true },
        ],
        (ValuationMode::QuantityRate, true) => vec![
            Column { header: "Description", frac: 0.40, numeric: false },
            Column { header: "Qty", frac: 0.12, numeric: true },
            Column { header: "Unit Cost", frac: 0.16, numeric: true },
            Column { header: "Rate", frac: 0.16, numeric: true },
            Column { header: "Amount", frac: 0.16, numeric: true },
        ],
        (ValuationMode::ProgressBilling, _) => vec![
            Column { header: "Description", frac: 0.40, numeric: false },
            Column { header: "Scheduled Value", frac: 0.22, numeric: true },
            Column { header: "% Billed", frac: 0.14, numeric: true },
            Column { header: "Current Amount", frac: 0.24, numeric: true },
        ],
    }
}

pub(crate) fn draw(cur: &mut PageCursor, req: &RenderRequest) {
    if req.items.is_empty() {
        return;
    }

    let show_unit_cost =
        req.kind.tracks_unit_cost() && req.items.iter().any(|it| it.unit_cost.is_some());
    let cols = columns(req.valuation, show_unit_cost);

    // The table must open with its header and at least one row.
    cur.ensure_room(HEADER_ROW_H + ROW_H + 8.0);
    draw_header_row(cur, &cols);

    for (i, item) in req.items.iter().enumerate() {
        if cur.remaining() < ROW_H {
            cur.new_page();
            draw_header_row(cur, &cols);
        }
        draw_row(cur, req, &cols, i, show_unit_cost);
    }

    cur.y += 10.0;
    draw_totals(cur, req);
}

fn draw_header_row(cur: &mut PageCursor, cols: &[Column]) {
    let style = cur.style().clone();
    let font = FontId::from_family(style.body_font, true);
    let x0 = cur.content_left();
    let w = cur.content_width();

    cur.push(DrawOp::Rect {
        x: x0,
        y: cur.y,
        w,
        h: HEADER_ROW_H,
        fill: Some(style.primary),
        stroke: None,
        stroke_width: 0.0,
        radius: style.corner_radius,
    });

    let baseline = cur.y + HEADER_ROW_H / 2.0 + 3.0;
    let mut x = x0;
    for col in cols {
        let col_w = w * col.frac;
        let content = col.header.to_string();
        let tx = if col.numeric {
            x + col_w - CELL_PAD - text::measure(font, BODY_SIZE, &content)
        } else {
            x + CELL_PAD
        };
        cur.push(DrawOp::Text {
            x: tx,
            y: baseline,
            content,
            font,
            size: BODY_SIZE,
            color: Color::WHITE,
        });
        x += col_w;
    }

    cur.y += HEADER_ROW_H;
}

fn draw_row(cur: &mut PageCursor, req: &RenderRequest, cols: &[Column], i: usize, show_unit_cost: bool) {
    let style = cur.style().clone();
    let font = FontId::from_family(style.body_font, false);
    let x0 = cur.content_left();
    let w = cur.content_width();
    let item = &req.items[i];

    if i % 2 == 1 {
        cur.push(DrawOp::Rect {
            x: x0,
            y: cur.y,
            w,
            h: ROW_H,
            fill: Some(style.stripe),
            stroke: None,
            stroke_width: 0.0,
            radius: 0.0,
        });
    }

    let amount = item.amount(req.valuation);
    let cells: Vec<String> = match req.valuation {
        ValuationMode::QuantityRate if show_unit_cost => vec![
            item.description.clone(),
            format_qty(item.quantity),
            item.unit_cost.map(format_money).unwrap_or_default(),
            format_money(item.rate),
            format_money(amount),
        ],
        ValuationMode::QuantityRate => vec![
            item.description.clone(),
            format_qty(item.quantity),
            format_money(item.rate),
            format_money(amount),
        ],
        ValuationMode::ProgressBilling => vec![
            item.description.clone(),
            format_money(item.scheduled_value),
            format!("{}%", format_qty(item.percent_complete)),
            format_money(amount),
        ],
    };

    let baseline = cur.y + ROW_H / 2.0 + 3.0;
    let mut x = x0;
    for (col, cell) in cols.iter().zip(cells) {
        let col_w = w * col.frac;
        let content = text::truncate(font, BODY_SIZE, &cell, col_w - 2.0 * CELL_PAD);
        let tx = if col.numeric {
            x + col_w - CELL_PAD - text::measure(font, BODY_SIZE, &content)
        } else {
            x + CELL_PAD
        };
        cur.push(DrawOp::Text {
            x: tx,
            y: baseline,
            content,
            font,
            size: BODY_SIZE,
            color: style.text,
        });
        x += col_w;
    }

    cur.y += ROW_H;
}

/// Subtotal → discount → tax → shipping → total, right-aligned. Zero-valued
/// adjustment lines are omitted; subtotal and total always print.
fn draw_totals(cur: &mut PageCursor, req: &RenderRequest) {
    let totals = Totals::compute(&req.items, req.valuation, &req.charges);

    let mut lines: Vec<(String, String)> = Vec::new();
    lines.push(("Subtotal".to_string(), format_money(totals.subtotal)));
    if totals.discount != 0.0 {
        lines.push(("Discount".to_string(), format!("-{}", format_money(totals.discount))));
    }
    if totals.tax != 0.0 {
        lines.push((
            format!("Tax ({}%)", format_qty(totals.tax_rate)),
            format_money(totals.tax),
        ));
    }
    if totals.shipping != 0.0 {
        lines.push(("Shipping".to_string(), format_money(totals.shipping)));
    }

    let block_h = lines.len() as f64 * TOTAL_LINE_H + 28.0;
    cur.ensure_room(block_h);

    let style = cur.style().clone();
    let font = FontId::from_family(style.body_font, false);
    let bold = FontId::from_family(style.body_font, true);
    let box_w = 220.0;
    let right = cur.content_right();
    let label_x = right - box_w;

    for (label, value) in &lines {
        cur.y += TOTAL_LINE_H;
        cur.push(DrawOp::Text {
            x: label_x,
            y: cur.y,
            content: label.clone(),
            font,
            size: BODY_SIZE,
            color: style.text,
        });
        cur.push(DrawOp::Text {
            x: right - text::measure(font, BODY_SIZE, value),
            y: cur.y,
            content: value.clone(),
            font,
            size: BODY_SIZE,
            color: style.text,
        });
    }

    // Rule, then the emphasized grand total.
    cur.y += 8.0;
    cur.push(DrawOp::Line {
        x1: label_x,
        y1: cur.y,
        x2: right,
        y2: cur.y,
        color: style.primary,
        width: 1.2,
    });
    cur.y += 16.0;
    let total_size = 13.0;
    cur.push(DrawOp::Text {
        x: label_x,
        y: cur.y,
        content: "Total".to_string(),
        font: bold,
        size: total_size,
        color: style.primary,
    });
    let value = format_money(totals.total);
    cur.push(DrawOp::Text {
        x: right - text::measure(bold, total_size, &value),
        y: cur.y,
        content: value,
        font: bold,
        size: total_size,
        color: style.primary,
    });
    cur.y += 12.0;
}

/// Quantities print without trailing zeros: `10`, `2.5`, `0.25`.
fn format_qty(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{:.2}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentKind, LineItem};
    use crate::theme;

    fn request_with_items(n: usize) -> RenderRequest {
        let mut req: RenderRequest =
            serde_json::from_value(serde_json::json!({ "kind": "Invoice" })).unwrap();
        req.items = (0..n)
            .map(|i| LineItem {
                description: format!("Line item {}", i + 1),
                quantity: 1.0,
                rate: 100.0,
                ..Default::default()
            })
            .collect();
        req
    }

    fn texts(cur: &PageCursor, page: usize) -> Vec<String> {
        cur.pages[page]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_items_draws_nothing() {
        let mut cur = PageCursor::new(theme::resolve("standard").clone());
        let ops_before = cur.pages[0].ops.len();
        draw(&mut cur, &request_with_items(0));
        assert_eq!(cur.pages[0].ops.len(), ops_before);
    }

    #[test]
    fn test_zero_adjustments_omitted() {
        let mut cur = PageCursor::new(theme::resolve("standard").clone());
        draw(&mut cur, &request_with_items(2));
        let texts = texts(&cur, 0);
        assert!(texts.iter().any(|t| t == "Subtotal"));
        assert!(texts.iter().any(|t| t == "Total"));
        assert!(!texts.iter().any(|t| t == "Discount"));
        assert!(!texts.iter().any(|t| t == "Shipping"));
        assert!(!texts.iter().any(|t| t.starts_with("Tax")));
    }

    #[test]
    fn test_nonzero_adjustments_print() {
        let mut cur = PageCursor::new(theme::resolve("standard").clone());
        let mut req = request_with_items(1);
        req.charges.discount = 10.0;
        req.charges.tax_rate = 8.25;
        req.charges.shipping = 5.0;
        draw(&mut cur, &req);
        let texts = texts(&cur, 0);
        assert!(texts.iter().any(|t| t == "Discount"));
        assert!(texts.iter().any(|t| t == "Tax (8.25%)"));
        assert!(texts.iter().any(|t| t == "Shipping"));
    }

    #[test]
    fn test_long_table_repeats_header_on_new_page() {
        let mut cur = PageCursor::new(theme::resolve("standard").clone());
        draw(&mut cur, &request_with_items(60));
        assert!(cur.pages.len() > 1, "60 rows must overflow one page");
        for page in 0..cur.pages.len() {
            let texts = texts(&cur, page);
            assert!(
                texts.iter().any(|t| t == "Description"),
                "page {} missing repeated column header",
                page
            );
        }
    }

    #[test]
    fn test_progress_mode_columns() {
        let mut cur = PageCursor::new(theme::resolve("standard").clone());
        let mut req = request_with_items(0);
        req.valuation = ValuationMode::ProgressBilling;
        req.items = vec![LineItem {
            description: "Foundation".into(),
            scheduled_value: 20_000.0,
            percent_complete: 25.0,
            ..Default::default()
        }];
        draw(&mut cur, &req);
        let texts = texts(&cur, 0);
        assert!(texts.iter().any(|t| t == "Scheduled Value"));
        assert!(texts.iter().any(|t| t == "25%"));
        assert!(texts.iter().any(|t| t == "$5,000.00"));
        assert!(!texts.iter().any(|t| t == "Qty"));
    }

    #[test]
    fn test_unit_cost_column_only_for_tracking_kinds() {
        let mut req = request_with_items(1);
        req.items[0].unit_cost = Some(42.0);

        let mut cur = PageCursor::new(theme::resolve("standard").clone());
        draw(&mut cur, &req);
        assert!(
            !texts(&cur, 0).iter().any(|t| t == "Unit Cost"),
            "invoices never show unit cost"
        );

        req.kind = DocumentKind::MaterialLog;
        let mut cur = PageCursor::new(theme::resolve("standard").clone());
        draw(&mut cur, &req);
        assert!(texts(&cur, 0).iter().any(|t| t == "Unit Cost"));
    }

    #[test]
    fn test_format_qty() {
        assert_eq!(format_qty(10.0), "10");
        assert_eq!(format_qty(2.5), "2.5");
        assert_eq!(format_qty(0.25), "0.25");
    }
}
