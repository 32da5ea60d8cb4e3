//! # Document Assembly
//!
//! One parameterized pipeline drives all twelve document kinds: each kind
//! maps to a fixed section sequence, and every section renderer threads the
//! same [`PageCursor`]. Only the rich-content paginator may start new pages
//! repeatedly mid-section; the table and signature renderers request at
//! most one page at a time from their own fit checks.

pub mod flow;

mod footer;
mod header;
mod parties;
mod table;

use log::debug;

use crate::assets::{self, RasterBlock};
use crate::error::RenderError;
use crate::model::{BodyContent, DocumentKind, RenderRequest};
use crate::page::{DrawOp, Page, PageCursor};
use crate::theme::{self, Color};
use crate::RenderOptions;

/// The laid-out document: pages of draw ops plus the registered assets the
/// PDF serializer embeds.
#[derive(Debug)]
pub struct Composition {
    pub pages: Vec<Page>,
    pub images: Vec<crate::assets::ImageAsset>,
    pub rasters: Vec<RasterBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Parties,
    VendorGrid,
    Items,
    Body,
    Notes,
    Signature,
}

/// The fixed section sequence for each document kind.
fn sections(kind: DocumentKind) -> &'static [Section] {
    use Section::*;
    match kind {
        DocumentKind::Invoice
        | DocumentKind::Estimate
        | DocumentKind::WorkOrder
        | DocumentKind::TimeSheet
        | DocumentKind::MaterialLog
        | DocumentKind::ExpenseLog
        | DocumentKind::Receipt
        | DocumentKind::ChangeOrder => &[Header, Parties, Items, Body, Notes, Signature],
        DocumentKind::PurchaseOrder => &[Header, Parties, VendorGrid, Items, Notes, Signature],
        DocumentKind::DailyReport | DocumentKind::Note => {
            &[Header, Parties, Body, Notes, Signature]
        }
        // A warranty is a certificate: no party grid, prose instead of a
        // table, and an inset body column.
        DocumentKind::Warranty => &[Header, Body, Notes, Signature],
    }
}

/// Lay out a complete request into pages. Image resolution failures degrade
/// the layout; any other failure aborts with no partial output.
pub fn compose(req: &RenderRequest, options: &RenderOptions) -> Result<Composition, RenderError> {
    let style = theme::resolve(&req.theme).with_overrides(
        req.primary_override.as_deref().map(Color::hex),
        req.secondary_override.as_deref().map(Color::hex),
    );
    // Warranties are certificates: always the bordered frame.
    let style = if req.kind == DocumentKind::Warranty {
        style.certificate()
    } else {
        style
    };
    debug!(
        "composing {:?} '{}' with theme '{}'",
        req.kind, req.number, style.id
    );

    let logo = req
        .logo
        .as_deref()
        .and_then(|src| assets::resolve_image(src, options.fetch_timeout));
    let signature = req
        .signature
        .as_deref()
        .and_then(|src| assets::resolve_image(src, options.fetch_timeout));

    let mut cur = PageCursor::new(style);

    let logo_ref = logo.map(|asset| {
        let h = asset.scaled_height(header::LOGO_WIDTH);
        (cur.add_image(asset), h)
    });
    let signature_ref = signature.map(|asset| {
        let h = asset.scaled_height(footer::SIGNATURE_WIDTH);
        (cur.add_image(asset), h)
    });

    for section in sections(req.kind) {
        match section {
            Section::Header => header::draw(&mut cur, req, logo_ref),
            Section::Parties => parties::draw_grid(
                &mut cur,
                &[("FROM", &req.issuer), ("TO", &req.counterparty)],
                true,
            ),
            Section::VendorGrid => parties::draw_grid(
                &mut cur,
                &[
                    ("VENDOR", &req.vendor),
                    ("SHIP TO", &req.ship_to),
                    ("BILL TO", &req.counterparty),
                ],
                false,
            ),
            Section::Items => table::draw(&mut cur, req),
            Section::Body => draw_body(&mut cur, req, options)?,
            Section::Notes => footer::draw_notes(&mut cur, &req.notes),
            Section::Signature => {
                footer::draw_signature(&mut cur, signature_ref, &req.signature_label)
            }
        }
    }

    if cur.style().show_footer_rule {
        draw_footer_rules(&mut cur);
    }

    debug!("composed {} page(s)", cur.pages.len());
    Ok(Composition {
        pages: cur.pages,
        images: cur.images,
        rasters: cur.rasters,
    })
}

/// Route the rich-content block through the paginator. Markup needs the
/// configured rasterizer collaborator; a pre-rendered image body is decoded
/// directly. Either way, failure here is fatal: there is no meaningful
/// document without its body.
fn draw_body(
    cur: &mut PageCursor,
    req: &RenderRequest,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let Some(body) = &req.body else {
        return Ok(());
    };

    let inset = if req.kind == DocumentKind::Warranty {
        36.0
    } else {
        0.0
    };
    let target_w_pt = cur.content_width() - 2.0 * inset;

    let block = match body {
        BodyContent::Markup { content } => {
            let width_px = (target_w_pt * flow::RASTER_SCALE).round() as u32;
            match &options.rasterizer {
                Some(rasterizer) => rasterizer
                    .rasterize(content, width_px)
                    .map_err(RenderError::Rasterize)?,
                None => {
                    return Err(RenderError::Rasterize(
                        "no rasterizer configured for markup body".to_string(),
                    ))
                }
            }
        }
        BodyContent::Image { src } => assets::resolve_image(src, options.fetch_timeout)
            .and_then(|asset| asset.into_raster())
            .ok_or_else(|| {
                RenderError::Rasterize(format!("body image '{}' could not be decoded", src))
            })?,
    };

    flow::paginate(cur, block, inset);
    Ok(())
}

/// The thin rule above the bottom margin that some themes carry on every
/// page.
fn draw_footer_rules(cur: &mut PageCursor) {
    let color = cur.style().secondary;
    let x1 = cur.content_left();
    let x2 = cur.content_right();
    let y = cur.bottom_limit() + 8.0;
    for page in &mut cur.pages {
        page.ops.push(DrawOp::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            color,
            width: 0.6,
        });
    }
}
