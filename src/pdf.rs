//! # PDF Serializer
//!
//! Takes the composed pages and writes a valid PDF 1.7 file. This is a
//! from-scratch writer: the raw bytes are assembled directly, which keeps
//! the engine self-contained and the output deterministic. The subset of
//! the PDF spec a business document needs (standard Type1 fonts, flate
//! content streams, image XObjects) is manageable by hand.
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, images)
//! ...
//! xref                <- cross-reference table (byte offsets)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Raster bands produced by the rich-content paginator are embedded as one
//! XObject per slice, carved out of the source buffer by row range.

use std::collections::HashMap;
use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::assets::{PixelData, RasterBlock};
use crate::compose::Composition;
use crate::model::Metadata;
use crate::page::{DrawOp, PAGE_HEIGHT, PAGE_WIDTH};
use crate::text::FontId;

pub struct PdfWriter;

struct PdfObject {
    data: Vec<u8>,
}

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Registered fonts: (font, object id).
    font_objects: Vec<(FontId, usize)>,
    /// Object id per whole image asset, parallel to `Composition::images`.
    image_obj_ids: Vec<usize>,
    /// Per (page, op) slice XObjects: resource name and object id.
    slice_objects: HashMap<(usize, usize), (String, usize)>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a composition to PDF bytes.
    pub fn write(&self, comp: &Composition, metadata: &Metadata) -> Vec<u8> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
            image_obj_ids: Vec::new(),
            slice_objects: HashMap::new(),
        };

        // Object ids: 0 = placeholder (PDF objects are 1-indexed),
        // 1 = Catalog, 2 = Pages root; everything else follows.
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });

        self.register_fonts(&mut builder, comp);
        self.register_images(&mut builder, comp);
        self.register_slices(&mut builder, comp);

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for (page_idx, page) in comp.pages.iter().enumerate() {
            let content = self.build_content_stream(page_idx, &page.ops, &builder);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let fonts = self.build_font_resource_dict(&builder.font_objects);
            let xobjects = self.build_xobject_resource_dict(page_idx, &page.ops, &builder);
            let resources = if xobjects.is_empty() {
                format!("/Font << {} >>", fonts)
            } else {
                format!("/Font << {} >> /XObject << {} >>", fonts, xobjects)
            };
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << {} >> >>",
                PAGE_WIDTH, PAGE_HEIGHT, content_obj_id, resources
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = if metadata.title.is_some() || metadata.author.is_some() {
            let id = builder.objects.len();
            let mut info = String::from("<< ");
            if let Some(ref title) = metadata.title {
                let _ = write!(info, "/Title ({}) ", escape_pdf_string(title));
            }
            if let Some(ref author) = metadata.author {
                let _ = write!(info, "/Author ({}) ", escape_pdf_string(author));
            }
            let _ = write!(info, "/Producer (Billhead 0.1) /Creator (Billhead) >>");
            builder.objects.push(PdfObject {
                data: info.into_bytes(),
            });
            Some(id)
        } else {
            None
        };

        self.serialize(&builder, info_obj_id)
    }

    /// Register a Type1 font object for every face the composition uses.
    fn register_fonts(&self, builder: &mut PdfBuilder, comp: &Composition) {
        let mut used: Vec<FontId> = Vec::new();
        for page in &comp.pages {
            for op in &page.ops {
                if let DrawOp::Text { font, .. } = op {
                    if !used.contains(font) {
                        used.push(*font);
                    }
                }
            }
        }
        used.sort_by_key(|f| f.index());

        for font in used {
            let obj_id = builder.objects.len();
            let dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            builder.objects.push(PdfObject {
                data: dict.into_bytes(),
            });
            builder.font_objects.push((font, obj_id));
        }
    }

    /// One XObject (plus SMask when transparent) per registered image asset.
    fn register_images(&self, builder: &mut PdfBuilder, comp: &Composition) {
        for asset in &comp.images {
            let obj_id = match &asset.pixels {
                PixelData::Jpeg { data, gray } => {
                    write_jpeg_xobject(builder, asset.width_px, asset.height_px, data, *gray)
                }
                PixelData::Decoded { rgb, alpha } => write_pixels_xobject(
                    builder,
                    asset.width_px,
                    asset.height_px,
                    rgb,
                    alpha.as_deref(),
                ),
            };
            builder.image_obj_ids.push(obj_id);
        }
    }

    /// One XObject per emitted raster band, carved from its source block.
    fn register_slices(&self, builder: &mut PdfBuilder, comp: &Composition) {
        let mut counter = 0usize;
        for (page_idx, page) in comp.pages.iter().enumerate() {
            for (op_idx, op) in page.ops.iter().enumerate() {
                let DrawOp::Slice {
                    raster,
                    src_y_px,
                    src_h_px,
                    ..
                } = op
                else {
                    continue;
                };
                let block = &comp.rasters[*raster];
                let (rgb, alpha, rows) = extract_band(block, *src_y_px, *src_h_px);
                let obj_id =
                    write_pixels_xobject(builder, block.width_px, rows, &rgb, alpha.as_deref());
                builder
                    .slice_objects
                    .insert((page_idx, op_idx), (format!("Sl{}", counter), obj_id));
                counter += 1;
            }
        }
    }

    fn build_font_resource_dict(&self, font_objects: &[(FontId, usize)]) -> String {
        font_objects
            .iter()
            .map(|(font, obj_id)| format!("/F{} {} 0 R", font.index(), obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The /XObject entries a single page references.
    fn build_xobject_resource_dict(
        &self,
        page_idx: usize,
        ops: &[DrawOp],
        builder: &PdfBuilder,
    ) -> String {
        let mut entries: Vec<String> = Vec::new();
        for (op_idx, op) in ops.iter().enumerate() {
            match op {
                DrawOp::Image { image, .. } => {
                    let entry = format!("/Im{} {} 0 R", image, builder.image_obj_ids[*image]);
                    if !entries.contains(&entry) {
                        entries.push(entry);
                    }
                }
                DrawOp::Slice { .. } => {
                    if let Some((name, obj_id)) = builder.slice_objects.get(&(page_idx, op_idx)) {
                        entries.push(format!("/{} {} 0 R", name, obj_id));
                    }
                }
                _ => {}
            }
        }
        entries.join(" ")
    }

    /// Translate one page of draw ops into PDF content-stream operators.
    /// Ops carry top-down coordinates; PDF space is bottom-up.
    fn build_content_stream(&self, page_idx: usize, ops: &[DrawOp], builder: &PdfBuilder) -> String {
        let mut stream = String::new();

        for (op_idx, op) in ops.iter().enumerate() {
            match op {
                DrawOp::Rect {
                    x,
                    y,
                    w,
                    h,
                    fill,
                    stroke,
                    stroke_width,
                    radius,
                } => {
                    let py = PAGE_HEIGHT - y - h;
                    if let Some(c) = fill {
                        let _ = write!(stream, "q\n{:.3} {:.3} {:.3} rg\n", c.r, c.g, c.b);
                        write_rect_path(&mut stream, *x, py, *w, *h, *radius);
                        let _ = write!(stream, "f\nQ\n");
                    }
                    if let Some(c) = stroke {
                        let _ = write!(
                            stream,
                            "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n",
                            c.r, c.g, c.b, stroke_width
                        );
                        write_rect_path(&mut stream, *x, py, *w, *h, *radius);
                        let _ = write!(stream, "S\nQ\n");
                    }
                }

                DrawOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                    width,
                } => {
                    let _ = write!(
                        stream,
                        "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        color.r,
                        color.g,
                        color.b,
                        width,
                        x1,
                        PAGE_HEIGHT - y1,
                        x2,
                        PAGE_HEIGHT - y2,
                    );
                }

                DrawOp::Text {
                    x,
                    y,
                    content,
                    font,
                    size,
                    color,
                } => {
                    let _ = write!(
                        stream,
                        "BT\n{:.3} {:.3} {:.3} rg\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        color.r,
                        color.g,
                        color.b,
                        font.index(),
                        size,
                        x,
                        PAGE_HEIGHT - y,
                        encode_winansi(content),
                    );
                }

                DrawOp::Image { image, x, y, w, h } => {
                    let _ = write!(
                        stream,
                        "q\n{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                        w,
                        h,
                        x,
                        PAGE_HEIGHT - y - h,
                        image
                    );
                }

                DrawOp::Slice { x, y, w, h, .. } => {
                    if let Some((name, _)) = builder.slice_objects.get(&(page_idx, op_idx)) {
                        let _ = write!(
                            stream,
                            "q\n{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/{} Do\nQ\n",
                            w,
                            h,
                            x,
                            PAGE_HEIGHT - y - h,
                            name
                        );
                    }
                }
            }
        }

        stream
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: Option<usize>) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for i in 1..builder.objects.len() {
            let _ = write!(output, "{:010} 00000 n \n", offsets[i]);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R",
            builder.objects.len()
        );
        if let Some(info_id) = info_obj_id {
            let _ = write!(output, " /Info {} 0 R", info_id);
        }
        let _ = write!(output, " >>\nstartxref\n{}\n%%EOF\n", xref_offset);

        output
    }
}

/// Rectangle path, optionally with a uniform corner radius.
fn write_rect_path(stream: &mut String, x: f64, y: f64, w: f64, h: f64, radius: f64) {
    let r = radius.min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        let _ = write!(stream, "{:.2} {:.2} {:.2} {:.2} re\n", x, y, w, h);
        return;
    }

    // Four Bézier-joined corners.
    let k = 0.5522847498 * r;
    let _ = write!(stream, "{:.2} {:.2} m\n", x + r, y);
    let _ = write!(stream, "{:.2} {:.2} l\n", x + w - r, y);
    let _ = write!(
        stream,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        x + w - r + k, y, x + w, y + r - k, x + w, y + r
    );
    let _ = write!(stream, "{:.2} {:.2} l\n", x + w, y + h - r);
    let _ = write!(
        stream,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h
    );
    let _ = write!(stream, "{:.2} {:.2} l\n", x + r, y + h);
    let _ = write!(
        stream,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        x + r - k, y + h, x, y + h - r + k, x, y + h - r
    );
    let _ = write!(stream, "{:.2} {:.2} l\n", x, y + r);
    let _ = write!(
        stream,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        x, y + r - k, x + r - k, y, x + r, y
    );
    let _ = write!(stream, "h\n");
}

/// JPEG bytes embed directly with DCTDecode.
fn write_jpeg_xobject(
    builder: &mut PdfBuilder,
    width: u32,
    height: u32,
    data: &[u8],
    gray: bool,
) -> usize {
    let color_space = if gray { "/DeviceGray" } else { "/DeviceRGB" };
    let obj_id = builder.objects.len();
    let mut obj_data: Vec<u8> = Vec::new();
    let _ = write!(
        obj_data,
        "<< /Type /XObject /Subtype /Image \
         /Width {} /Height {} \
         /ColorSpace {} \
         /BitsPerComponent 8 \
         /Filter /DCTDecode \
         /Length {} >>\nstream\n",
        width,
        height,
        color_space,
        data.len()
    );
    obj_data.extend_from_slice(data);
    obj_data.extend_from_slice(b"\nendstream");
    builder.objects.push(PdfObject { data: obj_data });
    obj_id
}

/// Decoded pixels embed as flate RGB, with a grayscale SMask when an alpha
/// channel is present.
fn write_pixels_xobject(
    builder: &mut PdfBuilder,
    width: u32,
    height: u32,
    rgb: &[u8],
    alpha: Option<&[u8]>,
) -> usize {
    let smask_id = alpha.map(|alpha_data| {
        let compressed = compress_to_vec_zlib(alpha_data, 6);
        let smask_obj_id = builder.objects.len();
        let mut smask_data: Vec<u8> = Vec::new();
        let _ = write!(
            smask_data,
            "<< /Type /XObject /Subtype /Image \
             /Width {} /Height {} \
             /ColorSpace /DeviceGray \
             /BitsPerComponent 8 \
             /Filter /FlateDecode \
             /Length {} >>\nstream\n",
            width,
            height,
            compressed.len()
        );
        smask_data.extend_from_slice(&compressed);
        smask_data.extend_from_slice(b"\nendstream");
        builder.objects.push(PdfObject { data: smask_data });
        smask_obj_id
    });

    let compressed = compress_to_vec_zlib(rgb, 6);
    let obj_id = builder.objects.len();
    let smask_ref = smask_id
        .map(|id| format!(" /SMask {} 0 R", id))
        .unwrap_or_default();
    let mut obj_data: Vec<u8> = Vec::new();
    let _ = write!(
        obj_data,
        "<< /Type /XObject /Subtype /Image \
         /Width {} /Height {} \
         /ColorSpace /DeviceRGB \
         /BitsPerComponent 8 \
         /Filter /FlateDecode \
         /Length {}{} >>\nstream\n",
        width,
        height,
        compressed.len(),
        smask_ref
    );
    obj_data.extend_from_slice(&compressed);
    obj_data.extend_from_slice(b"\nendstream");
    builder.objects.push(PdfObject { data: obj_data });
    obj_id
}

/// Carve a row band out of a raster block, clamped to the buffer.
fn extract_band(block: &RasterBlock, src_y_px: u32, src_h_px: u32) -> (Vec<u8>, Option<Vec<u8>>, u32) {
    let w = block.width_px as usize;
    let y0 = (src_y_px as usize).min(block.height_px as usize);
    let y1 = ((src_y_px + src_h_px) as usize).min(block.height_px as usize);
    let rgb = block.rgb[y0 * w * 3..y1 * w * 3].to_vec();
    let alpha = block
        .alpha
        .as_ref()
        .map(|a| a[y0 * w..y1 * w].to_vec());
    (rgb, alpha, (y1 - y0) as u32)
}

fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
}

/// Encode text for a `( ... ) Tj` operator in WinAnsiEncoding, escaping
/// delimiters and emitting octal escapes outside printable ASCII.
fn encode_winansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let b = unicode_to_winansi(ch).unwrap_or(b'?');
        match b {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte.
///
/// WinAnsiEncoding is based on Windows-1252: 0x20..=0x7E and 0xA0..=0xFF
/// map directly, and 0x80..=0x9F carries smart quotes, bullets, and dashes.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use crate::theme::Color;

    fn empty_comp(pages: usize) -> Composition {
        Composition {
            pages: (0..pages).map(|_| Page::default()).collect(),
            images: Vec::new(),
            rasters: Vec::new(),
        }
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(escape_pdf_string("plain"), "plain");
        assert_eq!(escape_pdf_string("a(b)c"), "a\\(b\\)c");
        assert_eq!(escape_pdf_string("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_encode_winansi() {
        assert_eq!(encode_winansi("Total"), "Total");
        assert_eq!(encode_winansi("€"), "\\200");
        assert_eq!(encode_winansi("→"), "?");
        assert_eq!(encode_winansi("a·b"), "a\\267b");
    }

    #[test]
    fn test_empty_document_is_valid_pdf() {
        let bytes = PdfWriter::new().write(&empty_comp(1), &Metadata::default());
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
        assert!(bytes.windows(9).any(|w| w == b"/Count 1 "));
    }

    #[test]
    fn test_page_count_matches() {
        let bytes = PdfWriter::new().write(&empty_comp(3), &Metadata::default());
        assert!(bytes.windows(9).any(|w| w == b"/Count 3 "));
    }

    #[test]
    fn test_metadata_written() {
        let meta = Metadata {
            title: Some("Invoice INV-1024".to_string()),
            author: Some("Acme Builders".to_string()),
        };
        let bytes = PdfWriter::new().write(&empty_comp(1), &meta);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Invoice INV-1024)"));
        assert!(text.contains("/Author (Acme Builders)"));
    }

    #[test]
    fn test_text_op_registers_font() {
        let mut comp = empty_comp(1);
        comp.pages[0].ops.push(DrawOp::Text {
            x: 40.0,
            y: 100.0,
            content: "INVOICE".to_string(),
            font: FontId::HelveticaBold,
            size: 26.0,
            color: Color::BLACK,
        });
        let bytes = PdfWriter::new().write(&comp, &Metadata::default());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.contains("/F1"));
    }

    #[test]
    fn test_slice_band_extraction() {
        // 2px wide, 4px tall block with row-numbered pixels.
        let mut rgb = Vec::new();
        for row in 0u8..4 {
            for _ in 0..2 {
                rgb.extend_from_slice(&[row, row, row]);
            }
        }
        let block = RasterBlock {
            rgb,
            alpha: None,
            width_px: 2,
            height_px: 4,
        };
        let (band, alpha, rows) = extract_band(&block, 1, 2);
        assert_eq!(rows, 2);
        assert!(alpha.is_none());
        assert_eq!(band.len(), 2 * 2 * 3);
        assert!(band[..6].iter().all(|&b| b == 1));
        assert!(band[6..].iter().all(|&b| b == 2));
    }

    #[test]
    fn test_band_extraction_clamps() {
        let block = RasterBlock {
            rgb: vec![0; 2 * 4 * 3],
            alpha: Some(vec![255; 2 * 4]),
            width_px: 2,
            height_px: 4,
        };
        let (band, alpha, rows) = extract_band(&block, 3, 10);
        assert_eq!(rows, 1);
        assert_eq!(band.len(), 2 * 3);
        assert_eq!(alpha.unwrap().len(), 2);
    }

    #[test]
    fn test_slice_op_embeds_xobject() {
        let mut comp = empty_comp(1);
        comp.rasters.push(RasterBlock {
            rgb: vec![128; 4 * 10 * 3],
            alpha: None,
            width_px: 4,
            height_px: 10,
        });
        comp.pages[0].ops.push(DrawOp::Slice {
            raster: 0,
            src_y_px: 0,
            src_h_px: 10,
            x: 40.0,
            y: 200.0,
            w: 532.0,
            h: 5.0,
        });
        let bytes = PdfWriter::new().write(&comp, &Metadata::default());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Sl0 "));
        assert!(text.contains("/Subtype /Image"));
    }
}
