//! # Asset Resolution
//!
//! Normalizes a logo or signature reference into an embeddable raster asset
//! with known pixel dimensions, or fails soft. JPEG bytes pass through
//! without re-encoding (the PDF spec supports DCTDecode natively); PNG and
//! WEBP are decoded to RGB pixels with a separate alpha channel for SMask
//! transparency.
//!
//! Every failure path here (unreachable URL, undecodable bytes, unknown
//! format) resolves to `None`. A missing logo costs vertical space, not
//! the document.

use std::io::Cursor;
use std::io::Read;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, warn};

/// Supported input formats, inferred from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

/// The pixel payload in a form the PDF serializer consumes directly.
#[derive(Debug, Clone)]
pub enum PixelData {
    /// Raw JPEG bytes — embedded as-is with DCTDecode.
    Jpeg { data: Vec<u8>, gray: bool },
    /// Decoded RGB pixels + optional alpha channel.
    Decoded {
        /// width × height × 3 bytes.
        rgb: Vec<u8>,
        /// width × height bytes; `None` when fully opaque.
        alpha: Option<Vec<u8>>,
    },
}

/// A resolved, embeddable image asset.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub pixels: PixelData,
    pub format: ImageFormat,
    pub width_px: u32,
    pub height_px: u32,
}

impl ImageAsset {
    /// Height in points when drawn at `target_width` points, preserving the
    /// intrinsic aspect ratio.
    pub fn scaled_height(&self, target_width: f64) -> f64 {
        if self.width_px == 0 {
            return 0.0;
        }
        target_width * self.height_px as f64 / self.width_px as f64
    }

    /// Flatten into a sliceable raster block, decoding JPEG payloads.
    pub fn into_raster(self) -> Option<RasterBlock> {
        match self.pixels {
            PixelData::Decoded { rgb, alpha } => Some(RasterBlock {
                rgb,
                alpha,
                width_px: self.width_px,
                height_px: self.height_px,
            }),
            PixelData::Jpeg { data, .. } => {
                let decoded = decode_to_pixels(&data).ok()?;
                decoded.into_raster()
            }
        }
    }
}

/// A rasterized rich-content block: the unit the paginator slices.
#[derive(Debug, Clone)]
pub struct RasterBlock {
    /// width × height × 3 bytes.
    pub rgb: Vec<u8>,
    /// width × height bytes; `None` when fully opaque.
    pub alpha: Option<Vec<u8>>,
    pub width_px: u32,
    pub height_px: u32,
}

/// The rich-content rasterization collaborator.
///
/// Rendering an HTML-like markup block into pixels is owned by the host
/// (a webview, a headless renderer, a text engine); the engine only slices
/// the result across pages. Unlike asset resolution, a rasterization
/// failure is fatal to the render.
pub trait Rasterize {
    fn rasterize(&self, markup: &str, width_px: u32) -> Result<RasterBlock, String>;
}

/// Resolve an image reference to an embeddable asset, or `None`.
///
/// Supported `src` forms:
/// - `data:image/...;base64,...` — data URI
/// - `http://` / `https://` — remote fetch, bounded by `fetch_timeout`
/// - File path with an explicit `/`, `./`, or `../` prefix
/// - Raw base64-encoded image data
pub fn resolve_image(src: &str, fetch_timeout: Duration) -> Option<ImageAsset> {
    let raw_bytes = match read_source_bytes(src, fetch_timeout) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("image source unavailable, dropping asset: {}", e);
            return None;
        }
    };
    match decode_image_bytes(&raw_bytes) {
        Ok(asset) => {
            debug!(
                "resolved image asset: {:?} {}x{}",
                asset.format, asset.width_px, asset.height_px
            );
            Some(asset)
        }
        Err(e) => {
            warn!("image bytes undecodable, dropping asset: {}", e);
            None
        }
    }
}

/// Resolve the source string to raw image bytes.
fn read_source_bytes(src: &str, fetch_timeout: Duration) -> Result<Vec<u8>, String> {
    // Data URI: data:image/png;base64,iVBOR...
    if src.starts_with("data:image/") {
        let comma_pos = src
            .find(',')
            .ok_or_else(|| "invalid data URI: missing comma".to_string())?;
        return base64_decode(&src[comma_pos + 1..]);
    }

    if src.starts_with("http://") || src.starts_with("https://") {
        return fetch_remote(src, fetch_timeout);
    }

    // File path. Only explicit path prefixes, so base64 strings (which
    // contain '/') aren't mistaken for paths.
    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        return std::fs::read(src).map_err(|e| format!("failed to read image file '{}': {}", src, e));
    }

    // Try raw base64.
    base64_decode(src)
}

/// Fetch remote bytes with a bounded timeout. A stalled CDN must not stall
/// the whole document render; timeout reads the same as any fetch failure.
fn fetch_remote(url: &str, timeout: Duration) -> Result<Vec<u8>, String> {
    let agent = ureq::AgentBuilder::new().timeout(timeout).build();

    // Cache-defeating query token: hosted logo URLs are frequently
    // re-uploaded under the same name.
    let token = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let sep = if url.contains('?') { '&' } else { '?' };
    let busted = format!("{}{}cb={}", url, sep, token);

    let response = agent
        .get(&busted)
        .call()
        .map_err(|e| format!("fetch failed for '{}': {}", url, e))?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_REMOTE_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| format!("failed to read response body: {}", e))?;
    Ok(bytes)
}

/// 16 MiB cap on fetched assets.
const MAX_REMOTE_BYTES: u64 = 16 * 1024 * 1024;

fn base64_decode(input: &str) -> Result<Vec<u8>, String> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input.trim())
        .map_err(|e| format!("base64 decode error: {}", e))
}

/// Detect format from magic bytes and decode accordingly.
fn decode_image_bytes(data: &[u8]) -> Result<ImageAsset, String> {
    match sniff_format(data) {
        Some(ImageFormat::Jpeg) => decode_jpeg(data),
        Some(ImageFormat::Png) => decode_to_pixels(data).map(|a| ImageAsset {
            format: ImageFormat::Png,
            ..a
        }),
        Some(ImageFormat::Webp) => decode_to_pixels(data).map(|a| ImageAsset {
            format: ImageFormat::Webp,
            ..a
        }),
        None => Err("unsupported image format (expected PNG, JPEG, or WEBP)".to_string()),
    }
}

/// Short prefix check: PNG signature, JPEG SOI, or RIFF....WEBP.
pub fn sniff_format(data: &[u8]) -> Option<ImageFormat> {
    if data.len() >= 4 && data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47 {
        return Some(ImageFormat::Png);
    }
    if data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8 {
        return Some(ImageFormat::Jpeg);
    }
    if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        return Some(ImageFormat::Webp);
    }
    None
}

/// JPEG: read dimensions and component count without decoding pixels;
/// the raw bytes pass through to the PDF as DCTDecode.
fn decode_jpeg(data: &[u8]) -> Result<ImageAsset, String> {
    let reader = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("jpeg format detection error: {}", e))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| format!("failed to read jpeg dimensions: {}", e))?;

    Ok(ImageAsset {
        pixels: PixelData::Jpeg {
            data: data.to_vec(),
            gray: jpeg_is_grayscale(data),
        },
        format: ImageFormat::Jpeg,
        width_px: width,
        height_px: height,
    })
}

/// Scan JPEG markers for the SOF segment and read the component count.
fn jpeg_is_grayscale(data: &[u8]) -> bool {
    let mut i = 2; // skip SOI marker (FF D8)
    while i + 1 < data.len() {
        if data[i] != 0xFF {
            break;
        }
        let marker = data[i + 1];
        let is_sof = matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF);
        if is_sof {
            if i + 9 < data.len() {
                return data[i + 9] == 1;
            }
            break;
        }
        if i + 3 < data.len() {
            let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            i += 2 + seg_len;
        } else {
            break;
        }
    }
    false
}

/// Full decode to RGBA, split into RGB + alpha.
fn decode_to_pixels(data: &[u8]) -> Result<ImageAsset, String> {
    let reader = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("format detection error: {}", e))?;
    let img = reader
        .decode()
        .map_err(|e| format!("failed to decode image: {}", e))?;

    let rgba = img.to_rgba8();
    let width = rgba.width();
    let height = rgba.height();

    let pixel_count = (width as usize) * (height as usize);
    let mut rgb = Vec::with_capacity(pixel_count * 3);
    let mut alpha = Vec::with_capacity(pixel_count);
    let mut has_transparency = false;

    for pixel in rgba.pixels() {
        rgb.push(pixel[0]);
        rgb.push(pixel[1]);
        rgb.push(pixel[2]);
        let a = pixel[3];
        alpha.push(a);
        if a != 255 {
            has_transparency = true;
        }
    }

    Ok(ImageAsset {
        pixels: PixelData::Decoded {
            rgb,
            alpha: if has_transparency { Some(alpha) } else { None },
        },
        format: ImageFormat::Png,
        width_px: width,
        height_px: height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_test_png(rgba: image::RgbaImage) -> Vec<u8> {
        let (w, h) = rgba.dimensions();
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(encoder, rgba.as_raw(), w, h, image::ColorType::Rgba8)
            .unwrap();
        buf
    }

    #[test]
    fn test_sniff_magic_bytes() {
        assert_eq!(sniff_format(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(sniff_format(&[0x89, 0x50, 0x4E, 0x47]), Some(ImageFormat::Png));
        assert_eq!(
            sniff_format(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
            Some(ImageFormat::Webp)
        );
        assert_eq!(sniff_format(b"GIF89a"), None);
        assert_eq!(sniff_format(&[0xFF]), None);
    }

    #[test]
    fn test_decode_minimal_png() {
        let mut img = image::RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        let buf = encode_test_png(img);

        let asset = decode_image_bytes(&buf).unwrap();
        assert_eq!(asset.width_px, 1);
        assert_eq!(asset.height_px, 1);
        match &asset.pixels {
            PixelData::Decoded { rgb, alpha } => {
                assert_eq!(rgb, &[255, 0, 0]);
                assert!(alpha.is_none(), "fully opaque should have no alpha");
            }
            _ => panic!("PNG should decode to Decoded variant"),
        }
    }

    #[test]
    fn test_decode_png_with_alpha() {
        let mut img = image::RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 128]));
        let buf = encode_test_png(img);

        let asset = decode_image_bytes(&buf).unwrap();
        match &asset.pixels {
            PixelData::Decoded { rgb, alpha } => {
                assert_eq!(rgb, &[255, 0, 0]);
                assert_eq!(alpha.as_ref().unwrap(), &[128]);
            }
            _ => panic!("PNG should decode to Decoded variant"),
        }
    }

    #[test]
    fn test_jpeg_passes_through() {
        let img = image::RgbImage::from_fn(2, 2, |_, _| image::Rgb([0, 128, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new(&mut buf);
        image::ImageEncoder::write_image(encoder, img.as_raw(), 2, 2, image::ColorType::Rgb8)
            .unwrap();

        let asset = decode_image_bytes(&buf).unwrap();
        assert_eq!(asset.width_px, 2);
        assert_eq!(asset.height_px, 2);
        match &asset.pixels {
            PixelData::Jpeg { data, gray } => {
                assert!(data.starts_with(&[0xFF, 0xD8]));
                assert!(!gray);
            }
            _ => panic!("JPEG should stay as Jpeg variant"),
        }
    }

    #[test]
    fn test_data_uri_round_trip() {
        let mut img = image::RgbaImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgba([0, 255, 0, 255]));
        let buf = encode_test_png(img);

        use base64::Engine;
        let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
        let data_uri = format!("data:image/png;base64,{}", b64);

        let asset = resolve_image(&data_uri, Duration::from_secs(1)).unwrap();
        assert_eq!(asset.width_px, 1);
        assert_eq!(asset.height_px, 1);
    }

    #[test]
    fn test_unreachable_ref_is_soft_and_idempotent() {
        // A ref that is neither URI, path, nor base64 resolves to None,
        // and keeps resolving to None on retry.
        for _ in 0..3 {
            assert!(resolve_image("data:image/png;base64", Duration::from_secs(1)).is_none());
            assert!(resolve_image("!!not-an-image!!", Duration::from_secs(1)).is_none());
        }
    }

    #[test]
    fn test_scaled_height_preserves_aspect() {
        let asset = ImageAsset {
            pixels: PixelData::Decoded {
                rgb: vec![0; 200 * 100 * 3],
                alpha: None,
            },
            format: ImageFormat::Png,
            width_px: 200,
            height_px: 100,
        };
        assert!((asset.scaled_height(64.0) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_into_raster_from_decoded() {
        let asset = ImageAsset {
            pixels: PixelData::Decoded {
                rgb: vec![7; 4 * 2 * 3],
                alpha: None,
            },
            format: ImageFormat::Png,
            width_px: 4,
            height_px: 2,
        };
        let raster = asset.into_raster().unwrap();
        assert_eq!(raster.width_px, 4);
        assert_eq!(raster.height_px, 2);
        assert_eq!(raster.rgb.len(), 4 * 2 * 3);
    }
}
