//! # Billhead
//!
//! A page-native composition engine for paginated business documents.
//!
//! Billhead takes one structured, already-validated record (an invoice, an
//! estimate, a work order, any of twelve kinds) plus a named visual theme,
//! and lays its sections onto fixed-size pages: branded header, party
//! grid, line-item table with a totals cascade, free-form rich content,
//! signature block. Variable-height rich content is rasterized once by a
//! collaborator and sliced across as many pages as needed, with the page
//! chrome re-established identically on every continuation page.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    — Request record: kinds, parties, items, theme selection
//!       ↓
//!   [theme]    — Preset resolution, per-request color overrides
//!       ↓
//!   [compose]  — Page-aware section layout, rich-content pagination
//!       ↓
//!   [pdf]      — Serialize to PDF bytes
//! ```
//!
//! Missing logos and signatures degrade the layout and are never errors;
//! everything else fails the whole render with no partial artifact.

pub mod assets;
pub mod compose;
pub mod error;
pub mod model;
pub mod page;
pub mod pdf;
pub mod text;
pub mod theme;

use std::path::{Path, PathBuf};
use std::time::Duration;

use assets::Rasterize;
use error::RenderError;
use model::{DocumentKind, RenderRequest};
use pdf::PdfWriter;

/// Per-call knobs. One of these travels with each render; there is no
/// global configuration.
pub struct RenderOptions {
    /// Upper bound on each remote asset fetch. A stalled network call reads
    /// as a missing asset, not a stalled document.
    pub fetch_timeout: Duration,
    /// The rich-content rasterization collaborator. Requests whose body is
    /// markup fail without one; pre-rendered image bodies don't need it.
    pub rasterizer: Option<Box<dyn Rasterize>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            rasterizer: None,
        }
    }
}

/// Render a request to PDF bytes with default options.
///
/// This is the primary entry point.
pub fn render(request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
    render_with(request, &RenderOptions::default())
}

/// Render a request to PDF bytes.
pub fn render_with(
    request: &RenderRequest,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    let composition = compose::compose(request, options)?;
    let writer = PdfWriter::new();
    Ok(writer.write(&composition, &request.metadata))
}

/// Render a request described as JSON to PDF bytes.
pub fn render_json(json: &str) -> Result<Vec<u8>, RenderError> {
    let request: RenderRequest = serde_json::from_str(json)?;
    render(&request)
}

/// Deterministic artifact file name: `<Kind>-<number>.pdf`, falling back to
/// the bare kind when the request has no number.
pub fn artifact_name(kind: DocumentKind, number: &str) -> String {
    let clean: String = number
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    if clean.is_empty() {
        format!("{}.pdf", kind.slug())
    } else {
        format!("{}-{}.pdf", kind.slug(), clean)
    }
}

/// Render and persist under the deterministic artifact name; returns the
/// written path.
pub fn render_to_file(
    request: &RenderRequest,
    dir: &Path,
    options: &RenderOptions,
) -> Result<PathBuf, RenderError> {
    let bytes = render_with(request, options)?;
    let path = dir.join(artifact_name(request.kind, &request.number));
    std::fs::write(&path, &bytes)?;
    Ok(path)
}

/// Render to a base64 payload for embedding: mail attachments, inline
/// previews.
pub fn render_base64(
    request: &RenderRequest,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    use base64::Engine;
    let bytes = render_with(request, options)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}
