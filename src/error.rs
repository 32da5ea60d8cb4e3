//! Structured error types for the Billhead composition engine.
//!
//! Only genuinely fatal conditions surface here. Missing logos, unreachable
//! signature URLs, and unknown theme ids are soft failures handled inside
//! their own components; the document still renders without them.

use thiserror::Error;

/// The unified error type returned by all public Billhead API functions.
///
/// A failed render produces no partial artifact: the caller either gets the
/// complete byte payload or one of these.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON input failed to parse as a valid render request.
    #[error("failed to parse render request: {0}")]
    Parse(#[from] serde_json::Error),

    /// The rich-content block could not be turned into a raster buffer.
    #[error("could not rasterize rich content: {0}")]
    Rasterize(String),

    /// Section layout failed in a way that cannot produce a coherent page.
    #[error("layout failure: {0}")]
    Layout(String),

    /// Writing the artifact to disk failed.
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}
