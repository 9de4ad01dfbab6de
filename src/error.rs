//! Error types for the layout reconstruction engine.
//!
//! This module defines all error types that can occur while unifying
//! coordinates and grouping fragments into rows.

/// Result type alias for layout reconstruction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A normalized angle computation produced a value outside the tool's
    /// internal tolerance assumptions. Should never occur for valid vertex
    /// data; fatal when it does.
    #[error("geometry inconsistency: normalized angle {angle:.3}° is negative beyond the {epsilon}° tolerance")]
    GeometryInconsistency {
        /// The offending normalized angle in degrees
        angle: f64,
        /// The coercion tolerance that was in effect
        epsilon: f64,
    },

    /// An OCR response's full-text annotation did not contain exactly one page.
    #[error("unsupported page shape: expected exactly 1 annotation page, found {found}")]
    UnsupportedPageShape {
        /// Number of annotation pages actually present
        found: usize,
    },

    /// A paragraph's measured angle could not be coerced to any known
    /// orientation within tolerance.
    ///
    /// Blocks in the same condition are skipped instead of failing; the
    /// asymmetry is deliberate (see the `ocr::intermediate` module docs).
    #[error("uncoercible orientation: paragraph angle {angle:.2}° matches no known angle")]
    UncoercibleOrientation {
        /// The measured continuous angle in degrees
        angle: f64,
    },

    /// Malformed OCR payload
    #[error("invalid OCR payload: {0}")]
    InvalidPayload(String),

    /// JSON deserialization error for an OCR batch response
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
