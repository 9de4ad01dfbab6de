//! # rowfold
//!
//! Reconstructs tabular reading order from positioned text fragments.
//!
//! Two unrelated sources hand over text as independently positioned runs:
//! digitally extracted PDF text layers, and cloud OCR output for scanned
//! (and often rotated) pages. Neither guarantees that fragments on the same
//! visual line share an exact y-coordinate. This crate normalizes both into
//! one coordinate space and folds all pages of a document into a single
//! ordered sequence of rows, each with left-to-right ordered items.
//!
//! ## Pipeline
//!
//! 1. **Geometry** ([`geometry`]): angle measurement, coercion to the
//!    canonical orientations {0°, 90°, 180°, 270°}, rotation about the page
//!    center, points→centimeters conversion.
//! 2. **Angle consensus** ([`ocr`]): per-page median over per-fragment
//!    orientations, robust to a minority of misclassified fragments.
//! 3. **Coordinate unification** ([`ocr`], [`pdf`]): OCR fragments are
//!    scaled, converted to centimeters, and rotated upright; PDF fragments
//!    only get their vertical axis flipped top-down.
//! 4. **Row grouping** ([`layout`]): a deterministic fold over pages in
//!    order, stacking each page beneath the previous one so rows group
//!    across page boundaries.
//!
//! ## Quick start
//!
//! ```
//! use rowfold::layout::{group_rows, Fragment, PageFragments, RowGroupingStrategy};
//!
//! let page = PageFragments {
//!     page_number: 1,
//!     page_height: 100.0,
//!     fragments: vec![
//!         Fragment {
//!             text: "Qty".to_string(),
//!             x: 0.0, y: 0.0, width: 10.0, height: 5.0,
//!             page: 1, font_name: None, transform: None, confidence: None,
//!         },
//!         Fragment {
//!             text: "Item".to_string(),
//!             x: 20.0, y: 0.02, width: 10.0, height: 5.0,
//!             page: 1, font_name: None, transform: None, confidence: None,
//!         },
//!     ],
//! };
//!
//! let rows = group_rows(vec![page], RowGroupingStrategy::default());
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].texts(), vec!["Qty", "Item"]);
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry primitives
pub mod geometry;

// Row grouping engine
pub mod layout;

// Source adapters' page models
pub mod ocr;
pub mod pdf;

// Configuration
pub mod config;

// Re-exports
pub use config::VisionConversionConfig;
pub use error::{Error, Result};
pub use layout::{group_rows, Fragment, Row, RowGroupingStrategy};
pub use ocr::{intermediate_pages_from_batch, rows_from_intermediate_pages, BatchResponse};
pub use pdf::{rows_from_page_contents, PageDetail, PdfPageContents, PdfTextItem};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all
    /// other values, so sorting never panics on a NaN comparison.
    #[inline]
    pub fn safe_float_cmp(a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => {
                // Both are normal numbers, safe to unwrap
                a.partial_cmp(&b).unwrap()
            },
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
