//! Page model for born-digital PDF text layers.
//!
//! A PDF text run arrives with a text matrix whose translation encodes its
//! position in a bottom-left-origin space. This module maps that onto the
//! top-down axis the grouping engine expects, resolves internal font
//! identifiers through a page-local style table, and hands the result to
//! [`crate::layout::group_rows`].
//!
//! Born-digital text is assumed axis-aligned, so the PDF path performs no
//! rotation and no unit conversion; coordinates stay in points.

use std::collections::HashMap;

use crate::layout::{group_rows, Fragment, PageFragments, Row, RowGroupingStrategy};

/// One text run extracted from a PDF page, positioned in top-left-origin
/// page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfTextItem {
    /// The extracted string (may be whitespace or empty)
    pub text: String,
    /// Horizontal position in points
    pub x: f64,
    /// Vertical position in points, measured from the top of the page
    pub y: f64,
    /// Width on device
    pub width: f64,
    /// Height on device
    pub height: f64,
    /// Internal font identifier, resolved against the page's style table
    pub font_id: Option<String>,
    /// The raw text matrix `[a b c d e f]` the position was derived from
    pub transform: Option<[f64; 6]>,
}

impl PdfTextItem {
    /// Build an item from a raw PDF text matrix.
    ///
    /// The matrix translation is `(e, f)` in a bottom-left-origin space;
    /// the vertical axis is flipped by subtracting `f` from the page
    /// height so y grows downward.
    pub fn from_transform(
        text: impl Into<String>,
        transform: [f64; 6],
        width: f64,
        height: f64,
        font_id: Option<String>,
        page_height: f64,
    ) -> Self {
        Self {
            text: text.into(),
            x: transform[4],
            y: page_height - transform[5],
            width,
            height,
            font_id,
            transform: Some(transform),
        }
    }
}

/// One PDF page's extracted text content.
#[derive(Debug, Clone, Default)]
pub struct PdfPageContents {
    /// 1-based page number, unique per document
    pub page_number: u32,
    /// Page height in points (from the user-space view box)
    pub page_height: f64,
    /// Page-local style table: internal font identifier → human font name
    pub styles: HashMap<String, String>,
    /// Text runs on this page
    pub items: Vec<PdfTextItem>,
}

/// Per-page metadata returned alongside the rows.
///
/// Consumers need the font style table to interpret row items; the
/// grouping algorithm itself does not.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDetail {
    /// 1-based page number
    pub page_number: u32,
    /// Internal font identifier → human font name
    pub styles: HashMap<String, String>,
}

/// Group a document's PDF pages into ordered rows.
///
/// Font identifiers are resolved through each page's style table while the
/// page is still in scope; a missing entry leaves the fragment's font name
/// absent rather than substituting a placeholder.
pub fn rows_from_page_contents(
    pages: Vec<PdfPageContents>,
    strategy: RowGroupingStrategy,
) -> (Vec<Row>, Vec<PageDetail>) {
    let mut details: Vec<PageDetail> = pages
        .iter()
        .map(|page| PageDetail {
            page_number: page.page_number,
            styles: page.styles.clone(),
        })
        .collect();
    details.sort_by_key(|detail| detail.page_number);

    let page_fragments = pages
        .into_iter()
        .map(|page| {
            let styles = page.styles;
            let fragments = page
                .items
                .into_iter()
                .map(|item| Fragment {
                    font_name: item
                        .font_id
                        .as_ref()
                        .and_then(|id| styles.get(id))
                        .cloned(),
                    text: item.text,
                    x: item.x,
                    y: item.y,
                    width: item.width,
                    height: item.height,
                    page: page.page_number,
                    transform: item.transform,
                    confidence: None,
                })
                .collect();
            PageFragments {
                page_number: page.page_number,
                page_height: page.page_height,
                fragments,
            }
        })
        .collect();

    (group_rows(page_fragments, strategy), details)
}
