//! OCR coordinate unification and the intermediate page format.
//!
//! Converts a raw OCR batch into per-page word lists the row grouping
//! engine can consume: normalized vertices are scaled to pixel space,
//! converted to centimeters, and rotated by the page's consensus angle so
//! that a scanned-sideways page reads like an upright one.
//!
//! The block/paragraph hierarchy is flattened; it is not needed for row
//! extraction.
//!
//! Orientation failures are handled asymmetrically, matching observed
//! production behavior: a text block whose angle cannot be coerced (for
//! example handwriting at 58°) is dropped from the page with a warning,
//! while a paragraph in the same condition aborts the conversion. The
//! inconsistency is unverified against real documents; both paths are kept
//! as-is rather than silently unified.

use log::{debug, warn};

use crate::config::VisionConversionConfig;
use crate::error::{Error, Result};
use crate::geometry::{
    angle_of_top_edge, coerce_known_angle, convert_size_to_cm, convert_vector_to_cm, rotate_point,
    world_coordinate_shift, BoundingBox, KnownAngle, Point, Size,
};
use crate::layout::{group_rows, Fragment, PageFragments, Row, RowGroupingStrategy};
use crate::ocr::vision::BatchResponse;

/// One OCR word in page space: top-left position and size in centimeters.
#[derive(Debug, Clone, PartialEq)]
pub struct IntermediateWord {
    /// Top-left corner, centimeters from the page's top-left
    pub top_left: Point,
    /// Word extent in centimeters
    pub size: Size,
    /// The word's text, assembled from its symbols
    pub text: String,
    /// The containing paragraph's coerced orientation
    pub known_angle: KnownAngle,
    /// The containing paragraph's continuous angle in degrees
    pub angle: f64,
    /// Recognition confidence, in `[0, 1]`
    pub confidence: f64,
}

/// One page of OCR output, unified into centimeter page space.
#[derive(Debug, Clone)]
pub struct IntermediatePage {
    /// 1-based page number within the original document
    pub page_number: u32,
    /// Page size in centimeters
    pub size: Size,
    /// Words on this page
    pub words: Vec<IntermediateWord>,
}

/// A geometric node scaled from normalized vertices to pixel space.
#[derive(Debug, Clone, Copy)]
struct PixelBoundingBox {
    top_left: Point,
    size: Size,
}

/// Scale a node's normalized vertices by the page pixel size.
///
/// The top-left is the componentwise minimum over all four vertices; the
/// size is taken from the top-left → bottom-right diagonal.
fn pixel_bounding_box(bounding_box: &BoundingBox, page_size: Size) -> PixelBoundingBox {
    let [v0, _, v2, _] = bounding_box.vertices;
    let min_x = bounding_box
        .vertices
        .iter()
        .map(|v| v.x)
        .fold(f64::INFINITY, f64::min);
    let min_y = bounding_box
        .vertices
        .iter()
        .map(|v| v.y)
        .fold(f64::INFINITY, f64::min);

    PixelBoundingBox {
        top_left: Point {
            x: min_x * page_size.width,
            y: min_y * page_size.height,
        },
        size: Size {
            width: ((v0.x - v2.x) * page_size.width).abs(),
            height: ((v0.y - v2.y) * page_size.height).abs(),
        },
    }
}

/// Median of a list of values: the middle element, or the mean of the two
/// middle elements for an even count. `None` for an empty list.
fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let middle = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[middle - 1] + values[middle]) / 2.0)
    } else {
        Some(values[middle])
    }
}

/// The dominant rotation of one page, aggregated from its words.
///
/// Medians rather than means, so a minority of misclassified fragments
/// cannot drag the page angle off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageAngleConsensus {
    /// Median of the words' coerced angles, in degrees. Can fall between
    /// canonical orientations when the count is even.
    pub known_angle_degrees: f64,
    /// Median of the words' continuous angles, in degrees
    pub continuous_degrees: f64,
    /// Fraction of words whose coerced angle equals the median. Diagnostic
    /// only; it never gates whether rotation is applied.
    pub match_ratio: f64,
}

impl PageAngleConsensus {
    /// Aggregate the consensus over a page's surviving words.
    pub fn from_words(words: &[IntermediateWord]) -> Option<Self> {
        let known_angle_degrees = median(words.iter().map(|w| w.known_angle.degrees()).collect())?;
        let continuous_degrees = median(words.iter().map(|w| w.angle).collect())?;
        let matching = words
            .iter()
            .filter(|w| w.known_angle.degrees() == known_angle_degrees)
            .count();
        Some(Self {
            known_angle_degrees,
            continuous_degrees,
            match_ratio: matching as f64 / words.len() as f64,
        })
    }

    /// The canonical orientation closest to the median coerced angle.
    pub fn known_angle(&self) -> KnownAngle {
        KnownAngle::nearest(self.known_angle_degrees)
    }
}

/// Convert an OCR batch into intermediate pages, unified into centimeter
/// page space.
///
/// Responses are processed in ascending page-number order. Per response:
/// every word's box is scaled to pixels, converted to centimeters, and —
/// after computing the page's angle consensus — rotated about the page
/// center by the median angle (continuous or coerced, per
/// [`VisionConversionConfig::rotate_by_known_angle`]), with the
/// angle-appropriate world shift. Words whose own orientation swaps the
/// page axes get width and height exchanged. Rotation is applied
/// unconditionally, regardless of how dominant the consensus angle is.
///
/// # Errors
///
/// * [`Error::UnsupportedPageShape`] when a response does not contain
///   exactly one annotation page.
/// * [`Error::UncoercibleOrientation`] when a paragraph's angle matches no
///   known orientation.
/// * [`Error::GeometryInconsistency`] on an internally inconsistent angle.
pub fn intermediate_pages_from_batch(
    batch: &BatchResponse,
    config: &VisionConversionConfig,
) -> Result<Vec<IntermediatePage>> {
    let mut responses: Vec<_> = batch.responses.iter().collect();
    responses.sort_by_key(|response| response.context.page_number);

    let mut pages = Vec::with_capacity(responses.len());

    for response in responses {
        let page_number = response.context.page_number;
        let annotation_pages = &response.full_text_annotation.pages;
        if annotation_pages.len() != 1 {
            return Err(Error::UnsupportedPageShape {
                found: annotation_pages.len(),
            });
        }
        let page = &annotation_pages[0];
        let page_pixel_size = Size::new(page.width, page.height);

        let mut words: Vec<IntermediateWord> = Vec::new();

        for block in &page.blocks {
            let block_box = block.bounding_box.to_bounding_box()?;
            let block_known_angle = coerce_known_angle(&block_box, config.angle_epsilon)?;
            if block_known_angle.is_none() {
                // may be handwriting at an arbitrary slant
                warn!(
                    "page {}: dropping block at {:.2}°, no known orientation",
                    page_number,
                    angle_of_top_edge(&block_box)
                );
                continue;
            }

            for paragraph in &block.paragraphs {
                let paragraph_box = paragraph.bounding_box.to_bounding_box()?;
                let paragraph_angle = angle_of_top_edge(&paragraph_box);
                let paragraph_known_angle =
                    coerce_known_angle(&paragraph_box, config.angle_epsilon)?.ok_or(
                        Error::UncoercibleOrientation {
                            angle: paragraph_angle,
                        },
                    )?;

                for word in &paragraph.words {
                    let text = word.text();
                    if word.confidence < config.low_confidence_threshold {
                        debug!(
                            "page {}: '{}' low confidence {:.2}",
                            page_number, text, word.confidence
                        );
                    }

                    let pixel_box = pixel_bounding_box(
                        &word.bounding_box.to_bounding_box()?,
                        page_pixel_size,
                    );
                    words.push(IntermediateWord {
                        top_left: convert_vector_to_cm(pixel_box.top_left),
                        size: convert_size_to_cm(pixel_box.size),
                        text,
                        known_angle: paragraph_known_angle,
                        angle: paragraph_angle,
                        confidence: word.confidence,
                    });
                }
            }
        }

        let page_size = convert_size_to_cm(page_pixel_size);

        if let Some(consensus) = PageAngleConsensus::from_words(&words) {
            debug!(
                "page {}: consensus {}° (continuous {:.2}°) for {:.1}% of {} words",
                page_number,
                consensus.known_angle().degrees(),
                consensus.continuous_degrees,
                consensus.match_ratio * 100.0,
                words.len()
            );

            let rotation_degrees = if config.rotate_by_known_angle {
                consensus.known_angle_degrees
            } else {
                consensus.continuous_degrees
            };
            let world_shift = world_coordinate_shift(consensus.known_angle(), page_size);

            for word in &mut words {
                word.top_left = rotate_point(word.top_left, rotation_degrees, page_size, world_shift);
                if word.known_angle.swaps_axes() {
                    word.size = word.size.swapped();
                }
            }
        } else {
            debug!("page {}: no surviving words, skipping rotation", page_number);
        }

        pages.push(IntermediatePage {
            page_number,
            size: page_size,
            words,
        });
    }

    Ok(pages)
}

/// Group a document's intermediate OCR pages into ordered rows.
pub fn rows_from_intermediate_pages(
    pages: Vec<IntermediatePage>,
    strategy: RowGroupingStrategy,
) -> Vec<Row> {
    let page_fragments = pages
        .into_iter()
        .map(|page| PageFragments {
            page_number: page.page_number,
            page_height: page.size.height,
            fragments: page
                .words
                .into_iter()
                .map(|word| Fragment {
                    text: word.text,
                    x: word.top_left.x,
                    y: word.top_left.y,
                    width: word.size.width,
                    height: word.size.height,
                    page: page.page_number,
                    font_name: None,
                    transform: None,
                    confidence: Some(word.confidence),
                })
                .collect(),
        })
        .collect();

    group_rows(page_fragments, strategy)
}
