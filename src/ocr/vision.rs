//! Wire model for cloud OCR batch responses.
//!
//! Mirrors the service's JSON shape: a batch holds one response per scanned
//! page, each with a page-number context and a full-text annotation of
//! blocks → paragraphs → words → symbols. Every geometric node carries four
//! normalized vertices relative to page pixel size.
//!
//! The service omits zero-valued vertex components, so both coordinates
//! default when absent.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Point};

/// A whole OCR batch: one response per scanned page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    /// Per-page responses, not necessarily in page order
    #[serde(default)]
    pub responses: Vec<PageResponse>,
}

impl BatchResponse {
    /// Parse a batch response from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One page's OCR result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    /// The recognized text structure for this page
    pub full_text_annotation: FullTextAnnotation,
    /// Which page of the original document this response covers
    pub context: PageContext,
}

/// Identifies the source page of a response.
///
/// Batches span 20 pages per JSON file; the page number here accounts for
/// that spanning.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Source document URI
    #[serde(default)]
    pub uri: Option<String>,
    /// 1-based page number within the original document
    pub page_number: u32,
}

/// The structured text recognized on one page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullTextAnnotation {
    /// Logical sub-pages; exactly one is expected per response
    #[serde(default)]
    pub pages: Vec<AnnotationPage>,
    /// The page's full text, concatenated by the service
    #[serde(default)]
    pub text: String,
}

/// One logical sub-page of a full-text annotation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationPage {
    /// Text, image, and ruler blocks on the page
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Page width: points for PDFs, pixels for images
    pub width: f64,
    /// Page height: points for PDFs, pixels for images
    pub height: f64,
    /// OCR confidence for the whole page, in `[0, 1]`
    #[serde(default)]
    pub confidence: f64,
}

/// A logical element on the page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// The block's outline in normalized vertices
    pub bounding_box: VertexBox,
    /// Paragraphs, when this is a text block
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    /// Detected block type (TEXT, TABLE, PICTURE, ...)
    #[serde(default)]
    pub block_type: Option<String>,
    /// Recognition confidence, in `[0, 1]`
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// A run of words in a certain order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// The paragraph's outline in normalized vertices
    pub bounding_box: VertexBox,
    /// Words in natural reading order
    #[serde(default)]
    pub words: Vec<Word>,
    /// Recognition confidence, in `[0, 1]`
    #[serde(default)]
    pub confidence: f64,
}

/// One recognized word.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// The word's outline in normalized vertices
    pub bounding_box: VertexBox,
    /// Symbols in natural reading order
    #[serde(default)]
    pub symbols: Vec<Symbol>,
    /// Recognition confidence, in `[0, 1]`
    #[serde(default)]
    pub confidence: f64,
}

impl Word {
    /// The word's text, assembled from its symbols.
    pub fn text(&self) -> String {
        self.symbols.iter().map(|s| s.text.as_str()).collect()
    }
}

/// One recognized symbol (roughly a character).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    /// UTF-8 representation of the symbol
    pub text: String,
    /// Recognition confidence, in `[0, 1]`
    #[serde(default)]
    pub confidence: f64,
}

/// A bounding polygon of normalized vertices in `[0, 1]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexBox {
    /// Corners in natural reading order: top-left, top-right, bottom-right,
    /// bottom-left
    #[serde(default)]
    pub normalized_vertices: Vec<NormalizedVertex>,
}

impl VertexBox {
    /// Convert to a geometric bounding box.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPayload`] when the polygon does not have exactly
    /// four vertices.
    pub fn to_bounding_box(&self) -> Result<BoundingBox> {
        if self.normalized_vertices.len() != 4 {
            return Err(Error::InvalidPayload(format!(
                "expected 4 normalized vertices, found {}",
                self.normalized_vertices.len()
            )));
        }
        let v = &self.normalized_vertices;
        Ok(BoundingBox::new([
            Point::new(v[0].x, v[0].y),
            Point::new(v[1].x, v[1].y),
            Point::new(v[2].x, v[2].y),
            Point::new(v[3].x, v[3].y),
        ]))
    }
}

/// A 2D point as a fraction of page width/height.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NormalizedVertex {
    /// Fraction of page width; omitted by the service when zero
    #[serde(default)]
    pub x: f64,
    /// Fraction of page height; omitted by the service when zero
    #[serde(default)]
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_batch() {
        let json = r#"{
            "responses": [{
                "context": { "uri": "gs://bucket/doc.pdf", "pageNumber": 1 },
                "fullTextAnnotation": {
                    "text": "Hi",
                    "pages": [{
                        "width": 612, "height": 792, "confidence": 0.98,
                        "blocks": [{
                            "blockType": "TEXT",
                            "boundingBox": { "normalizedVertices": [
                                {"x": 0.1, "y": 0.1}, {"x": 0.3, "y": 0.1},
                                {"x": 0.3, "y": 0.2}, {"x": 0.1, "y": 0.2}
                            ]},
                            "paragraphs": [{
                                "confidence": 0.97,
                                "boundingBox": { "normalizedVertices": [
                                    {"x": 0.1, "y": 0.1}, {"x": 0.3, "y": 0.1},
                                    {"x": 0.3, "y": 0.2}, {"x": 0.1, "y": 0.2}
                                ]},
                                "words": [{
                                    "confidence": 0.96,
                                    "boundingBox": { "normalizedVertices": [
                                        {"x": 0.1, "y": 0.1}, {"x": 0.3, "y": 0.1},
                                        {"x": 0.3, "y": 0.2}, {"x": 0.1, "y": 0.2}
                                    ]},
                                    "symbols": [
                                        {"text": "H", "confidence": 0.99},
                                        {"text": "i", "confidence": 0.93}
                                    ]
                                }]
                            }]
                        }]
                    }]
                }
            }]
        }"#;

        let batch = BatchResponse::from_json(json).unwrap();
        assert_eq!(batch.responses.len(), 1);
        let response = &batch.responses[0];
        assert_eq!(response.context.page_number, 1);
        let page = &response.full_text_annotation.pages[0];
        assert_eq!(page.width, 612.0);
        let word = &page.blocks[0].paragraphs[0].words[0];
        assert_eq!(word.text(), "Hi");
        assert!((word.confidence - 0.96).abs() < 1e-9);
    }

    #[test]
    fn test_omitted_vertex_components_default_to_zero() {
        // the service drops zero-valued coordinates entirely
        let json = r#"{ "normalizedVertices": [
            {}, {"x": 0.5}, {"x": 0.5, "y": 0.1}, {"y": 0.1}
        ]}"#;
        let vertex_box: VertexBox = serde_json::from_str(json).unwrap();
        let bbox = vertex_box.to_bounding_box().unwrap();
        assert_eq!(bbox.vertices[0].x, 0.0);
        assert_eq!(bbox.vertices[0].y, 0.0);
        assert_eq!(bbox.vertices[1].x, 0.5);
        assert_eq!(bbox.vertices[3].y, 0.1);
    }

    #[test]
    fn test_wrong_vertex_count_is_invalid_payload() {
        let json = r#"{ "normalizedVertices": [ {"x": 0.1, "y": 0.1} ]}"#;
        let vertex_box: VertexBox = serde_json::from_str(json).unwrap();
        assert!(vertex_box.to_bounding_box().is_err());
    }
}
