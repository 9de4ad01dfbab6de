//! Integration tests for the OCR conversion path.
//!
//! Builds cloud OCR batch payloads for the same logical table scanned at
//! 0°, 90°, 180°, and 270°, and verifies that unification and grouping
//! recover identical row/column text content from each.

use serde_json::json;

use rowfold::layout::{Row, RowGroupingStrategy};
use rowfold::ocr::{intermediate_pages_from_batch, rows_from_intermediate_pages, BatchResponse};
use rowfold::{Error, VisionConversionConfig};

// Logical (upright) page in points
const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;

// All mock words share one footprint so the min-corner box derivation
// shifts every word identically under rotation.
const WORD_WIDTH: f64 = 40.0;
const WORD_HEIGHT: f64 = 12.0;

// ============================================================================
// Payload Builders
// ============================================================================

/// Map a point from the upright page onto the scan produced by rotating the
/// paper clockwise by `rotation` degrees.
fn map_point(rotation: u32, x: f64, y: f64) -> (f64, f64) {
    match rotation {
        0 => (x, y),
        90 => (PAGE_HEIGHT - y, x),
        180 => (PAGE_WIDTH - x, PAGE_HEIGHT - y),
        270 => (y, PAGE_WIDTH - x),
        _ => panic!("unsupported rotation {rotation}"),
    }
}

/// Scan pixel size for a given rotation.
fn scan_size(rotation: u32) -> (f64, f64) {
    match rotation {
        90 | 270 => (PAGE_HEIGHT, PAGE_WIDTH),
        _ => (PAGE_WIDTH, PAGE_HEIGHT),
    }
}

/// Normalized vertices, in reading order, for an upright rect mapped onto
/// the rotated scan.
fn vertices(rotation: u32, x: f64, y: f64, width: f64, height: f64) -> serde_json::Value {
    let (scan_width, scan_height) = scan_size(rotation);
    let corners = [
        (x, y),
        (x + width, y),
        (x + width, y + height),
        (x, y + height),
    ];
    let mapped: Vec<serde_json::Value> = corners
        .iter()
        .map(|&(cx, cy)| {
            let (sx, sy) = map_point(rotation, cx, cy);
            json!({ "x": sx / scan_width, "y": sy / scan_height })
        })
        .collect();
    json!({ "normalizedVertices": mapped })
}

fn word(rotation: u32, text: &str, x: f64, y: f64) -> serde_json::Value {
    let symbols: Vec<serde_json::Value> = text
        .chars()
        .map(|c| json!({ "text": c.to_string(), "confidence": 0.95 }))
        .collect();
    json!({
        "boundingBox": vertices(rotation, x, y, WORD_WIDTH, WORD_HEIGHT),
        "symbols": symbols,
        "confidence": 0.95
    })
}

fn paragraph(rotation: u32, words: Vec<serde_json::Value>, x: f64, y: f64, width: f64) -> serde_json::Value {
    json!({
        "boundingBox": vertices(rotation, x, y, width, WORD_HEIGHT),
        "words": words,
        "confidence": 0.9
    })
}

/// One response: a 2×2 table, rows at y=100 and y=400, columns at x=72 and
/// x=300 on the upright page.
fn table_response(rotation: u32, page_number: u32) -> serde_json::Value {
    let (scan_width, scan_height) = scan_size(rotation);
    let rows = [
        (100.0, ["Alpha", "Beta"]),
        (400.0, ["Gamma", "Delta"]),
    ];
    let paragraphs: Vec<serde_json::Value> = rows
        .iter()
        .map(|&(y, texts)| {
            let words = vec![
                word(rotation, texts[0], 72.0, y),
                word(rotation, texts[1], 300.0, y),
            ];
            paragraph(rotation, words, 72.0, y, 268.0)
        })
        .collect();

    json!({
        "context": { "uri": "gs://bucket/table.pdf", "pageNumber": page_number },
        "fullTextAnnotation": {
            "text": "Alpha Beta\nGamma Delta",
            "pages": [{
                "width": scan_width,
                "height": scan_height,
                "confidence": 0.98,
                "blocks": [{
                    "blockType": "TEXT",
                    "boundingBox": vertices(rotation, 72.0, 100.0, 268.0, 312.0),
                    "paragraphs": paragraphs
                }]
            }]
        }
    })
}

fn table_batch(rotation: u32) -> BatchResponse {
    let payload = json!({ "responses": [table_response(rotation, 1)] });
    BatchResponse::from_json(&payload.to_string()).unwrap()
}

fn text_matrix(rows: &[Row]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.texts().iter().map(|s| s.to_string()).collect())
        .collect()
}

fn grouping() -> RowGroupingStrategy {
    RowGroupingStrategy::GapThreshold {
        minimum_gap: 2.0,
        maximum_break_threshold: 8.0,
    }
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_upright_batch_converts_to_two_rows() {
    init_logs();
    let batch = table_batch(0);
    let pages = intermediate_pages_from_batch(&batch, &VisionConversionConfig::default()).unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].page_number, 1);
    // 612×792pt scan converted to centimeters
    assert!((pages[0].size.width - 21.59).abs() < 1e-9);
    assert!((pages[0].size.height - 27.94).abs() < 1e-9);
    assert_eq!(pages[0].words.len(), 4);

    let rows = rows_from_intermediate_pages(pages, grouping());
    assert_eq!(
        text_matrix(&rows),
        vec![vec!["Alpha", "Beta"], vec!["Gamma", "Delta"]]
    );
}

#[test]
fn test_word_confidence_survives_to_rows() {
    let batch = table_batch(0);
    let pages = intermediate_pages_from_batch(&batch, &VisionConversionConfig::default()).unwrap();
    let rows = rows_from_intermediate_pages(pages, grouping());
    assert_eq!(rows[0].items[0].confidence, Some(0.95));
}

#[test]
fn test_sideways_scan_swaps_word_extents() {
    let batch = table_batch(90);
    let pages = intermediate_pages_from_batch(&batch, &VisionConversionConfig::default()).unwrap();

    // after the swap the words are wider than tall again
    let points_to_cm = 2.54 / 72.0;
    for word in &pages[0].words {
        assert!((word.size.width - WORD_WIDTH * points_to_cm).abs() < 1e-9);
        assert!((word.size.height - WORD_HEIGHT * points_to_cm).abs() < 1e-9);
    }
}

#[test]
fn test_responses_processed_in_page_number_order() {
    let payload = json!({
        "responses": [table_response(0, 2), table_response(0, 1)]
    });
    let batch = BatchResponse::from_json(&payload.to_string()).unwrap();
    let pages = intermediate_pages_from_batch(&batch, &VisionConversionConfig::default()).unwrap();

    assert_eq!(pages[0].page_number, 1);
    assert_eq!(pages[1].page_number, 2);

    let rows = rows_from_intermediate_pages(pages, grouping());
    assert_eq!(rows.len(), 4);
    // page 2's first row sits beneath all of page 1
    assert_eq!(rows[2].items[0].page, 2);
    assert!(rows[2].y > rows[1].y);
}

// ============================================================================
// Rotation Invariance
// ============================================================================

#[test]
fn test_rotation_invariance_of_row_content() {
    let config = VisionConversionConfig::default();
    let baseline = {
        let pages = intermediate_pages_from_batch(&table_batch(0), &config).unwrap();
        text_matrix(&rows_from_intermediate_pages(pages, grouping()))
    };
    assert_eq!(
        baseline,
        vec![vec!["Alpha", "Beta"], vec!["Gamma", "Delta"]]
    );

    for rotation in [90, 180, 270] {
        let pages = intermediate_pages_from_batch(&table_batch(rotation), &config).unwrap();
        let matrix = text_matrix(&rows_from_intermediate_pages(pages, grouping()));
        assert_eq!(matrix, baseline, "content differs at {rotation}°");
    }
}

#[test]
fn test_rotation_invariance_with_known_angle_rotation() {
    let config = VisionConversionConfig::default().with_rotate_by_known_angle(true);
    for rotation in [0, 90, 180, 270] {
        let pages = intermediate_pages_from_batch(&table_batch(rotation), &config).unwrap();
        let matrix = text_matrix(&rows_from_intermediate_pages(pages, grouping()));
        assert_eq!(
            matrix,
            vec![vec!["Alpha", "Beta"], vec!["Gamma", "Delta"]],
            "content differs at {rotation}°"
        );
    }
}

// ============================================================================
// Failure Semantics
// ============================================================================

/// A bounding box at 45°, unclassifiable within the 10° tolerance.
fn diagonal_box() -> serde_json::Value {
    json!({ "normalizedVertices": [
        {"x": 0.1, "y": 0.1}, {"x": 0.3, "y": 0.3},
        {"x": 0.25, "y": 0.35}, {"x": 0.05, "y": 0.15}
    ]})
}

#[test]
fn test_uncoercible_block_is_dropped_not_fatal() {
    init_logs();
    let mut response = table_response(0, 1);
    // append a handwriting-like block at 45°
    response["fullTextAnnotation"]["pages"][0]["blocks"]
        .as_array_mut()
        .unwrap()
        .push(json!({
            "boundingBox": diagonal_box(),
            "paragraphs": [{
                "boundingBox": diagonal_box(),
                "words": [word(0, "scrawl", 100.0, 200.0)],
                "confidence": 0.4
            }]
        }));
    let payload = json!({ "responses": [response] });
    let batch = BatchResponse::from_json(&payload.to_string()).unwrap();

    let pages = intermediate_pages_from_batch(&batch, &VisionConversionConfig::default()).unwrap();

    // the table survives, the diagonal block's words do not
    assert_eq!(pages[0].words.len(), 4);
    assert!(pages[0].words.iter().all(|w| w.text != "scrawl"));
}

#[test]
fn test_uncoercible_paragraph_is_fatal() {
    let mut response = table_response(0, 1);
    // an upright block whose paragraph is at 45°
    response["fullTextAnnotation"]["pages"][0]["blocks"]
        .as_array_mut()
        .unwrap()
        .push(json!({
            "boundingBox": vertices(0, 80.0, 500.0, 200.0, 20.0),
            "paragraphs": [{
                "boundingBox": diagonal_box(),
                "words": [word(0, "skewed", 80.0, 500.0)],
                "confidence": 0.4
            }]
        }));
    let payload = json!({ "responses": [response] });
    let batch = BatchResponse::from_json(&payload.to_string()).unwrap();

    let result = intermediate_pages_from_batch(&batch, &VisionConversionConfig::default());
    assert!(matches!(
        result,
        Err(Error::UncoercibleOrientation { .. })
    ));
}

#[test]
fn test_multiple_annotation_pages_are_fatal() {
    let mut response = table_response(0, 1);
    let extra_page = response["fullTextAnnotation"]["pages"][0].clone();
    response["fullTextAnnotation"]["pages"]
        .as_array_mut()
        .unwrap()
        .push(extra_page);
    let payload = json!({ "responses": [response] });
    let batch = BatchResponse::from_json(&payload.to_string()).unwrap();

    let result = intermediate_pages_from_batch(&batch, &VisionConversionConfig::default());
    assert!(matches!(
        result,
        Err(Error::UnsupportedPageShape { found: 2 })
    ));
}

#[test]
fn test_zero_annotation_pages_are_fatal() {
    let payload = json!({
        "responses": [{
            "context": { "pageNumber": 1 },
            "fullTextAnnotation": { "text": "", "pages": [] }
        }]
    });
    let batch = BatchResponse::from_json(&payload.to_string()).unwrap();

    let result = intermediate_pages_from_batch(&batch, &VisionConversionConfig::default());
    assert!(matches!(
        result,
        Err(Error::UnsupportedPageShape { found: 0 })
    ));
}
