//! Unit conversion between typographic points and centimeters.
//!
//! The OCR path works in centimeters: break thresholds expressed in cm are
//! easy to verify against a physical printout. The PDF path stays in points.

use crate::geometry::{Point, Size};

/// Convert typographic points to centimeters.
///
/// Each point is 1/72 of an inch, and an inch is 2.54 cm.
///
/// # Examples
///
/// ```
/// use rowfold::geometry::points_to_centimeters;
///
/// assert!((points_to_centimeters(72.0) - 2.54).abs() < 1e-12);
/// ```
pub fn points_to_centimeters(points: f64) -> f64 {
    points * (1.0 / 72.0) * 2.54
}

/// Convert both dimensions of a size from points to centimeters.
pub fn convert_size_to_cm(size: Size) -> Size {
    Size {
        width: points_to_centimeters(size.width),
        height: points_to_centimeters(size.height),
    }
}

/// Convert both components of a point from points to centimeters.
pub fn convert_vector_to_cm(vector: Point) -> Point {
    Point {
        x: points_to_centimeters(vector.x),
        y: points_to_centimeters(vector.y),
    }
}
