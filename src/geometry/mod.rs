//! Geometric primitives for layout reconstruction.
//!
//! This module provides the basic geometric types shared by the coordinate
//! unifier and the row grouping engine, plus the angle and unit-conversion
//! helpers in the [`rotation`] and [`units`] submodules.

pub mod rotation;
pub mod units;

pub use rotation::{
    angle_of_top_edge, coerce_known_angle, rotate_point, world_coordinate_shift, BoundingBox,
    KnownAngle,
};
pub use units::{convert_size_to_cm, convert_vector_to_cm, points_to_centimeters};

/// A 2D point in page space.
///
/// The origin is the top-left corner of the page; y increases downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowfold::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in a single consistent unit.
///
/// Points for the PDF path, centimeters for the OCR path after conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    /// Width of the page or box
    pub width: f64,
    /// Height of the page or box
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Return the size with width and height exchanged.
    ///
    /// Used when a fragment's reading direction is rotated 90° or 270°
    /// relative to the page.
    pub fn swapped(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(p.x, 10.0);
        assert_eq!(p.y, 20.0);
    }

    #[test]
    fn test_size_swapped() {
        let s = Size::new(21.0, 29.7);
        let t = s.swapped();
        assert_eq!(t.width, 29.7);
        assert_eq!(t.height, 21.0);
        assert_eq!(t.swapped(), s);
    }
}
