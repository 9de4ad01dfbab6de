//! Angle measurement, orientation coercion, and page-centered rotation.
//!
//! OCR sources report each text node as four vertices in natural reading
//! order; the vector between the first two is the node's top edge and its
//! direction encodes how the node (and usually the whole page) is rotated.
//! These helpers measure that angle, coerce it to one of the four canonical
//! orientations, and undo the rotation about the page's center.

use crate::error::{Error, Result};
use crate::geometry::{Point, Size};

/// Tolerance, in degrees, when coercing a measured angle to a canonical
/// orientation. Some OCR output is off by as much as 8°.
pub const ANGLE_EPSILON_DEGREES: f64 = 10.0;

/// A quadrilateral described by four vertices in natural reading order:
/// top-left, top-right, bottom-right, bottom-left.
///
/// When the text is rotated, the vertex order is preserved relative to the
/// reading direction, so the positions themselves reveal the rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Vertices in `[top-left, top-right, bottom-right, bottom-left]` order.
    pub vertices: [Point; 4],
}

impl BoundingBox {
    /// Create a bounding box from four vertices in natural reading order.
    pub fn new(vertices: [Point; 4]) -> Self {
        Self { vertices }
    }

    /// The vector from the first vertex to the second (the top edge in the
    /// reading direction).
    fn top_edge(&self) -> (f64, f64) {
        let [top_left, top_right, _, _] = self.vertices;
        (top_right.x - top_left.x, top_right.y - top_left.y)
    }
}

/// One of the four canonical page/paragraph orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownAngle {
    /// Upright text
    Deg0,
    /// Rotated 90° clockwise
    Deg90,
    /// Upside down
    Deg180,
    /// Rotated 270° clockwise
    Deg270,
}

impl KnownAngle {
    /// All known angles, in ascending order.
    pub const ALL: [KnownAngle; 4] = [
        KnownAngle::Deg0,
        KnownAngle::Deg90,
        KnownAngle::Deg180,
        KnownAngle::Deg270,
    ];

    /// The angle in degrees.
    pub fn degrees(&self) -> f64 {
        match self {
            KnownAngle::Deg0 => 0.0,
            KnownAngle::Deg90 => 90.0,
            KnownAngle::Deg180 => 180.0,
            KnownAngle::Deg270 => 270.0,
        }
    }

    /// Whether content at this orientation has its width and height
    /// effectively exchanged relative to the page.
    pub fn swaps_axes(&self) -> bool {
        matches!(self, KnownAngle::Deg90 | KnownAngle::Deg270)
    }

    /// The known angle closest to `degrees` (ties resolve to the lower
    /// angle). `degrees` is interpreted modulo 360.
    pub fn nearest(degrees: f64) -> KnownAngle {
        let folded = degrees.rem_euclid(360.0);
        let mut best = KnownAngle::Deg0;
        let mut best_distance = f64::INFINITY;
        for candidate in KnownAngle::ALL {
            // 360° is the same orientation as 0°
            let distance = (folded - candidate.degrees())
                .abs()
                .min((folded - candidate.degrees() - 360.0).abs());
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }
}

/// Continuous angle, in degrees, of the bounding box's top edge.
///
/// `atan2(dy, dx)` of the vector from the first vertex to the second,
/// unbounded sign, no canonicalization. Range `(-180, 180]`.
pub fn angle_of_top_edge(bounding_box: &BoundingBox) -> f64 {
    let (dx, dy) = bounding_box.top_edge();
    dy.atan2(dx).to_degrees()
}

/// Coerce the bounding box's measured angle to a known orientation.
///
/// Angles below `90 − epsilon` are shifted by +360 so the whole range folds
/// into a `[0, 360)` representation comparable against {0, 90, 180, 270}.
/// Returns `None` when the angle is not within `epsilon` of any known
/// orientation (handwriting at an arbitrary slant, for example).
///
/// # Errors
///
/// [`Error::GeometryInconsistency`] if the folded angle is negative beyond
/// tolerance — an internal consistency check that cannot trip for valid
/// vertex data.
///
/// # Examples
///
/// ```
/// use rowfold::geometry::{coerce_known_angle, BoundingBox, KnownAngle, Point};
///
/// // Horizontal top edge, reading left to right: upright text.
/// let horizontal = BoundingBox::new([
///     Point::new(0.1, 0.1),
///     Point::new(0.9, 0.1),
///     Point::new(0.9, 0.2),
///     Point::new(0.1, 0.2),
/// ]);
/// assert_eq!(
///     coerce_known_angle(&horizontal, 10.0).unwrap(),
///     Some(KnownAngle::Deg0)
/// );
/// ```
pub fn coerce_known_angle(
    bounding_box: &BoundingBox,
    epsilon: f64,
) -> Result<Option<KnownAngle>> {
    let mut theta = angle_of_top_edge(bounding_box); // range (-180, 180]

    if theta < 90.0 - epsilon {
        theta += 360.0; // fold into [0, 360)
    }

    if theta < -epsilon {
        return Err(Error::GeometryInconsistency {
            angle: theta,
            epsilon,
        });
    }

    for known in KnownAngle::ALL {
        if (theta - known.degrees()).abs() < epsilon {
            return Ok(Some(known));
        }
    }

    // e.g. 359.6° wraps back around to upright
    if (theta - 360.0).abs() <= epsilon {
        return Ok(Some(KnownAngle::Deg0));
    }

    Ok(None)
}

/// Rotate `point` clockwise by `angle_degrees` around the page's center,
/// then apply `world_shift`.
///
/// The pivot is `(width/2, height/2)` with each component rounded to one
/// decimal place. Clockwise rotation uses the negated angle in the standard
/// counter-clockwise rotation matrix.
pub fn rotate_point(point: Point, angle_degrees: f64, page_size: Size, world_shift: Point) -> Point {
    // -ve for clockwise
    let angle_radians = (-angle_degrees).to_radians();

    let pivot = Point {
        x: (page_size.width / 2.0 * 10.0).round() / 10.0,
        y: (page_size.height / 2.0 * 10.0).round() / 10.0,
    };

    let from_origin = Point {
        x: point.x - pivot.x,
        y: point.y - pivot.y,
    };

    // [x'] = [cosθ -sinθ][x]
    // [y']   [sinθ  cosθ][y]
    let (sin, cos) = angle_radians.sin_cos();
    let rotated = Point {
        x: cos * from_origin.x - sin * from_origin.y,
        y: sin * from_origin.x + cos * from_origin.y,
    };

    Point {
        x: rotated.x + pivot.x + world_shift.x,
        y: rotated.y + pivot.y + world_shift.y,
    }
}

/// Translation that re-centers rotated content within the original page
/// footprint.
///
/// At 90° or 270° the page's effective width and height are exchanged, so
/// without this shift rotated content lands partly off-canvas.
pub fn world_coordinate_shift(known_angle: KnownAngle, page_size: Size) -> Point {
    if known_angle.swaps_axes() {
        Point {
            x: (page_size.width - page_size.height) / -2.0,
            y: (page_size.height - page_size.width) / -2.0,
        }
    } else {
        Point { x: 0.0, y: 0.0 }
    }
}
