//! Configuration for OCR batch conversion.

use crate::geometry::rotation::ANGLE_EPSILON_DEGREES;

/// Conversion configuration for the OCR path.
#[derive(Debug, Clone)]
pub struct VisionConversionConfig {
    /// Rotate by the page's median known angle rather than its median
    /// continuous angle.
    pub rotate_by_known_angle: bool,

    /// Tolerance, in degrees, when coercing measured angles to the
    /// canonical orientations.
    pub angle_epsilon: f64,

    /// Words whose confidence falls below this threshold are logged.
    pub low_confidence_threshold: f64,
}

impl Default for VisionConversionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl VisionConversionConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            rotate_by_known_angle: false,
            angle_epsilon: ANGLE_EPSILON_DEGREES,
            low_confidence_threshold: 0.6,
        }
    }

    /// Rotate by the median known angle instead of the median continuous
    /// angle.
    pub fn with_rotate_by_known_angle(mut self, enable: bool) -> Self {
        self.rotate_by_known_angle = enable;
        self
    }

    /// Set the angle coercion tolerance in degrees.
    pub fn with_angle_epsilon(mut self, epsilon: f64) -> Self {
        self.angle_epsilon = epsilon;
        self
    }

    /// Set the confidence threshold below which words are logged.
    pub fn with_low_confidence_threshold(mut self, threshold: f64) -> Self {
        self.low_confidence_threshold = threshold;
        self
    }
}
