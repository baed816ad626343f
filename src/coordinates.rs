//! Cylindrical and Cartesian positions anchored at the center of the arm's
//! base, and the link-vector arithmetic the chain is composed from.

use nalgebra::{Point3, Vector3};

/// A position in cylindrical coordinates: radius and height in centimeters,
/// angle in degrees. The origin is the fixed center of the arm's base; angle 0
/// points along the arm's straight-outward pose and increases counter-clockwise
/// through four 90 degree quadrants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalPosition {
    pub radius: f64,
    pub angle: f64,
    pub height: f64,
}

impl CylindricalPosition {
    pub fn new(radius: f64, angle: f64, height: f64) -> Self {
        CylindricalPosition {
            radius,
            angle,
            height,
        }
    }

    /// Converts to Cartesian coordinates.
    pub fn to_cartesian(&self) -> Point3<f64> {
        let angle = self.angle.to_radians();
        Point3::new(
            self.radius * angle.cos(),
            self.radius * angle.sin(),
            self.height,
        )
    }

    /// Converts from Cartesian coordinates, quadrant-aware: the first quadrant
    /// maps to angles 0 to 90, the second to 90 to 180, the third to 180 to
    /// 270 and the fourth to 270 to 360.
    ///
    /// At radius zero the angle is undefined; this conversion reports 0.
    pub fn from_cartesian(point: &Point3<f64>) -> Self {
        let radius = point.coords.xy().norm();
        if radius == 0.0 {
            return CylindricalPosition::new(0.0, 0.0, point.z);
        }
        let folded = (point.y / point.x).atan().to_degrees().abs();
        let angle = if point.x >= 0.0 && point.y >= 0.0 {
            folded
        } else if point.x <= 0.0 && point.y >= 0.0 {
            180.0 - folded
        } else if point.x <= 0.0 && point.y <= 0.0 {
            180.0 + folded
        } else {
            360.0 - folded
        };
        CylindricalPosition::new(radius, angle, point.z)
    }

    /// Displaces this position by a link vector from the chain's intermediate
    /// space (radial x, transient y, height z), summed by plain vector
    /// addition. The transient y component never carries a value here; the
    /// hand element step accounts for its own y offset separately.
    pub(crate) fn offset_by(&self, link: &Vector3<f64>) -> Self {
        CylindricalPosition::new(
            self.radius + link.x,
            self.angle + link.y,
            self.height + link.z,
        )
    }

    /// True when every component differs from `other` by at most `tolerance`
    /// (absolute: radius and height in centimeters, angle in degrees).
    pub fn within(&self, other: &CylindricalPosition, tolerance: f64) -> bool {
        (self.radius - other.radius).abs() <= tolerance
            && (self.angle - other.angle).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}
