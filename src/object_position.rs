//! Localizes a sensed object in the arm's cylindrical coordinate system from
//! a single distance reading and the pose of the distance sensor itself.
//!
//! The sensing axis cannot be read from any joint directly; it is recovered
//! by localizing two points on it (the sensor tip and the reference point
//! one centimeter behind it) and taking the vector between them. The scalar
//! reading is then projected along that axis from the sensor tip outward.

use nalgebra::Vector3;

use crate::coordinates::CylindricalPosition;
use crate::kinematic_traits::{HandElement, Joints, Kinematics};
use crate::kinematics_error::KinematicsError;

/// Below this extent the sensing axis carries no usable direction and the
/// projection would divide by zero.
const MIN_AXIS_EXTENT: f64 = 1e-9;

/// Computes the cylindrical position of the object the distance sensor is
/// reading, given the joint configuration and the reading in centimeters.
///
/// Fails with [KinematicsError::DegenerateGeometry] when the two axis
/// reference points coincide, or coincide in the horizontal plane (a purely
/// vertical axis leaves the horizontal heading undefined).
pub fn localize_object(
    kinematics: &dyn Kinematics,
    joints: &Joints,
    distance_reading: f64,
) -> Result<CylindricalPosition, KinematicsError> {
    let sensor = kinematics
        .forward(joints, HandElement::DistanceSensor)?
        .to_cartesian();
    let behind = kinematics
        .forward(joints, HandElement::PointBehindSensor)?
        .to_cartesian();

    let axis = sensor - behind;
    let axis_length = axis.norm();
    let horizontal_extent = axis.xy().norm();

    if axis_length < MIN_AXIS_EXTENT {
        return Err(KinematicsError::DegenerateGeometry(
            "sensing axis reference points coincide".to_string(),
        ));
    }
    if horizontal_extent < MIN_AXIS_EXTENT {
        return Err(KinematicsError::DegenerateGeometry(
            "sensing axis is vertical, horizontal heading undefined".to_string(),
        ));
    }

    // Pitch against the horizontal plane and yaw within it, both recovered
    // from the axis extents; the reading is projected through both.
    let pitch = (axis.z.abs() / axis_length).asin();
    let yaw = (axis.y.abs() / horizontal_extent).asin();
    let horizontal_reach = distance_reading * pitch.cos();

    // Signs follow the direction from the point behind the sensor toward the
    // sensor tip: the object lies further out along the same axis.
    let to_object = Vector3::new(
        if axis.x > 0.0 {
            horizontal_reach * yaw.cos()
        } else {
            -horizontal_reach * yaw.cos()
        },
        if axis.y > 0.0 {
            horizontal_reach * yaw.sin()
        } else {
            -horizontal_reach * yaw.sin()
        },
        if axis.z > 0.0 {
            distance_reading * pitch.sin()
        } else {
            -distance_reading * pitch.sin()
        },
    );

    Ok(CylindricalPosition::from_cartesian(&(sensor + to_object)))
}
