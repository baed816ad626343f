//! Error handling for the kinematic chain and the object localizer.

use std::fmt;

/// Unified error for geometry that cannot be computed: joint values outside
/// the declared servo ranges, derived wrist angles outside the mechanically
/// possible window, and degenerate sensing-axis configurations.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    JointOutOfRange {
        joint: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    WristAngleOutOfRange {
        angle: f64,
        min: f64,
        max: f64,
    },
    DegenerateGeometry(String),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KinematicsError::JointOutOfRange {
                joint,
                value,
                min,
                max,
            } => write!(
                f,
                "Joint out of range: {} = {} not in [{}, {}]",
                joint, value, min, max
            ),
            KinematicsError::WristAngleOutOfRange { angle, min, max } => write!(
                f,
                "Conglomerate wrist angle out of range: {:.2} not in [{}, {}]",
                angle, min, max
            ),
            KinematicsError::DegenerateGeometry(ref msg) => {
                write!(f, "Degenerate geometry: {}", msg)
            }
        }
    }
}

impl std::error::Error for KinematicsError {}
