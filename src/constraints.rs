use crate::kinematic_traits::Joints;
use crate::kinematics_error::KinematicsError;

/// Declared travel ranges of the joints, in integer degrees. The base is
/// unconstrained (the turntable rotates freely through its logical 0-360
/// domain). The wrist tilt has no direct range of its own; it is constrained
/// through the derived conglomerate wrist angle instead.
#[derive(Debug, Clone)]
pub struct Constraints {
    pub bicep: (i32, i32),
    pub forearm: (i32, i32),
    pub wrist_rotate: (i32, i32),

    /// Window for the derived conglomerate wrist angle (inherent offset +
    /// wrist tilt + forearm + forearm offset), in degrees.
    pub conglomerate_wrist: (f64, f64),
}

impl Default for Constraints {
    fn default() -> Self {
        Constraints {
            bicep: (0, 270),
            forearm: (0, 180),
            wrist_rotate: (0, 180),
            conglomerate_wrist: (90.0, 360.0),
        }
    }
}

impl Constraints {
    /// Checks one joint against its range, reporting the offending joint by
    /// name on failure.
    fn check_joint(
        joint: &'static str,
        value: i32,
        (min, max): (i32, i32),
    ) -> Result<(), KinematicsError> {
        if value < min || value > max {
            return Err(KinematicsError::JointOutOfRange {
                joint,
                value,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Validates the joints and the derived conglomerate wrist angle,
    /// failing fast on the first violation.
    pub fn check(
        &self,
        joints: &Joints,
        conglomerate_wrist: f64,
    ) -> Result<(), KinematicsError> {
        Self::check_joint("bicep", joints[1], self.bicep)?;
        Self::check_joint("forearm", joints[2], self.forearm)?;
        Self::check_joint("wrist rotate", joints[4], self.wrist_rotate)?;

        let (min, max) = self.conglomerate_wrist;
        if conglomerate_wrist < min || conglomerate_wrist > max {
            return Err(KinematicsError::WristAngleOutOfRange {
                angle: conglomerate_wrist,
                min,
                max,
            });
        }
        Ok(())
    }

    /// True when the joints comply with all ranges.
    pub fn compliant(&self, joints: &Joints, conglomerate_wrist: f64) -> bool {
        self.check(joints, conglomerate_wrist).is_ok()
    }
}
