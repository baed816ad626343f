//! Defines the kinematic seam of the crate: joint types, hand elements and
//! the `Kinematics` trait implemented by the chain.

use crate::coordinates::CylindricalPosition;
use crate::kinematics_error::KinematicsError;

/// Positions of the five servos in integer degrees: base rotation, bicep,
/// forearm, wrist tilt (up/down) and wrist rotate (left/right). The physical
/// servos accept integer positions only, so the whole crate works on the
/// integer degree lattice.
pub type Joints = [i32; 5];

/// The searched subset of the joints: base rotation, bicep, forearm.
pub type ArmAngles = [i32; 3];

/// The wrist joints held fixed during the search: tilt, rotate.
pub type WristAngles = [i32; 2];

pub const JOINTS_AT_ZERO: Joints = [0; 5];

/// Indices into [Joints].
pub const J_BASE: usize = 0;
pub const J_BICEP: usize = 1;
pub const J_FOREARM: usize = 2;
pub const J_WRIST_TILT: usize = 3;
pub const J_WRIST_ROTATE: usize = 4;

/// Reference points on the rigid wrist extension. The three variants share the
/// same chain up to the wrist and diverge only in the final middle-wrist and
/// lower-wrist link lengths (see `Parameters::wrist_extension`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandElement {
    /// Center of the gripper jaws.
    Gripper,
    /// Tip of the wrist-mounted distance sensor.
    DistanceSensor,
    /// A reference point one unit behind the sensor on its sensing axis,
    /// used to recover the orientation of that axis.
    PointBehindSensor,
}

pub trait Kinematics: Send + Sync {
    /// Maps joint angles to the cylindrical position of the chosen hand
    /// element. Inputs outside the declared joint ranges are rejected with
    /// [KinematicsError::JointOutOfRange] rather than producing geometrically
    /// meaningless output.
    fn forward(
        &self,
        joints: &Joints,
        element: HandElement,
    ) -> Result<CylindricalPosition, KinematicsError>;

    /// Finds joint angles that bring the gripper center within the search
    /// tolerance of the requested position, or `None` when the position is
    /// not reachable. `None` is an expected, frequent outcome, not a fault.
    ///
    /// The base rotation is not searched; it is set to the requested angle.
    /// The wrist angles are held at the given fixed values.
    fn inverse(
        &self,
        requested: &CylindricalPosition,
        initial_arm: &ArmAngles,
        fixed_wrist: &WristAngles,
    ) -> Option<Joints>;

    /// The maximum radius the gripper can reach, in centimeters. Used as a
    /// feasibility pre-check before searching.
    fn maximum_reachable_radius(&self) -> f64;
}
