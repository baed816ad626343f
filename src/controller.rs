//! One decision step of the autonomous grasp loop: steer the wrist toward the
//! chosen detection, localize it, search for a reaching configuration and
//! encode the grab.
//!
//! The surrounding process runs two long-lived tasks: the camera poll loop
//! publishing [crate::snapshot::DetectionSnapshot]s and the loop driving this
//! controller. The controller itself is synchronous and single-flight: a step
//! runs to completion before the next one may start, and while a command is
//! executing on the physical arm, detections are ignored for a cooldown
//! period instead of piling up.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::detection::wrist_correction;
use crate::kinematic_traits::{Joints, Kinematics, J_WRIST_ROTATE, J_WRIST_TILT};
use crate::motion;
use crate::object_position::localize_object;
use crate::snapshot::DetectionSnapshot;

/// What the loop is currently doing. Scanning consumes detections; Executing
/// waits out the arm's motion before looking again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Scanning,
    Executing,
}

/// Wrist configuration the search plans grasps for: tilted forward over the
/// target with the hand centered.
pub const GRASP_WRIST_TILT: i32 = 157;
pub const GRASP_WRIST_ROTATE: i32 = 90;

/// Base angle the catch is thrown over, and the speed scale of the whole
/// grasp sequence.
const THROW_BASE_DEGREES: i32 = 180;
const MOTION_SPEED: f64 = 1.5;

pub struct GraspController {
    kinematics: Arc<dyn Kinematics>,
    state: ControlState,

    /// How long detections are ignored after a command is issued, covering
    /// the arm's travel time.
    cooldown: Duration,
    executing_until: Option<Instant>,
}

impl GraspController {
    pub fn new(kinematics: Arc<dyn Kinematics>, cooldown: Duration) -> Self {
        GraspController {
            kinematics,
            state: ControlState::Scanning,
            cooldown,
            executing_until: None,
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Whether the vision side should bother extracting detections right now.
    pub fn should_detect(&self) -> bool {
        self.state == ControlState::Scanning
    }

    /// Runs one decision against the current snapshot, at time `now`.
    /// Returns the encoded command sequence when a grasp plan was found.
    ///
    /// Passing `now` explicitly keeps the cooldown deterministic for the
    /// caller's own scheduling (and for tests).
    pub fn step(
        &mut self,
        now: Instant,
        reported_joints: &Joints,
        snapshot: &DetectionSnapshot,
    ) -> Option<String> {
        if self.state == ControlState::Executing {
            match self.executing_until {
                Some(until) if now < until => return None,
                _ => {
                    debug!("cooldown over, scanning again");
                    self.state = ControlState::Scanning;
                    self.executing_until = None;
                }
            }
        }

        let ball = snapshot.balls.first()?;
        let correction = wrist_correction(ball);

        // Aim the wrist at the detection before localizing: the sensing axis
        // has to point at the object for the distance reading to apply to it.
        let mut aimed = *reported_joints;
        aimed[J_WRIST_TILT] += correction.tilt_degrees;
        aimed[J_WRIST_ROTATE] += correction.rotate_degrees;

        let object = match localize_object(&*self.kinematics, &aimed, correction.distance_cm) {
            Ok(object) => object,
            Err(error) => {
                debug!(%error, "skipping detection, cannot localize");
                return None;
            }
        };
        info!(
            radius = object.radius,
            angle = object.angle,
            height = object.height,
            "object localized"
        );

        let initial_arm = [aimed[0], aimed[1], aimed[2]];
        let plan = self.kinematics.inverse(
            &object,
            &initial_arm,
            &[GRASP_WRIST_TILT, GRASP_WRIST_ROTATE],
        )?;

        let command = [
            motion::grab(&plan, MOTION_SPEED),
            motion::throw_at(THROW_BASE_DEGREES, MOTION_SPEED),
            motion::rest_position(),
        ]
        .join(",");

        info!(?plan, "grasp planned, executing");
        self.state = ControlState::Executing;
        self.executing_until = Some(now + self.cooldown);
        Some(command)
    }
}
