use crate::constraints::Constraints;
use crate::coordinates::CylindricalPosition;
use crate::kinematic_traits::{ArmAngles, HandElement, Joints, Kinematics, WristAngles};
use crate::kinematics_error::KinematicsError;
use crate::parameters::arm_kinematics::Parameters;
use crate::position_search::{gripper_position_search, SearchLimits};
use nalgebra::Vector3;

/// One analytic band of a joint's travel. Each joint's mechanical zero is not
/// aligned with a single trig quadrant, so its travel is covered by 2-4 such
/// bands rather than one closed-form expression. The formula receives the
/// band-local angle (degrees past `start`, in radians) and the link length,
/// and yields the link vector in the chain's radial/vertical plane.
struct LinkBand {
    start: f64,
    end: f64,
    link: fn(local: f64, length: f64) -> Vector3<f64>,
}

const BICEP_BANDS: [LinkBand; 3] = [
    LinkBand {
        start: 0.0,
        end: 90.0,
        link: |a, l| Vector3::new(-l * a.cos(), 0.0, l * a.sin()),
    },
    LinkBand {
        start: 90.0,
        end: 180.0,
        link: |a, l| Vector3::new(l * a.sin(), 0.0, l * a.cos()),
    },
    LinkBand {
        start: 180.0,
        end: 270.0,
        link: |a, l| Vector3::new(l * a.cos(), 0.0, -l * a.sin()),
    },
];

const FOREARM_BANDS: [LinkBand; 2] = [
    LinkBand {
        start: 0.0,
        end: 90.0,
        link: |a, l| Vector3::new(l * a.cos(), 0.0, -l * a.sin()),
    },
    LinkBand {
        start: 90.0,
        end: 180.0,
        link: |a, l| Vector3::new(-l * a.sin(), 0.0, -l * a.cos()),
    },
];

const MIDDLE_WRIST_BANDS: [LinkBand; 3] = [
    LinkBand {
        start: 90.0,
        end: 180.0,
        link: |a, l| Vector3::new(l * a.sin(), 0.0, l * a.cos()),
    },
    LinkBand {
        start: 180.0,
        end: 270.0,
        link: |a, l| Vector3::new(l * a.cos(), 0.0, -l * a.sin()),
    },
    LinkBand {
        start: 270.0,
        end: 360.0,
        link: |a, l| Vector3::new(-l * a.sin(), 0.0, -l * a.cos()),
    },
];

/// One band of the tilted-plane rule that maps a sideways wrist offset to the
/// height it gains or loses. The slope receives the band-local tilt in
/// radians.
struct TiltBand {
    start: f64,
    end: f64,
    slope: fn(local: f64) -> f64,
}

const TILT_BANDS: [TiltBand; 4] = [
    TiltBand {
        start: 0.0,
        end: 90.0,
        slope: |t| -t.tan(),
    },
    TiltBand {
        start: 90.0,
        end: 180.0,
        slope: |t| 1.0 / t.tan(),
    },
    TiltBand {
        start: 180.0,
        end: 270.0,
        slope: |t| -t.tan(),
    },
    TiltBand {
        start: 270.0,
        end: 360.0,
        slope: |t| 1.0 / t.tan(),
    },
];

/// Resolves the first band covering `degrees` and evaluates its formula with
/// the band-local angle. Band boundaries are inclusive on both sides; the
/// shared boundary values evaluate identically in either band.
fn link_vector(bands: &[LinkBand], degrees: f64, length: f64) -> Option<Vector3<f64>> {
    bands
        .iter()
        .find(|band| degrees >= band.start && degrees <= band.end)
        .map(|band| (band.link)((degrees - band.start).to_radians(), length))
}

/// Height gained or lost by a point at sideways offset `x` on the plane
/// tilted by `tilt` degrees along the wrist axis.
fn tilted_plane_height(tilt: f64, x: f64) -> f64 {
    TILT_BANDS
        .iter()
        .find(|band| tilt >= band.start && tilt <= band.end)
        .map(|band| (band.slope)((tilt - band.start).to_radians()) * x)
        .unwrap_or(0.0)
}

/// The kinematic chain of the arm: five rigid-link transforms from the base
/// center out to the chosen hand element, plus the BFS inverse over the
/// (bicep, forearm) lattice.
pub struct ArmKinematics {
    parameters: Parameters,
    constraints: Constraints,
    search_limits: SearchLimits,
}

impl ArmKinematics {
    /// Creates a new `ArmKinematics` instance with the given dimensions and
    /// the default joint constraints and search limits.
    pub fn new(parameters: Parameters) -> Self {
        Self::new_with_constraints(parameters, Constraints::default())
    }

    /// Creates a new `ArmKinematics` instance with explicit joint constraints.
    pub fn new_with_constraints(parameters: Parameters, constraints: Constraints) -> Self {
        ArmKinematics {
            parameters,
            constraints,
            search_limits: SearchLimits::default(),
        }
    }

    /// Replaces the lattice bounds used by [Kinematics::inverse].
    pub fn with_search_limits(mut self, search_limits: SearchLimits) -> Self {
        self.search_limits = search_limits;
        self
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The derived angle that orients the middle wrist: the fixed inherent
    /// offset plus wrist tilt, forearm and the forearm zero offset.
    fn conglomerate_wrist_angle(&self, joints: &Joints) -> f64 {
        self.parameters.inherent_wrist_angle
            + (joints[3] + joints[2]) as f64
            + self.parameters.forearm_degree_offset
    }

    /// The tilt of the wrist extension with respect to the forearm; the
    /// conglomerate angle without the inherent offset.
    fn wrist_angle(&self, joints: &Joints) -> f64 {
        (joints[3] + joints[2]) as f64 + self.parameters.forearm_degree_offset
    }

    /// Final chain step: travel from the middle wrist along the lower wrist
    /// to the hand element. The wrist rotate joint swings the element left or
    /// right, which briefly leaves the radial/vertical plane; the resulting
    /// y offset is projected onto the plane tilted by the wrist angle and
    /// folded back into the cylindrical result.
    fn hand_element_offset(
        at_middle_wrist: &CylindricalPosition,
        wrist_angle: f64,
        wrist_rotate: f64,
        lower_wrist_length: f64,
    ) -> CylindricalPosition {
        let rotation = wrist_rotate.to_radians();
        let mut y = -lower_wrist_length * rotation.cos();
        let mut x = lower_wrist_length * rotation.sin();
        if wrist_angle > 270.0 {
            // past 270 degrees the extension points back over the forearm
            y = -y;
            x = -x;
        }

        let height = tilted_plane_height(wrist_angle, x);
        let radial = x + at_middle_wrist.radius;
        let radius = f64::hypot(radial, y);

        // law of sines for the swing the y offset adds to the angle
        let swing = if radius > f64::EPSILON {
            (y / radius).asin().to_degrees()
        } else {
            0.0
        };

        CylindricalPosition::new(
            radius,
            at_middle_wrist.angle + swing,
            height + at_middle_wrist.height,
        )
    }
}

impl Kinematics for ArmKinematics {
    fn forward(
        &self,
        joints: &Joints,
        element: HandElement,
    ) -> Result<CylindricalPosition, KinematicsError> {
        let p = &self.parameters;
        let conglomerate = self.conglomerate_wrist_angle(joints);
        self.constraints.check(joints, conglomerate)?;

        let extension = p.wrist_extension(element);
        // The middle wrist sits off the upper wrist axis; both segments are
        // traversed as one resultant link.
        let middle_upper_resultant =
            f64::hypot(p.upper_wrist_length, extension.middle_wrist);

        let at_bicep_base = CylindricalPosition::new(
            p.bicep_base_radial_offset,
            joints[0] as f64,
            p.bicep_base_height,
        );
        let at_bicep = at_bicep_base.offset_by(
            &link_vector(&BICEP_BANDS, joints[1] as f64, p.bicep_length).ok_or(
                KinematicsError::JointOutOfRange {
                    joint: "bicep",
                    value: joints[1],
                    min: 0,
                    max: 270,
                },
            )?,
        );
        let at_forearm = at_bicep.offset_by(
            &link_vector(&FOREARM_BANDS, joints[2] as f64, p.forearm_length).ok_or(
                KinematicsError::JointOutOfRange {
                    joint: "forearm",
                    value: joints[2],
                    min: 0,
                    max: 180,
                },
            )?,
        );
        let at_middle_wrist = at_forearm.offset_by(
            &link_vector(&MIDDLE_WRIST_BANDS, conglomerate, middle_upper_resultant).ok_or(
                KinematicsError::WristAngleOutOfRange {
                    angle: conglomerate,
                    min: 90.0,
                    max: 360.0,
                },
            )?,
        );

        Ok(Self::hand_element_offset(
            &at_middle_wrist,
            self.wrist_angle(joints),
            joints[4] as f64,
            extension.lower_wrist,
        ))
    }

    fn inverse(
        &self,
        requested: &CylindricalPosition,
        initial_arm: &ArmAngles,
        fixed_wrist: &WristAngles,
    ) -> Option<Joints> {
        gripper_position_search(self, requested, initial_arm, fixed_wrist, &self.search_limits)
    }

    fn maximum_reachable_radius(&self) -> f64 {
        self.parameters.max_reachable_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn arm() -> ArmKinematics {
        ArmKinematics::new(Parameters::lab_arm())
    }

    fn assert_position(actual: &CylindricalPosition, expected: (f64, f64, f64)) {
        assert!(
            (actual.radius - expected.0).abs() < 1e-8
                && (actual.angle - expected.1).abs() < 1e-8
                && (actual.height - expected.2).abs() < 1e-8,
            "got ({}, {}, {}), expected {:?}",
            actual.radius,
            actual.angle,
            actual.height,
            expected
        );
    }

    #[test]
    fn test_gripper_upright_pose() {
        let position = arm()
            .forward(&[0, 90, 45, 60, 90], HandElement::Gripper)
            .expect("pose is within all ranges");
        assert_position(&position, (27.2424795215, 0.0, 26.0957389895));
    }

    #[test]
    fn test_gripper_second_quadrant_pose() {
        let position = arm()
            .forward(&[45, 135, 30, 100, 45], HandElement::Gripper)
            .expect("pose is within all ranges");
        assert_position(&position, (37.6744169862, 34.1820615367, 13.7561043349));
    }

    #[test]
    fn test_gripper_folded_back_pose() {
        // wrist angle beyond 270: the extension flips over the forearm
        let position = arm()
            .forward(&[200, 225, 170, 100, 170], HandElement::Gripper)
            .expect("pose is within all ranges");
        assert_position(&position, (14.5321608004, 157.3377989302, -9.3966318741));
    }

    #[test]
    fn test_sensor_and_point_behind_share_the_chain() {
        let joints = [0, 45, 30, 80, 90];
        let sensor = arm()
            .forward(&joints, HandElement::DistanceSensor)
            .expect("pose is within all ranges");
        let behind = arm()
            .forward(&joints, HandElement::PointBehindSensor)
            .expect("pose is within all ranges");
        assert_position(&sensor, (16.8337930202, 0.0, 21.5316178589));
        assert_position(&behind, (15.8337930202, 0.0, 20.4592491488));
    }

    #[test]
    fn test_base_only_rotates() {
        // Rotating the base must not change radius or height.
        let at_0 = arm()
            .forward(&[0, 100, 40, 90, 90], HandElement::Gripper)
            .expect("valid");
        let at_215 = arm()
            .forward(&[215, 100, 40, 90, 90], HandElement::Gripper)
            .expect("valid");
        assert!((at_0.radius - at_215.radius).abs() < TOLERANCE);
        assert!((at_0.height - at_215.height).abs() < TOLERANCE);
        assert!((at_215.angle - at_0.angle - 215.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_bicep_band_continuity() {
        // A one degree step across each band boundary moves the link tip by
        // no more than the arc it sweeps (~2 * pi * L / 360).
        for boundary in [90, 180] {
            let before = link_vector(&BICEP_BANDS, boundary as f64, 14.85).unwrap();
            let after = link_vector(&BICEP_BANDS, (boundary + 1) as f64, 14.85).unwrap();
            assert!(
                (before - after).norm() < 0.27,
                "bicep jump at {}: {}",
                boundary,
                (before - after).norm()
            );
        }
    }

    #[test]
    fn test_forearm_band_continuity() {
        let before = link_vector(&FOREARM_BANDS, 90.0, 16.0).unwrap();
        let after = link_vector(&FOREARM_BANDS, 91.0, 16.0).unwrap();
        assert!((before - after).norm() < 0.29);
    }

    #[test]
    fn test_middle_wrist_band_continuity() {
        for boundary in [180, 270] {
            let before = link_vector(&MIDDLE_WRIST_BANDS, boundary as f64, 4.93).unwrap();
            let after =
                link_vector(&MIDDLE_WRIST_BANDS, boundary as f64 + 1.0, 4.93).unwrap();
            assert!(
                (before - after).norm() < 0.09,
                "middle wrist jump at {}",
                boundary
            );
        }
    }

    #[test]
    fn test_band_boundaries_agree() {
        // Values on a shared boundary must evaluate the same in either band;
        // 90 degrees belongs to the first middle wrist band but the formula
        // of the next band continues it exactly.
        let first = link_vector(&MIDDLE_WRIST_BANDS, 90.0, 4.93).unwrap();
        assert!((first - Vector3::new(0.0, 0.0, 4.93)).norm() < TOLERANCE);
    }

    #[test]
    fn test_tilted_plane_flat_at_180() {
        // A flat wrist (tilt 180) gains no height from sideways offsets.
        assert!(tilted_plane_height(180.0, 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bicep_out_of_range() {
        let error = arm()
            .forward(&[0, 280, 0, 90, 90], HandElement::Gripper)
            .unwrap_err();
        assert!(matches!(
            error,
            KinematicsError::JointOutOfRange { joint: "bicep", .. }
        ));
    }

    #[test]
    fn test_rejects_conglomerate_wrist_out_of_window() {
        // tilt 0, forearm 0: conglomerate = 48.98 + 23 = 71.98 < 90
        let error = arm()
            .forward(&[0, 90, 0, 0, 90], HandElement::Gripper)
            .unwrap_err();
        assert!(matches!(
            error,
            KinematicsError::WristAngleOutOfRange { .. }
        ));
    }

    #[test]
    fn test_centered_rotate_stays_in_plane() {
        // wrist rotate 90 is straight ahead: no y offset, no angle swing
        let joints = [30, 120, 45, 80, 90];
        let position = arm().forward(&joints, HandElement::Gripper).expect("valid");
        assert!((position.angle - 30.0).abs() < TOLERANCE);
    }
}
