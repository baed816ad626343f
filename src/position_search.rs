//! Breadth-first search over the integer (bicep, forearm) lattice, inverting
//! the forward chain for a fixed base rotation and wrist configuration.
//!
//! The base is never searched: the arm can rotate freely to face the target,
//! so the base angle is taken directly from the requested position. The wrist
//! joints are held at caller-supplied values; exploring them as well would
//! multiply the state space by roughly 48,000 times, far beyond what the
//! target hardware can afford per detection. What remains is a lattice of
//! (bicep, forearm) pairs walked one degree at a time, so the first solution
//! found is the cheapest in actuation steps from the initial configuration.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use crate::coordinates::CylindricalPosition;
use crate::kinematic_traits::{ArmAngles, HandElement, Joints, Kinematics, WristAngles};

/// Accepted absolute error per cylindrical component: radius and height in
/// centimeters, angle in degrees.
pub const POSITION_TOLERANCE: f64 = 1.0;

/// Bounds of the explored lattice. The forearm's hardware range runs to 180,
/// but exploration is capped at 90 by default, matching the envelope the arm
/// has been validated in; widen it once the full range is trusted.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    pub bicep: (i32, i32),
    pub forearm: (i32, i32),
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            bicep: (0, 270),
            forearm: (0, 90),
        }
    }
}

/// Finds the full 5-joint configuration that brings the gripper center within
/// [POSITION_TOLERANCE] of `requested`, or `None` when the frontier empties
/// without a match. The lattice is finite, so the search always terminates.
pub fn gripper_position_search(
    kinematics: &dyn Kinematics,
    requested: &CylindricalPosition,
    initial_arm: &ArmAngles,
    fixed_wrist: &WristAngles,
    limits: &SearchLimits,
) -> Option<Joints> {
    if requested.radius > kinematics.maximum_reachable_radius() {
        debug!(
            radius = requested.radius,
            max = kinematics.maximum_reachable_radius(),
            "requested radius beyond reach"
        );
        return None;
    }

    let start: ArmAngles = [requested.angle as i32, initial_arm[1], initial_arm[2]];

    // The frontier is deliberately unbounded: the visited set caps it by the
    // size of the finite lattice, and a capacity-bounded queue here can only
    // stall the search.
    let mut frontier: VecDeque<ArmAngles> = VecDeque::new();
    let mut visited: HashSet<ArmAngles> = HashSet::new();
    frontier.push_back(start);
    visited.insert(start);

    let mut examined: u64 = 0;
    while let Some(node) = frontier.pop_front() {
        let joints: Joints = [node[0], node[1], node[2], fixed_wrist[0], fixed_wrist[1]];
        examined += 1;

        match kinematics.forward(&joints, HandElement::Gripper) {
            Ok(position) => {
                if position.within(requested, POSITION_TOLERANCE) {
                    debug!(
                        examined,
                        bicep = node[1],
                        forearm = node[2],
                        radius = position.radius,
                        angle = position.angle,
                        height = position.height,
                        "position found"
                    );
                    return Some(joints);
                }
            }
            Err(error) => {
                // The fixed wrist pushes the derived wrist angle out of its
                // window at this lattice point; the point is unreachable but
                // never disconnects the rest of the lattice.
                trace!(%error, bicep = node[1], forearm = node[2], "skipping lattice point");
                continue;
            }
        }

        for successor in successors(&node, limits) {
            if visited.insert(successor) {
                frontier.push_back(successor);
            }
        }
    }

    debug!(examined, "frontier exhausted, not reachable");
    None
}

/// Up to four neighbors: bicep one degree up or down, forearm one degree up
/// or down, clamped to the lattice bounds.
fn successors(node: &ArmAngles, limits: &SearchLimits) -> Vec<ArmAngles> {
    let mut successors = Vec::with_capacity(4);

    if node[1] < limits.bicep.1 {
        successors.push([node[0], node[1] + 1, node[2]]);
    }
    if node[1] > limits.bicep.0 {
        successors.push([node[0], node[1] - 1, node[2]]);
    }
    if node[2] < limits.forearm.1 {
        successors.push([node[0], node[1], node[2] + 1]);
    }
    if node[2] > limits.forearm.0 {
        successors.push([node[0], node[1], node[2] - 1]);
    }

    successors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics_impl::ArmKinematics;
    use crate::parameters::arm_kinematics::Parameters;

    fn arm() -> ArmKinematics {
        ArmKinematics::new(Parameters::lab_arm())
    }

    #[test]
    fn test_successors_clamped_at_corners() {
        let limits = SearchLimits::default();
        assert_eq!(successors(&[180, 0, 0], &limits).len(), 2);
        assert_eq!(successors(&[180, 270, 90], &limits).len(), 2);
        assert_eq!(successors(&[180, 135, 45], &limits).len(), 4);
        assert_eq!(successors(&[180, 0, 45], &limits).len(), 3);
    }

    #[test]
    fn test_search_sets_base_from_request() {
        let requested = CylindricalPosition::new(30.0, 180.0, 15.0);
        let solution = gripper_position_search(
            &arm(),
            &requested,
            &[0, 0, 0],
            &[157, 90],
            &SearchLimits::default(),
        )
        .expect("the scenario target is reachable");
        assert_eq!(solution[0], 180);
        assert_eq!(solution[3], 157);
        assert_eq!(solution[4], 90);
    }

    #[test]
    fn test_solution_verified_by_forward_kinematics() {
        let kinematics = arm();
        let requested = CylindricalPosition::new(26.0, 150.0, 15.0);
        let solution = gripper_position_search(
            &kinematics,
            &requested,
            &[0, 0, 0],
            &[157, 90],
            &SearchLimits::default(),
        )
        .expect("reachable");
        let reached = kinematics
            .forward(&solution, HandElement::Gripper)
            .expect("search only returns valid configurations");
        assert!(reached.within(&requested, POSITION_TOLERANCE));
    }

    #[test]
    fn test_beyond_reach_is_rejected_without_searching() {
        let requested = CylindricalPosition::new(50.0, 90.0, 10.0);
        assert!(gripper_position_search(
            &arm(),
            &requested,
            &[0, 135, 45],
            &[157, 90],
            &SearchLimits::default(),
        )
        .is_none());
    }

    #[test]
    fn test_unreachable_inside_envelope_terminates() {
        // Radius within reach but a height the arm cannot combine with it.
        let requested = CylindricalPosition::new(40.0, 0.0, 40.0);
        assert!(gripper_position_search(
            &arm(),
            &requested,
            &[0, 0, 0],
            &[157, 90],
            &SearchLimits::default(),
        )
        .is_none());
    }

    #[test]
    fn test_initial_configuration_already_at_goal() {
        let kinematics = arm();
        let joints = [180, 89, 10, 157, 90];
        let target = kinematics
            .forward(&joints, HandElement::Gripper)
            .expect("valid");
        let solution = gripper_position_search(
            &kinematics,
            &target,
            &[180, 89, 10],
            &[157, 90],
            &SearchLimits::default(),
        )
        .expect("the start node itself satisfies the goal");
        // accepted immediately, possibly at the start node itself
        let reached = kinematics
            .forward(&solution, HandElement::Gripper)
            .expect("valid");
        assert!(reached.within(&target, POSITION_TOLERANCE));
    }
}
