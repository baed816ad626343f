//! Hardcoded dimensions of the measured arm

pub mod arm_kinematics {
    use crate::parameters::arm_kinematics::{Parameters, WristExtension};

    #[allow(dead_code)]
    impl Parameters {
        /// The hobby arm these dimensions were measured from. The point behind
        /// the sensor sits one centimeter back on the sensing axis, which is
        /// what makes the sensing-axis orientation recoverable from two
        /// forward kinematics calls.
        pub fn lab_arm() -> Self {
            Parameters {
                bicep_length: 14.85,
                forearm_length: 16.0,
                upper_wrist_length: 3.48,
                bicep_base_radial_offset: 1.0,
                bicep_base_height: 9.5,
                inherent_wrist_angle: 48.98,
                forearm_degree_offset: 23.0,
                max_reachable_radius: 42.0,
                gripper: WristExtension {
                    middle_wrist: 3.5,
                    lower_wrist: 10.0,
                },
                distance_sensor: WristExtension {
                    middle_wrist: 0.0,
                    lower_wrist: 9.0,
                },
                point_behind_sensor: WristExtension {
                    middle_wrist: 0.0,
                    lower_wrist: 8.0,
                },
            }
        }
    }
}
