//! Defines the arm dimension data structure

pub mod arm_kinematics {
    use crate::kinematic_traits::HandElement;

    /// The final two links of the wrist for one hand element. The gripper
    /// center, the sensor tip and the point behind the sensor all sit on the
    /// same rigid wrist extension at different lengths.
    #[derive(Debug, Clone, Copy)]
    pub struct WristExtension {
        /// Length from the wrist pivot sideways to the element's axis.
        pub middle_wrist: f64,

        /// Length along the element's axis from the middle wrist to the
        /// element itself.
        pub lower_wrist: f64,
    }

    /// Measured dimensions of the arm, in centimeters and degrees. See
    /// [parameters_arms.rs](parameters_arms.rs) for the measured values of the
    /// concrete arm. These values were taken by hand and carry a small amount
    /// of error.
    #[derive(Debug, Clone, Copy)]
    pub struct Parameters {
        /// Length of the bicep from its pivot to the forearm pivot.
        pub bicep_length: f64,

        /// Length of the forearm from its pivot to the wrist pivot.
        pub forearm_length: f64,

        /// Length of the upper wrist segment between the forearm tip and the
        /// middle wrist pivot.
        pub upper_wrist_length: f64,

        /// Radial offset of the bicep pivot from the base center.
        pub bicep_base_radial_offset: f64,

        /// Height of the bicep pivot above the base plane.
        pub bicep_base_height: f64,

        /// Fixed mechanical angle between the middle and upper wrist segments,
        /// in degrees.
        pub inherent_wrist_angle: f64,

        /// Angular offset of the forearm's mechanical zero, in degrees,
        /// folded into the derived wrist angle.
        pub forearm_degree_offset: f64,

        /// Maximum radius the gripper can reach, measured.
        pub max_reachable_radius: f64,

        /// Wrist links when localizing the gripper center.
        pub gripper: WristExtension,

        /// Wrist links when localizing the distance sensor tip.
        pub distance_sensor: WristExtension,

        /// Wrist links when localizing the reference point behind the sensor.
        pub point_behind_sensor: WristExtension,
    }

    impl Parameters {
        /// The wrist links for the given hand element.
        pub fn wrist_extension(&self, element: HandElement) -> &WristExtension {
            match element {
                HandElement::Gripper => &self.gripper,
                HandElement::DistanceSensor => &self.distance_sensor,
                HandElement::PointBehindSensor => &self.point_behind_sensor,
            }
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            format!(
                "arm_kinematics_geometric_parameters:\n  \
              bicep_length: {}\n  \
              forearm_length: {}\n  \
              upper_wrist_length: {}\n  \
              bicep_base_radial_offset: {}\n  \
              bicep_base_height: {}\n  \
              inherent_wrist_angle: {}\n  \
              forearm_degree_offset: {}\n  \
              max_reachable_radius: {}\n\
            arm_kinematics_wrist_extensions: [{}, {}, {}, {}, {}, {}]\n",
                self.bicep_length,
                self.forearm_length,
                self.upper_wrist_length,
                self.bicep_base_radial_offset,
                self.bicep_base_height,
                self.inherent_wrist_angle,
                self.forearm_degree_offset,
                self.max_reachable_radius,
                self.gripper.middle_wrist,
                self.gripper.lower_wrist,
                self.distance_sensor.middle_wrist,
                self.distance_sensor.lower_wrist,
                self.point_behind_sensor.middle_wrist,
                self.point_behind_sensor.lower_wrist,
            )
        }
    }
}
