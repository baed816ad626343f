//! Helper functions

use crate::coordinates::CylindricalPosition;
use crate::kinematic_traits::Joints;

/// Print the five joint values of a configuration.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for joint in joints {
        row_str.push_str(&format!("{:4} ", joint));
    }
    println!("[{}]", row_str.trim_end());
}

/// Print a cylindrical position with centimeter/degree units.
#[allow(dead_code)]
pub fn dump_position(position: &CylindricalPosition) {
    println!(
        "(r = {:.2} cm, angle = {:.2} deg, z = {:.2} cm)",
        position.radius, position.angle, position.height
    );
}
