use anyhow::Result;
use rs_grasp_kinematics::coordinates::CylindricalPosition;
use rs_grasp_kinematics::kinematic_traits::{HandElement, Kinematics};
use rs_grasp_kinematics::kinematics_impl::ArmKinematics;
use rs_grasp_kinematics::object_position::localize_object;
use rs_grasp_kinematics::parameters::arm_kinematics::Parameters;
use rs_grasp_kinematics::utils::{dump_joints, dump_position};

/// Usage example.
fn main() -> Result<()> {
    let arm = ArmKinematics::new(Parameters::lab_arm());

    println!("Requesting (30, 180, 15) from the rest configuration:");
    let requested = CylindricalPosition::new(30.0, 180.0, 15.0);
    match arm.inverse(&requested, &[0, 0, 0], &[157, 90]) {
        Some(solution) => {
            dump_joints(&solution);
            let reached = arm.forward(&solution, HandElement::Gripper)?;
            print!("Forward kinematics lands at ");
            dump_position(&reached);
        }
        None => println!("Not reachable"),
    }

    println!("\nRequesting a radius beyond the {} cm reach:", arm.maximum_reachable_radius());
    let too_far = CylindricalPosition::new(50.0, 90.0, 10.0);
    match arm.inverse(&too_far, &[0, 0, 0], &[157, 90]) {
        Some(solution) => dump_joints(&solution),
        None => println!("Not reachable"),
    }

    println!("\nObject 20 cm ahead of the distance sensor:");
    let looking = [0, 45, 30, 80, 90];
    let sensor = arm.forward(&looking, HandElement::DistanceSensor)?;
    print!("Sensor tip at ");
    dump_position(&sensor);
    let object = localize_object(&arm, &looking, 20.0)?;
    print!("Object at ");
    dump_position(&object);

    println!("\nMeasured dimensions:\n{}", arm.parameters().to_yaml());
    Ok(())
}
