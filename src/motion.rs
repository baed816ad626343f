//! Encodes joint configurations into the token stream the downstream motor
//! controller consumes: comma separated `j1..j7:<int>` position tokens and
//! `s:<float>` speed tokens, executed in order.
//!
//! Joints 1 through 5 are the arm itself, joint 6 the wrist camera mount and
//! joint 7 the gripper jaws.

use crate::kinematic_traits::Joints;

/// Gripper jaw angle wide enough to accept a ball.
const GRIPPER_OPEN_DEGREES: i32 = 140;

/// Gripper jaw angle that holds a ball without crushing it.
const GRIPPER_CLOSED_DEGREES: i32 = 40;

/// Token accumulator for one command string.
struct CommandBuffer {
    tokens: Vec<String>,
}

impl CommandBuffer {
    fn new() -> Self {
        CommandBuffer { tokens: Vec::new() }
    }

    fn joint(&mut self, index: u8, degrees: i32) -> &mut Self {
        self.tokens.push(format!("j{}:{}", index, degrees));
        self
    }

    /// All five arm joints in servo order.
    fn arm(&mut self, joints: &Joints) -> &mut Self {
        for (index, degrees) in joints.iter().enumerate() {
            self.joint(index as u8 + 1, *degrees);
        }
        self
    }

    /// A speed token; the controller applies it to the motions queued since
    /// the previous one.
    fn speed(&mut self, value: f64) -> &mut Self {
        self.tokens.push(format!("s:{}", value));
        self
    }

    fn encode(&self) -> String {
        self.tokens.join(",")
    }
}

/// Move to the grasp configuration with the jaws open, then close them.
/// `speed` scales the whole motion; larger is faster.
pub fn grab(arm_position: &Joints, speed: f64) -> String {
    let mut command = CommandBuffer::new();
    command
        .joint(7, GRIPPER_OPEN_DEGREES)
        .arm(arm_position)
        .joint(6, 90)
        .speed(0.2 / speed)
        .joint(7, GRIPPER_CLOSED_DEGREES)
        .speed(0.2 / speed);
    command.encode()
}

/// Wind up over the given base angle, swing through, and release.
pub fn throw_at(base_degrees: i32, speed: f64) -> String {
    let mut command = CommandBuffer::new();
    command
        .arm(&[base_degrees, 50, 45, 145, 90])
        .joint(6, 90)
        .speed(0.3 / speed)
        .arm(&[base_degrees, 135, 0, 130, 90])
        .joint(6, 90)
        .speed(0.25 / speed)
        .joint(7, GRIPPER_OPEN_DEGREES);
    command.encode()
}

/// The fixed pose the arm parks in between grasps.
pub fn rest_position() -> String {
    let mut command = CommandBuffer::new();
    command.speed(0.2).arm(&[100, 80, 55, 110, 90]).joint(6, 90);
    command.encode()
}
