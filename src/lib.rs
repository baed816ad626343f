//! Rust implementation of the kinematic core of a 5-axis grasping arm:
//! forward kinematics in cylindrical coordinates, object localization from a
//! wrist-mounted distance sensor, and a breadth-first inverse kinematics
//! search over the integer joint lattice.
//!
//! The arm this models is a hobby servo arm whose joints take integer degree
//! positions. Its mechanical zeros are not aligned with trig quadrants, so
//! each joint's travel is covered by a small table of analytic bands rather
//! than one closed-form chain. The inverse problem is solved by searching the
//! (bicep, forearm) lattice one degree at a time, which returns the solution
//! cheapest in actuation steps from the arm's current configuration.
//!
//! # Features
//!
//! - Forward kinematics for three interchangeable hand elements: the gripper
//!   center, the distance sensor tip and a reference point behind the sensor.
//! - Joint values are validated against the measured travel ranges; geometry
//!   is never silently computed from out-of-range inputs.
//! - Object localization triangulates a sensed object from one scalar
//!   distance reading plus the sensor's own pose, with degenerate sensing
//!   axes reported as errors rather than NaN.
//! - The reachability search is bounded by the finite joint lattice and
//!   always terminates, returning `None` for unreachable targets.
//! - Detection parsing, a most-recent-wins snapshot cell, motion command
//!   encoding and a small grasp controller tie the core to the surrounding
//!   vision and motor processes.
//!
//! # Parameters
//!
//! All dimensions live in `Parameters` (centimeters and degrees, measured by
//! hand from the physical arm). `Parameters::lab_arm()` is the arm the
//! calibration and the test suite were taken from.

pub mod parameters;
pub mod parameters_arms;

pub mod coordinates;
pub mod kinematic_traits;
pub mod kinematics_error;
pub mod kinematics_impl;

pub mod constraints;

pub mod position_search;

pub mod object_position;

pub mod detection;
pub mod snapshot;

pub mod motion;

pub mod controller;

pub mod utils;

#[cfg(test)]
mod tests;
