//! Detections reported by the external vision processes, and the line-based
//! records they arrive in.
//!
//! Balls and printed markers have a known physical size, so the distance to
//! them is estimated from how much of the camera frame they occupy. The
//! calibration curve was fitted against measured readings of the wrist
//! sensor.

use std::fmt;
use std::f64::consts::PI;

/// Scale of the fitted size-to-distance curve, in centimeters.
pub const DISTANCE_CURVE_SCALE: f64 = 29.83581617;

/// Decay of the fitted size-to-distance curve, per percent of frame area.
pub const DISTANCE_CURVE_DECAY: f64 = 0.05695178779;

/// Physical side of the printed markers and ball diameter, in centimeters
/// (both are 1.5 inch).
pub const TARGET_SIDE_CM: f64 = 3.81;

/// Distance in centimeters estimated from the apparent area of a detection,
/// via the exponential calibration curve.
pub fn distance_from_apparent_size(area_px: f64, image_width: u32, image_height: u32) -> f64 {
    let frame_area = (image_width as f64) * (image_height as f64);
    let percent_of_frame = 100.0 * area_px / frame_area;
    DISTANCE_CURVE_SCALE * (-DISTANCE_CURVE_DECAY * percent_of_frame).exp()
}

/// A ball found by the ball extraction process. Image coordinates, with the
/// distance already estimated from the apparent radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedBall {
    pub center_x: i32,
    pub center_y: i32,
    pub radius_px: i32,
    pub distance_cm: f64,
    pub image_width: u32,
    pub image_height: u32,
}

impl DetectedBall {
    pub fn area_px(&self) -> f64 {
        PI * (self.radius_px as f64) * (self.radius_px as f64)
    }
}

/// Label printed on a marker, when the decoder could read one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerLabel {
    Mug,
    Cube,
    Unlabeled,
}

/// A printed marker (QR-style target) found by the barcode extraction
/// process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedMarker {
    pub center_x: i32,
    pub center_y: i32,
    pub width_px: i32,
    pub height_px: i32,
    pub distance_cm: f64,
    pub label: MarkerLabel,
    pub image_width: u32,
    pub image_height: u32,
}

impl DetectedMarker {
    pub fn area_px(&self) -> f64 {
        (self.width_px as f64) * (self.height_px as f64)
    }
}

/// Error for malformed detector records. The detector processes write one
/// line per frame; a bad line is reported, never panicked on.
#[derive(Debug)]
pub enum DetectionParseError {
    MalformedRecord(String),
    BadNumber(String),
}

impl fmt::Display for DetectionParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DetectionParseError::MalformedRecord(ref record) => {
                write!(f, "Malformed detection record: {}", record)
            }
            DetectionParseError::BadNumber(ref token) => {
                write!(f, "Not a number: {}", token)
            }
        }
    }
}

impl std::error::Error for DetectionParseError {}

/// Strips the surrounding parentheses (or brackets) of one record and splits
/// the comma separated fields.
fn record_fields(record: &str) -> Result<Vec<&str>, DetectionParseError> {
    if record.len() < 2 {
        return Err(DetectionParseError::MalformedRecord(record.to_string()));
    }
    let inner = &record[1..record.len() - 1];
    Ok(inner.split(", ").collect())
}

fn parse_int(token: &str) -> Result<i32, DetectionParseError> {
    token
        .trim()
        .parse()
        .map_err(|_| DetectionParseError::BadNumber(token.to_string()))
}

/// Parses one frame's worth of ball records: `(x, y, r);(x, y, r);...`.
pub fn parse_balls(
    line: &str,
    image_width: u32,
    image_height: u32,
) -> Result<Vec<DetectedBall>, DetectionParseError> {
    if line.is_empty() {
        return Ok(Vec::new());
    }
    let mut balls = Vec::new();
    for record in line.split(';') {
        let fields = record_fields(record)?;
        if fields.len() < 3 {
            return Err(DetectionParseError::MalformedRecord(record.to_string()));
        }
        let center_x = parse_int(fields[0])?;
        let center_y = parse_int(fields[1])?;
        let radius_px = parse_int(fields[2])?;

        let area_px = PI * (radius_px as f64) * (radius_px as f64);
        balls.push(DetectedBall {
            center_x,
            center_y,
            radius_px,
            distance_cm: distance_from_apparent_size(area_px, image_width, image_height),
            image_width,
            image_height,
        });
    }
    Ok(balls)
}

/// Parses one frame's worth of marker records: `(x, y, w, h, 'label');...`.
pub fn parse_markers(
    line: &str,
    image_width: u32,
    image_height: u32,
) -> Result<Vec<DetectedMarker>, DetectionParseError> {
    if line.is_empty() {
        return Ok(Vec::new());
    }
    let mut markers = Vec::new();
    for record in line.split(';') {
        let fields = record_fields(record)?;
        if fields.len() < 5 {
            return Err(DetectionParseError::MalformedRecord(record.to_string()));
        }
        let center_x = parse_int(fields[0])?;
        let center_y = parse_int(fields[1])?;
        let width_px = parse_int(fields[2])?;
        let height_px = parse_int(fields[3])?;
        let label = match fields[4].trim() {
            "'mug'" => MarkerLabel::Mug,
            "'cube'" => MarkerLabel::Cube,
            _ => MarkerLabel::Unlabeled,
        };

        let area_px = (width_px as f64) * (height_px as f64);
        markers.push(DetectedMarker {
            center_x,
            center_y,
            width_px,
            height_px,
            distance_cm: distance_from_apparent_size(area_px, image_width, image_height),
            label,
            image_width,
            image_height,
        });
    }
    Ok(markers)
}

/// Parses the arm state line `[j1, j2, j3, j4, j5, d]` the controller reports
/// before each decision: the five joint positions followed by the current
/// wrist sensor reading.
pub fn parse_arm_state(line: &str) -> Result<Vec<f64>, DetectionParseError> {
    let fields = record_fields(line)?;
    fields
        .iter()
        .map(|token| {
            token
                .trim()
                .parse()
                .map_err(|_| DetectionParseError::BadNumber(token.to_string()))
        })
        .collect()
}

/// Anything the wrist can be steered to look at: a position in the frame plus
/// the apparent size the distance estimate came from.
pub trait AimTarget {
    fn center(&self) -> (i32, i32);
    fn image_size(&self) -> (u32, u32);
    /// Apparent side of the target in pixels, for the pixel-to-centimeter
    /// scale at its distance.
    fn apparent_side_px(&self) -> i32;
    fn distance_cm(&self) -> f64;
}

impl AimTarget for DetectedBall {
    fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    fn apparent_side_px(&self) -> i32 {
        self.radius_px * 2
    }

    fn distance_cm(&self) -> f64 {
        self.distance_cm
    }
}

impl AimTarget for DetectedMarker {
    fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    fn apparent_side_px(&self) -> i32 {
        (self.width_px + self.height_px) / 2
    }

    fn distance_cm(&self) -> f64 {
        self.distance_cm
    }
}

/// Wrist change, in integer degrees, that centers a target in the camera
/// frame, plus the distance to it. Tilt moves the view up or down, rotate
/// moves it left or right.
#[derive(Debug, Clone, Copy)]
pub struct WristCorrection {
    pub tilt_degrees: i32,
    pub rotate_degrees: i32,
    pub distance_cm: f64,
}

/// Length of the wrist between its pivot and the camera, which shifts the
/// pivot of the correction behind the image plane.
const WRIST_LENGTH_CM: f64 = 10.0;

/// Computes how far to swing the wrist so the target moves to the frame
/// center. The pixel offset is converted to centimeters at the target's
/// distance using its known physical size, then to the angle subtended at
/// the wrist pivot.
pub fn wrist_correction(target: &dyn AimTarget) -> WristCorrection {
    let (center_x, center_y) = target.center();
    let (image_width, image_height) = target.image_size();
    let distance = target.distance_cm();

    let cm_per_pixel = TARGET_SIDE_CM / (target.apparent_side_px() as f64);

    let offset_x_cm = ((image_width as i32 / 2 - center_x).abs() as f64) * cm_per_pixel;
    let offset_y_cm = ((image_height as i32 / 2 - center_y).abs() as f64) * cm_per_pixel;

    let swing = |offset_cm: f64| -> i32 {
        (offset_cm / (f64::hypot(distance, offset_cm) + WRIST_LENGTH_CM))
            .asin()
            .to_degrees() as i32
    };

    let mut rotate_degrees = swing(offset_x_cm);
    let mut tilt_degrees = swing(offset_y_cm);

    if center_x < image_width as i32 / 2 {
        rotate_degrees = -rotate_degrees;
    }
    if center_y < image_height as i32 / 2 {
        tilt_degrees = -tilt_degrees;
    }

    WristCorrection {
        tilt_degrees,
        rotate_degrees,
        distance_cm: distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_curve_at_zero_area() {
        // An infinitely distant target occupies no pixels; the curve tops
        // out at its fitted scale.
        let distance = distance_from_apparent_size(0.0, 640, 480);
        assert!((distance - DISTANCE_CURVE_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_distance_curve_decreases_with_size() {
        let far = distance_from_apparent_size(1000.0, 640, 480);
        let near = distance_from_apparent_size(30000.0, 640, 480);
        assert!(near < far);
    }

    #[test]
    fn test_parse_balls() {
        let balls = parse_balls("(320, 200, 14);(10, 400, 7)", 640, 480).expect("well formed");
        assert_eq!(balls.len(), 2);
        assert_eq!(balls[0].center_x, 320);
        assert_eq!(balls[0].center_y, 200);
        assert_eq!(balls[0].radius_px, 14);
        let expected = distance_from_apparent_size(balls[0].area_px(), 640, 480);
        assert!((balls[0].distance_cm - expected).abs() < 1e-9);
    }

    #[test]
    fn test_parse_balls_empty_frame() {
        assert!(parse_balls("", 640, 480).expect("empty is fine").is_empty());
    }

    #[test]
    fn test_parse_balls_malformed() {
        assert!(parse_balls("(320, 200)", 640, 480).is_err());
        assert!(parse_balls("(320, abc, 14)", 640, 480).is_err());
    }

    #[test]
    fn test_parse_markers() {
        let markers =
            parse_markers("(100, 120, 40, 44, 'mug');(500, 300, 22, 21, 'cube')", 640, 480)
                .expect("well formed");
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].label, MarkerLabel::Mug);
        assert_eq!(markers[1].label, MarkerLabel::Cube);
    }

    #[test]
    fn test_parse_marker_unknown_label() {
        let markers = parse_markers("(100, 120, 40, 44, 'jar')", 640, 480).expect("well formed");
        assert_eq!(markers[0].label, MarkerLabel::Unlabeled);
    }

    #[test]
    fn test_parse_arm_state() {
        let state = parse_arm_state("[100.0, 80.0, 55.0, 110.0, 90.0, 17.5]").expect("well formed");
        assert_eq!(state, vec![100.0, 80.0, 55.0, 110.0, 90.0, 17.5]);
    }

    #[test]
    fn test_centered_target_needs_no_correction() {
        let ball = DetectedBall {
            center_x: 320,
            center_y: 240,
            radius_px: 20,
            distance_cm: 20.0,
            image_width: 640,
            image_height: 480,
        };
        let correction = wrist_correction(&ball);
        assert_eq!(correction.tilt_degrees, 0);
        assert_eq!(correction.rotate_degrees, 0);
        assert!((correction.distance_cm - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_correction_signs_follow_the_offset() {
        let ball = DetectedBall {
            center_x: 100, // left of center: negative rotate
            center_y: 400, // below center: positive tilt
            radius_px: 20,
            distance_cm: 20.0,
            image_width: 640,
            image_height: 480,
        };
        let correction = wrist_correction(&ball);
        assert!(correction.rotate_degrees < 0);
        assert!(correction.tilt_degrees > 0);
    }
}
