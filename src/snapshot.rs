//! The most-recent detection snapshot shared between the camera poll loop
//! and the grasp loop.
//!
//! The two loops never exchange anything finer than a whole frame's worth of
//! detections: the poll loop publishes a complete snapshot, the grasp loop
//! reads a complete snapshot. Readers keep whatever snapshot they took even
//! if a newer one lands mid-decision.

use std::sync::{Arc, RwLock};

use crate::detection::{DetectedBall, DetectedMarker};

/// Everything the vision processes reported for one frame.
#[derive(Debug, Clone, Default)]
pub struct DetectionSnapshot {
    pub balls: Vec<DetectedBall>,
    pub markers: Vec<DetectedMarker>,
}

impl DetectionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty() && self.markers.is_empty()
    }
}

/// Holder of the latest snapshot. Writes replace the whole snapshot in one
/// swap; reads hand out a consistent `Arc` to it. There are no partial
/// updates.
#[derive(Default)]
pub struct SnapshotCell {
    current: RwLock<Arc<DetectionSnapshot>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        SnapshotCell {
            current: RwLock::new(Arc::new(DetectionSnapshot::default())),
        }
    }

    /// Replaces the current snapshot. Most-recent wins; there is no queue.
    pub fn publish(&self, snapshot: DetectionSnapshot) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = Arc::new(snapshot);
    }

    /// The latest published snapshot. The returned `Arc` stays valid (and
    /// unchanged) however many snapshots are published after it.
    pub fn latest(&self) -> Arc<DetectionSnapshot> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(center_x: i32) -> DetectedBall {
        DetectedBall {
            center_x,
            center_y: 240,
            radius_px: 10,
            distance_cm: 20.0,
            image_width: 640,
            image_height: 480,
        }
    }

    #[test]
    fn test_starts_empty() {
        assert!(SnapshotCell::new().latest().is_empty());
    }

    #[test]
    fn test_publish_replaces_whole_snapshot() {
        let cell = SnapshotCell::new();
        cell.publish(DetectionSnapshot {
            balls: vec![ball(100), ball(200)],
            markers: Vec::new(),
        });
        cell.publish(DetectionSnapshot {
            balls: vec![ball(300)],
            markers: Vec::new(),
        });
        let latest = cell.latest();
        assert_eq!(latest.balls.len(), 1);
        assert_eq!(latest.balls[0].center_x, 300);
    }

    #[test]
    fn test_reader_keeps_its_snapshot() {
        let cell = SnapshotCell::new();
        cell.publish(DetectionSnapshot {
            balls: vec![ball(100)],
            markers: Vec::new(),
        });
        let taken = cell.latest();
        cell.publish(DetectionSnapshot::default());
        assert_eq!(taken.balls.len(), 1);
        assert!(cell.latest().is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cell = std::sync::Arc::new(SnapshotCell::new());
        let writer = {
            let cell = cell.clone();
            std::thread::spawn(move || {
                for i in 0..100 {
                    cell.publish(DetectionSnapshot {
                        balls: vec![ball(i)],
                        markers: Vec::new(),
                    });
                }
            })
        };
        for _ in 0..100 {
            let snapshot = cell.latest();
            // a consistent snapshot: empty or exactly one ball
            assert!(snapshot.balls.len() <= 1);
        }
        writer.join().expect("writer finishes");
    }
}
