//! Pose hand-off to the renderer
//!
//! The simulation never owns meshes. It writes position / rotation / scale
//! into slots of whatever scene the host keeps.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Transform of one externally owned mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    /// Euler angles (radians, XYZ order)
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Pose {
    /// Floats per packed pose: `[px, py, pz, rx, ry, rz, sx, sy, sz]`
    pub const PACKED_LEN: usize = 9;
}

/// Receiver of simulation poses, one slot per mesh
pub trait SceneSink {
    fn set_pose(&mut self, slot: usize, pose: Pose);
}

impl SceneSink for Vec<Pose> {
    fn set_pose(&mut self, slot: usize, pose: Pose) {
        if slot >= self.len() {
            self.resize(slot + 1, Pose::default());
        }
        self[slot] = pose;
    }
}

/// Flat `f32` buffer, [`Pose::PACKED_LEN`] floats per slot
#[derive(Debug, Clone, Default)]
pub struct PackedPoses {
    pub data: Vec<f32>,
}

impl SceneSink for PackedPoses {
    fn set_pose(&mut self, slot: usize, pose: Pose) {
        let start = slot * Pose::PACKED_LEN;
        if self.data.len() < start + Pose::PACKED_LEN {
            self.data.resize(start + Pose::PACKED_LEN, 0.0);
        }
        let dst = &mut self.data[start..start + Pose::PACKED_LEN];
        dst[0..3].copy_from_slice(&pose.position.to_array());
        dst[3..6].copy_from_slice(&pose.rotation.to_array());
        dst[6..9].copy_from_slice(&pose.scale.to_array());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_grows() {
        let mut poses: Vec<Pose> = Vec::new();
        let pose = Pose {
            position: Vec3::X,
            ..Default::default()
        };
        poses.set_pose(2, pose);
        assert_eq!(poses.len(), 3);
        assert_eq!(poses[0], Pose::default());
        assert_eq!(poses[2].position, Vec3::X);
    }

    #[test]
    fn test_packed_layout() {
        let mut packed = PackedPoses::default();
        packed.set_pose(
            1,
            Pose {
                position: Vec3::new(1.0, 2.0, 3.0),
                rotation: Vec3::new(4.0, 5.0, 6.0),
                scale: Vec3::splat(7.0),
            },
        );
        assert_eq!(packed.data.len(), 18);
        assert_eq!(&packed.data[9..], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 7.0, 7.0]);
    }
}
