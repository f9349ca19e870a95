//! Perspective camera and the two-node camera rig.
//!
//! The camera never rotates: it looks straight down -Z and moves on a rig so
//! the two motion sources stay independent. The *rig* carries the smoothed
//! parallax offset; the *camera inside the rig* carries the scroll-driven
//! vertical position and the fixed eye distance. World eye position is the
//! sum of the two, exactly the composition a scene-graph group node gives.

use glam::{Mat4, Vec2, Vec3};

use crate::scroll::CameraFrame;

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 35.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip-space projection matrix for the given surface aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

/// The camera-holding rig node.
#[derive(Clone, Copy, Debug)]
pub struct CameraRig {
    /// Parallax offset of the rig itself, world units.
    pub offset: Vec2,
    /// Scroll-driven camera position inside the rig.
    pub camera_y: f32,
    /// Fixed eye distance from the section plane.
    pub camera_z: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            camera_y: 0.0,
            camera_z: 7.0,
        }
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame of coordinator output.
    pub fn apply(&mut self, frame: &CameraFrame) {
        self.offset = frame.rig_offset;
        self.camera_y = frame.camera_y;
    }

    /// World-space eye position: rig offset plus local camera position.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.offset.x,
            self.offset.y + self.camera_y,
            self.camera_z,
        )
    }

    /// View matrix looking straight down -Z from the eye.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye(), Vec3::NEG_Z, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_composes_rig_and_camera() {
        let mut rig = CameraRig::new();
        rig.apply(&CameraFrame {
            camera_y: -4.25,
            rig_offset: Vec2::new(0.1, -0.05),
        });
        assert_eq!(rig.eye(), Vec3::new(0.1, -4.3, 7.0));
    }

    #[test]
    fn view_matrix_keeps_forward_fixed() {
        let mut rig = CameraRig::new();
        rig.apply(&CameraFrame {
            camera_y: -8.0,
            rig_offset: Vec2::new(0.3, 0.3),
        });
        // A point directly in front of the eye lands on the view axis.
        let in_front = rig.eye() + Vec3::NEG_Z * 5.0;
        let viewed = rig.view_matrix().transform_point3(in_front);
        assert!(viewed.x.abs() < 1e-5);
        assert!(viewed.y.abs() < 1e-5);
        assert!((viewed.z + 5.0).abs() < 1e-5);
    }
}
