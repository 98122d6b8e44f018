//! Perspective follow camera
//!
//! Placement comes from the simulation's [`CameraRig`]; the projection only
//! depends on the viewport, so a resize just recomputes the aspect ratio.

use glam::{Mat4, Vec3, Vec4};

use crate::consts::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};
use crate::sim::CameraRig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            eye: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            fov_y: CAMERA_FOV_DEG.to_radians(),
            aspect: 1.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        };
        camera.set_viewport(width, height);
        camera
    }

    /// Recompute the aspect ratio; zero-sized viewports are ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn follow(&mut self, rig: &CameraRig) {
        self.eye = rig.eye;
        self.target = rig.target;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// World point to clip space
    #[inline]
    pub fn to_clip(&self, view_proj: &Mat4, point: Vec3) -> Vec4 {
        *view_proj * point.extend(1.0)
    }

    /// World point to normalized device coordinates; None if behind the eye
    pub fn to_ndc(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.to_clip(&self.view_proj(), point);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::new(800, 600);
        assert!((camera.aspect - 4.0 / 3.0).abs() < 1e-6);
        camera.set_viewport(1920, 1080);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
        camera.set_viewport(0, 1080);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut camera = Camera::new(800, 600);
        let rig = CameraRig::behind(Vec3::new(2.0, 0.5, -40.0));
        camera.follow(&rig);
        let ndc = camera.to_ndc(rig.target).unwrap();
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_ahead_is_above_behind_is_none() {
        let mut camera = Camera::new(800, 600);
        camera.follow(&CameraRig::behind(Vec3::new(0.0, 0.5, 0.0)));
        // Ground far ahead sits higher on screen than the player
        let ahead = camera.to_ndc(Vec3::new(0.0, 0.0, -50.0)).unwrap();
        assert!(ahead.y > 0.0);
        // Behind the eye
        assert!(camera.to_ndc(Vec3::new(0.0, 10.5, 30.0)).is_none());
    }
}
