//! Shape generation for scene primitives
//!
//! Every shape is emitted as a triangle list already projected to clip space.

use glam::{Mat4, Vec3, Vec4};
use std::f32::consts::PI;

use super::vertex::{Vertex, colors::shade};

fn push_quad(out: &mut Vec<Vertex>, view_proj: &Mat4, corners: [Vec3; 4], color: [f32; 4]) {
    let c: [Vec4; 4] = corners.map(|p| *view_proj * p.extend(1.0));
    // Two triangles
    out.push(Vertex::new(c[0], color));
    out.push(Vertex::new(c[1], color));
    out.push(Vertex::new(c[2], color));

    out.push(Vertex::new(c[2], color));
    out.push(Vertex::new(c[3], color));
    out.push(Vertex::new(c[0], color));
}

/// Flat ground tile on y = 0 centered at `z`
pub fn ground_tile(view_proj: &Mat4, z: f32, width: f32, length: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (hw, hl) = (width / 2.0, length / 2.0);
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        view_proj,
        [
            Vec3::new(-hw, 0.0, z + hl),
            Vec3::new(hw, 0.0, z + hl),
            Vec3::new(hw, 0.0, z - hl),
            Vec3::new(-hw, 0.0, z - hl),
        ],
        color,
    );
    vertices
}

/// Axis-aligned cube, emitting only the faces that point at `eye`.
/// Visible faces of a convex box never overlap, so no depth sort is needed
/// within a cube.
pub fn cube(view_proj: &Mat4, eye: Vec3, center: Vec3, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let h = size / 2.0;
    let (min, max) = (center - Vec3::splat(h), center + Vec3::splat(h));
    let mut vertices = Vec::with_capacity(18);

    // Top
    if eye.y > max.y {
        push_quad(
            &mut vertices,
            view_proj,
            [
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(min.x, max.y, min.z),
            ],
            color,
        );
    }

    // Front (+Z, toward the trailing camera) or back
    let z = if eye.z > max.z {
        Some(max.z)
    } else if eye.z < min.z {
        Some(min.z)
    } else {
        None
    };
    if let Some(z) = z {
        push_quad(
            &mut vertices,
            view_proj,
            [
                Vec3::new(min.x, min.y, z),
                Vec3::new(max.x, min.y, z),
                Vec3::new(max.x, max.y, z),
                Vec3::new(min.x, max.y, z),
            ],
            shade(color, 0.8),
        );
    }

    // Side
    let x = if eye.x > max.x {
        Some(max.x)
    } else if eye.x < min.x {
        Some(min.x)
    } else {
        None
    };
    if let Some(x) = x {
        push_quad(
            &mut vertices,
            view_proj,
            [
                Vec3::new(x, min.y, max.z),
                Vec3::new(x, min.y, min.z),
                Vec3::new(x, max.y, min.z),
                Vec3::new(x, max.y, max.z),
            ],
            shade(color, 0.6),
        );
    }

    vertices
}

/// Camera-facing filled disc (billboarded sphere)
pub fn disc(
    view: &Mat4,
    proj: &Mat4,
    center: Vec3,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let c = view.transform_point3(center);
    let project = |p: Vec3| *proj * p.extend(1.0);
    let center_clip = project(c);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center_clip, color));
        vertices.push(Vertex::new(
            project(c + Vec3::new(radius * theta1.cos(), radius * theta1.sin(), 0.0)),
            color,
        ));
        vertices.push(Vertex::new(
            project(c + Vec3::new(radius * theta2.cos(), radius * theta2.sin(), 0.0)),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::renderer::vertex::colors;
    use crate::sim::CameraRig;

    fn camera() -> Camera {
        let mut camera = Camera::new(800, 600);
        camera.follow(&CameraRig::behind(Vec3::new(0.0, 0.5, 0.0)));
        camera
    }

    #[test]
    fn test_cube_faces_toward_camera() {
        let camera = camera();
        let vp = camera.view_proj();
        // Same lane, ahead: top + front
        let v = cube(&vp, camera.eye, Vec3::new(0.0, 0.5, -20.0), 1.0, colors::OBSTACLE);
        assert_eq!(v.len(), 12);
        // Side lane: top + front + one side
        let v = cube(&vp, camera.eye, Vec3::new(2.0, 0.5, -20.0), 1.0, colors::OBSTACLE);
        assert_eq!(v.len(), 18);
    }

    #[test]
    fn test_disc_triangles() {
        let camera = camera();
        let v = disc(
            &camera.view(),
            &camera.projection(),
            Vec3::new(0.0, 0.5, -10.0),
            0.3,
            colors::COIN,
            16,
        );
        assert_eq!(v.len(), 48);
        assert!(v.iter().all(|v| v.position[3] > 0.0));
    }

    #[test]
    fn test_ground_tile() {
        let camera = camera();
        let v = ground_tile(&camera.view_proj(), -100.0, 10.0, 100.0, colors::GROUND);
        assert_eq!(v.len(), 6);
    }
}
