//! Axis-aligned bounding box collision
//!
//! Every collider in the game is a box (or the box around a sphere), so the
//! whole detector is a per-axis interval overlap test.

use glam::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box centered on `center` extending `half_extents` along each axis
    #[inline]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Overlap test; touching faces count as intersecting
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(center: Vec3) -> Aabb {
        Aabb::from_center(center, Vec3::splat(0.5))
    }

    #[test]
    fn test_overlap() {
        let a = unit_box(Vec3::new(0.0, 0.5, 0.0));
        let b = unit_box(Vec3::new(0.3, 0.7, -0.4));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_faces_intersect() {
        let a = unit_box(Vec3::ZERO);
        let b = unit_box(Vec3::new(1.0, 0.0, 0.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_adjacent_lanes_miss() {
        let a = unit_box(Vec3::new(0.0, 0.5, 0.0));
        let b = unit_box(Vec3::new(2.0, 0.5, 0.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_jump_clears_obstacle() {
        let obstacle = unit_box(Vec3::new(0.0, 0.5, 0.0));
        let airborne = unit_box(Vec3::new(0.0, 1.6, 0.0));
        assert!(!airborne.intersects(&obstacle));
    }

    #[test]
    fn test_coin_sphere_box() {
        let player = unit_box(Vec3::new(0.0, 0.5, 0.0));
        let coin = Aabb::from_center(Vec3::new(0.0, 0.5, -0.8), Vec3::splat(0.3));
        assert!(player.intersects(&coin));
        assert!((coin.max - coin.min - Vec3::splat(0.6)).length() < 1e-6);
        let coin = Aabb::from_center(Vec3::new(0.0, 0.5, -0.9), Vec3::splat(0.3));
        assert!(!player.intersects(&coin));
        assert!((coin.max.z + 0.6).abs() < 1e-6);
    }
}
