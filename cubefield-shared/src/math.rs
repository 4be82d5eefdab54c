use glam::{Mat4, Vec2, Vec3, Vec4};

/// A half-line starting at `origin` heading along unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Slab test against an axis-aligned box.
    ///
    /// Returns the distance along the ray to the entry point. Boxes behind the
    /// origin, or containing it, are not hit: only front faces count.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for axis in 0..3 {
            let o = self.origin[axis];
            let d = self.direction[axis];
            let lo = aabb.min[axis];
            let hi = aabb.max[axis];

            if d.abs() < 1e-12 {
                // Parallel to this slab: must already be inside it
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (t0, t1) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_enter < 0.0 {
            return None;
        }
        Some(t_enter)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Cube of edge length `size` centered at `center`.
    pub fn from_center_size(center: Vec3, size: f32) -> Self {
        let half = Vec3::splat(size.abs() * 0.5);
        Self { min: center - half, max: center + half }
    }
}

/// True when `ndc` lies inside the [-1, 1] viewport square.
pub fn ndc_in_viewport(ndc: Vec2) -> bool {
    ndc.is_finite() && ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0
}

/// Transform a clip-space point back to world space through the inverse view-projection.
pub fn unproject(inv_view_proj: &Mat4, ndc: Vec3) -> Vec3 {
    let p = *inv_view_proj * Vec4::new(ndc.x, ndc.y, ndc.z, 1.0);
    if p.w.abs() < 1e-12 {
        return p.truncate();
    }
    p.truncate() / p.w
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // ── Ray::intersect_aabb ──

    #[test]
    fn test_ray_hits_box_from_above() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, 5.0);
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        let t = ray.intersect_aabb(&aabb).expect("should hit");
        assert!(approx_eq(t, 7.5), "t={t}");
        assert!(approx_eq((ray.origin + ray.direction * t).y, 2.5));
    }

    #[test]
    fn test_ray_misses_box_to_the_side() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, 5.0);
        let ray = Ray::new(Vec3::new(10.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!(ray.intersect_aabb(&aabb).is_none());
    }

    #[test]
    fn test_ray_ignores_box_behind_origin() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, 5.0);
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        assert!(ray.intersect_aabb(&aabb).is_none());
    }

    #[test]
    fn test_ray_from_inside_box_is_not_a_hit() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, 5.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(ray.intersect_aabb(&aabb).is_none());
    }

    #[test]
    fn test_ray_diagonal_hit_distance() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, 2.0);
        let origin = Vec3::new(5.0, 5.0, 5.0);
        let ray = Ray::new(origin, -origin);
        let t = ray.intersect_aabb(&aabb).expect("should hit corner region");
        // Entry at (1, 1, 1)
        assert!(approx_eq(t, (origin - Vec3::ONE).length()), "t={t}");
    }

    #[test]
    fn test_ray_parallel_outside_slab() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::new(-5.0, 3.0, 0.0), Vec3::X);
        assert!(ray.intersect_aabb(&aabb).is_none());
    }

    // ── Aabb ──

    #[test]
    fn test_aabb_from_center_size() {
        let aabb = Aabb::from_center_size(Vec3::new(10.0, 0.0, 5.0), -4.0);
        assert_eq!(aabb.min, Vec3::new(8.0, -2.0, 3.0));
        assert_eq!(aabb.max, Vec3::new(12.0, 2.0, 7.0));
    }

    // ── ndc_in_viewport ──

    #[test]
    fn test_ndc_in_viewport() {
        assert!(ndc_in_viewport(Vec2::ZERO));
        assert!(ndc_in_viewport(Vec2::new(-1.0, 1.0)));
        assert!(!ndc_in_viewport(Vec2::new(-100000.0, -100000.0)));
        assert!(!ndc_in_viewport(Vec2::new(1.01, 0.0)));
        assert!(!ndc_in_viewport(Vec2::new(f32::NAN, 0.0)));
    }

    // ── unproject ──

    #[test]
    fn test_unproject_center_lies_on_view_axis() {
        let proj = Mat4::perspective_rh(PI / 3.0, 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let inv = (proj * view).inverse();
        let p = unproject(&inv, Vec3::new(0.0, 0.0, 0.5));
        assert!(approx_eq(p.x, 0.0) && approx_eq(p.y, 0.0));
        assert!(p.z < 5.0);
    }
}
