use cubefield_shared::math::{self, Ray};
use glam::{Mat4, Vec2, Vec3};

/// Perspective camera that always looks at `target`.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_y: fov_degrees.to_radians(),
            aspect: sanitize_aspect(aspect),
            near,
            far,
        }
    }

    pub fn set_aspect(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = sanitize_aspect((width / height) as f32);
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Projection with a 0..1 depth range, as wgpu expects.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Ray from the eye through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let through = math::unproject(&inv, ndc.extend(0.5));
        Ray::new(self.position, through - self.position)
    }

    /// World point to NDC (x, y in [-1, 1] when visible).
    pub fn project(&self, world: Vec3) -> Vec2 {
        self.view_proj().project_point3(world).truncate()
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    fn looking_down_z() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        camera.target = Vec3::ZERO;
        camera
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = looking_down_z();
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert!(approx_vec(ray.origin, camera.position));
        assert!(approx_vec(ray.direction, Vec3::NEG_Z), "dir={:?}", ray.direction);
    }

    #[test]
    fn test_right_edge_ray_leans_right() {
        let camera = looking_down_z();
        let ray = camera.ray_from_ndc(Vec2::new(1.0, 0.0));
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.z < 0.0);
    }

    #[test]
    fn test_project_then_ray_passes_through_point() {
        let mut camera = PerspectiveCamera::new(75.0, 1.5, 0.1, 1000.0);
        camera.position = Vec3::new(20.0, 20.0, 20.0);
        camera.target = Vec3::new(35.0, -15.0, 30.0);

        let point = Vec3::new(30.0, 0.0, 25.0);
        let ndc = camera.project(point);
        let ray = camera.ray_from_ndc(ndc);
        let to_point = (point - ray.origin).normalize();
        assert!(approx_vec(ray.direction, to_point), "{:?} vs {to_point:?}", ray.direction);
    }

    #[test]
    fn test_set_aspect_ignores_degenerate_sizes() {
        let mut camera = looking_down_z();
        camera.set_aspect(800.0, 0.0);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
        camera.set_aspect(800.0, 400.0);
        assert!((camera.aspect - 2.0).abs() < 1e-6);
    }
}
