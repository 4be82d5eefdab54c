use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::PerspectiveCamera;

const POLAR_EPSILON: f32 = 1e-6;
/// Distance factor per wheel notch.
const ZOOM_SCALE: f32 = 0.95;

/// Radius / azimuth (around +Y, from +Z) / polar angle (from +Y).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self { radius, theta: 0.0, phi: 0.0 };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

/// Orbit the camera around a fixed target. Rotation and zoom start disabled;
/// `update` still runs every frame so the camera stays aimed at the target
/// and inside the distance limits.
#[derive(Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
}

impl OrbitControls {
    pub fn new(target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        Self {
            target,
            min_distance,
            max_distance,
            enable_rotate: false,
            enable_zoom: false,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    pub fn enable(&mut self) {
        self.enable_rotate = true;
        self.enable_zoom = true;
    }

    pub fn is_interactive(&self) -> bool {
        self.enable_rotate || self.enable_zoom
    }

    /// Queue a rotation from a pointer drag of `delta` CSS pixels.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        if !self.enable_rotate || viewport_height <= 0.0 {
            return;
        }
        self.pending_theta -= TAU * delta.x / viewport_height;
        self.pending_phi -= TAU * delta.y / viewport_height;
    }

    /// Queue a zoom step; negative `delta_y` (wheel up) moves closer.
    pub fn zoom(&mut self, delta_y: f32) {
        if !self.enable_zoom || delta_y == 0.0 {
            return;
        }
        if delta_y < 0.0 {
            self.pending_scale *= ZOOM_SCALE;
        } else {
            self.pending_scale /= ZOOM_SCALE;
        }
    }

    /// Apply queued input, clamp, and aim the camera at the target.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        spherical.theta += self.pending_theta;
        spherical.phi = (spherical.phi + self.pending_phi).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        spherical.radius =
            (spherical.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;
    }
}
