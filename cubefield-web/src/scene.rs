use cubefield_shared::color::Color;
use cubefield_shared::math::{Aabb, Ray};
use cubefield_shared::uniforms::CubeInstance;
use glam::Vec3;

use crate::random::RandomSource;

/// One cube of the grid. Identity is its index in [`CubeGrid`].
#[derive(Debug, Clone)]
pub struct Cube {
    pub position: Vec3,
    pub color: Color,
}

/// Fixed grid of equally sized cubes, created once and only recolored afterwards.
pub struct CubeGrid {
    cubes: Vec<Cube>,
    size: f32,
}

impl CubeGrid {
    /// `rows × columns` cubes; cube `(i, j)` sits at `(spacing·i, 0, spacing·j)`.
    pub fn new(rows: u32, columns: u32, spacing: f32, size: f32, color: Color) -> Self {
        let mut cubes = Vec::with_capacity(rows as usize * columns as usize);
        for i in 0..rows {
            for j in 0..columns {
                cubes.push(Cube {
                    position: Vec3::new(spacing * i as f32, 0.0, spacing * j as f32),
                    color,
                });
            }
        }
        Self { cubes, size }
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        self.cubes.get(index).map(|c| c.color)
    }

    pub fn set_color(&mut self, index: usize, color: Color) {
        if let Some(cube) = self.cubes.get_mut(index) {
            cube.color = color;
        }
    }

    pub fn set_all_colors(&mut self, color: Color) {
        for cube in &mut self.cubes {
            cube.color = color;
        }
    }

    /// Give every cube an independent random color.
    pub fn randomize_colors(&mut self, rng: &mut dyn RandomSource) {
        for cube in &mut self.cubes {
            cube.color = Color::from_unit_random(rng.next_f32());
        }
    }

    /// Nearest cube hit by `ray` as `(index, distance)`.
    pub fn intersect(&self, ray: &Ray) -> Option<(usize, f32)> {
        self.cubes
            .iter()
            .enumerate()
            .filter_map(|(i, cube)| {
                let aabb = Aabb::from_center_size(cube.position, self.size);
                ray.intersect_aabb(&aabb).map(|t| (i, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Fill `out` with GPU instance data for every cube.
    pub fn write_instances(&self, out: &mut Vec<CubeInstance>) {
        out.clear();
        out.extend(self.cubes.iter().map(|c| CubeInstance {
            offset: c.position.to_array(),
            color: c.color.to_array(),
        }));
    }
}
