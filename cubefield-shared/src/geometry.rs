use crate::uniforms::CubeVertex;

/// Indexed box mesh centered at the origin.
///
/// Each face has its own four corners so UVs run 0..1 per face, which the
/// edge shader relies on to draw the outline.
pub struct BoxGeometry {
    pub vertices: Vec<CubeVertex>,
    pub indices: Vec<u16>,
}

impl BoxGeometry {
    pub fn new(size: f32) -> Self {
        let h = size * 0.5;

        // (normal axis, sign, u axis, v axis), u × v points along the outward normal
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),  // +X
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),  // -X
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),  // +Y
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),  // -Y
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),   // +Z
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // -Z
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u_axis, v_axis) in faces {
            let base = vertices.len() as u16;
            for (u, v) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
                let su = u * 2.0 - 1.0;
                let sv = v * 2.0 - 1.0;
                let position = [
                    (normal[0] + u_axis[0] * su + v_axis[0] * sv) * h,
                    (normal[1] + u_axis[1] * su + v_axis[1] * sv) * h,
                    (normal[2] + u_axis[2] * su + v_axis[2] * sv) * h,
                ];
                vertices.push(CubeVertex { position, uv: [u, v] });
            }
            // Counter-clockwise seen from outside
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_box_counts() {
        let geom = BoxGeometry::new(5.0);
        assert_eq!(geom.vertices.len(), 24);
        assert_eq!(geom.index_count(), 36);
        assert!(geom.indices.iter().all(|&i| (i as usize) < geom.vertices.len()));
    }

    #[test]
    fn test_box_extent() {
        let geom = BoxGeometry::new(5.0);
        for v in &geom.vertices {
            for c in v.position {
                assert!((c.abs() - 2.5).abs() < 1e-6, "corner component {c}");
            }
        }
    }

    #[test]
    fn test_box_winding_faces_outward() {
        let geom = BoxGeometry::new(2.0);
        for tri in geom.indices.chunks(3) {
            let a = Vec3::from(geom.vertices[tri[0] as usize].position);
            let b = Vec3::from(geom.vertices[tri[1] as usize].position);
            let c = Vec3::from(geom.vertices[tri[2] as usize].position);
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward-facing triangle {tri:?}");
        }
    }

    #[test]
    fn test_box_uvs_span_each_face() {
        let geom = BoxGeometry::new(1.0);
        for face in geom.vertices.chunks(4) {
            let us: Vec<f32> = face.iter().map(|v| v.uv[0]).collect();
            let vs: Vec<f32> = face.iter().map(|v| v.uv[1]).collect();
            assert!(us.contains(&0.0) && us.contains(&1.0));
            assert!(vs.contains(&0.0) && vs.contains(&1.0));
        }
    }
}
