//! GPU buffer layouts shared by the renderer and the runtime.
//! Field order and padding must match `shaders/cube_edges.wgsl`.

use bytemuck::{Pod, Zeroable};

/// One corner of the shared box mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Per-cube instance data: world offset and flat color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CubeInstance {
    pub offset: [f32; 3],
    pub color: [f32; 3],
}

/// Per-frame uniforms (group 0, binding 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub thickness: f32,
    pub _pad: [f32; 3],
}

impl FrameUniforms {
    pub fn new(view_proj: glam::Mat4, thickness: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            thickness,
            _pad: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<CubeVertex>(), 20);
        assert_eq!(std::mem::size_of::<CubeInstance>(), 24);
        // mat4x4 + vec4-sized tail, 16-byte aligned for uniform buffers
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 80);
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
    }
}
