//! Cubefield shared types.
//!
//! Platform-independent pieces used by both the wgpu renderer and the WASM
//! web runtime: colors, ray/box math, the box mesh, GPU buffer layouts and
//! the edge shader.

pub mod color;
pub mod geometry;
pub mod math;
pub mod shaders;
pub mod uniforms;
