//! Cubefield wgpu backend.
//!
//! Draws the instanced cube grid in a single pass. The surface comes from any
//! `wgpu::SurfaceTarget`, so the same renderer serves a browser canvas
//! (WebGPU, or WebGL2 as a fallback) and native windows.

mod renderer;

pub use renderer::{Renderer, RendererError};
pub use wgpu::SurfaceTarget;
