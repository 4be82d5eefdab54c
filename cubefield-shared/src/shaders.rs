/// Embedded WGSL shader source strings for the cube grid pipeline.

pub const CUBE_EDGES: &str = include_str!("../shaders/cube_edges.wgsl");

/// Entry points inside [`CUBE_EDGES`].
pub const CUBE_EDGES_VS_MAIN: &str = "vs_main";
pub const CUBE_EDGES_FS_MAIN: &str = "fs_main";
