//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, static meshes, uniform
//! buffers, textures, pipeline boilerplate, and shader composition.

/// Static vertex/index buffers.
pub mod mesh;
/// Shared wgpu boilerplate helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Embedded WGSL sources.
pub mod shaders;
/// Image textures, render targets, and depth buffers.
pub mod texture;
/// Single-value uniform buffers.
pub mod uniform;
