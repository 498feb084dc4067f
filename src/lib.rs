// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Real-time rendering playground built on wgpu.
//!
//! glearn hosts a handful of small scenes (colored triangles, a textured
//! quad, textured cubes, Phong/Gouraud lighting, lighting maps, and fading
//! line trails) behind a first-person fly camera.
//!
//! # Key entry points
//!
//! - [`camera::Camera`] - yaw/pitch fly camera producing view and projection
//!   matrices
//! - [`scene::SceneKind`] - selects and builds a [`scene::Scene`]
//! - [`input::InputProcessor`] - turns window events into camera motion and
//!   commands
//! - [`options::Options`] - runtime configuration (window, camera, lighting,
//!   trails, assets, keybindings)
//! - `Viewer` - standalone winit window (feature `viewer`)
//!
//! # Architecture
//!
//! The viewer owns one [`gpu::render_context::RenderContext`], the camera
//! controller, and the active scene. Each frame it applies held movement
//! keys with the frame's delta time, uploads the camera uniform, lets the
//! scene update its own uniforms, and records the scene's passes into a
//! single command encoder. Shaders are WGSL composed with `naga_oil` so
//! scenes share the camera and lighting modules.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::GlearnError;
pub use options::Options;
pub use scene::SceneKind;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
