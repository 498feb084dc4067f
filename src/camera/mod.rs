//! Camera system for 3D scene viewing.
//!
//! Provides a first-person fly camera driven by yaw/pitch angles, plus the
//! controller that owns its GPU uniform.

/// Fly camera controller owning the camera uniform and bind group.
pub mod controller;
/// Core camera struct, movement directions, and GPU uniform type.
pub mod core;

pub use self::core::{Camera, CameraMovement, CameraUniform};
pub use controller::CameraController;
