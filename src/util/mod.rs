//! Shared utilities for the viewer.

/// Frame delta time, FPS smoothing, and frame capping.
pub mod frame_timing;
