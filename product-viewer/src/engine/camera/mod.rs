//! Orbit camera controls for inspecting a single product.
//!
//! Spherical orbit around a target with damped rotate and pan, and wheel zoom.

/// Orbit controls resource and the per-frame controller system.
pub mod orbit_controls;
