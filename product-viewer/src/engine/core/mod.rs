//! Core application setup and session state management.
//!
//! Handles the app lifecycle, window configuration and state transitions for
//! both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
pub mod app_setup;

/// Session state machine, session resource and entity markers.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
pub mod window_config;
