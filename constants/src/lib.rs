//! Shared configuration for the product viewer.
//!
//! Holds the product catalog, render tuning values and the page and query
//! parameter names shared by the viewer page and the launcher.

pub mod catalog;
pub mod paths;
pub mod render_settings;
