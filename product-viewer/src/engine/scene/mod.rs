//! Scene construction for the viewer session: camera, lights and controls.
pub mod viewer_scene;
