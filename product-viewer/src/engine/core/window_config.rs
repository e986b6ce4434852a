use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

/// Window backed by a fresh canvas appended to the document body, sized once
/// to the viewport at startup.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        let mut window = Window {
            canvas: None,
            fit_canvas_to_parent: false,
            prevent_default_event_handling: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        };
        if let Some((width, height)) = viewport_size() {
            window.resolution = WindowResolution::new(width, height);
        }
        window
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Product Viewer".into(),
            resolution: WindowResolution::new(1280.0, 720.0),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn viewport_size() -> Option<(f32, f32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as f32, height as f32))
}
