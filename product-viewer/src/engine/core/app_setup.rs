use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use constants::paths::ASSET_ROOT;

use crate::bootstrap::SessionConfig;
use crate::engine::camera::orbit_controls::orbit_controller;
use crate::engine::core::app_state::{SessionState, ViewerSession};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::model_loader::{poll_model_load, submit_model_load};
use crate::engine::scene::viewer_scene::setup_scene;
use crate::rpc::web_rpc::WebRpcPlugin;

/// Build the viewer app for one session.
///
/// The frame loop runs in every session state so the scene stays orbitable
/// while loading and after a failed load.
pub fn create_app(config: SessionConfig) -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(WebRpcPlugin)
        .init_state::<SessionState>()
        .insert_resource(ViewerSession::new(config));

    app.add_systems(Startup, setup_scene)
        .add_systems(OnEnter(SessionState::SceneReady), submit_model_load)
        .add_systems(
            Update,
            poll_model_load.run_if(in_state(SessionState::Loading)),
        )
        .add_systems(Update, orbit_controller);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        file_path: ASSET_ROOT.to_string(),
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "info,wgpu_core=warn,wgpu_hal=warn,naga=warn".into(),
        level: bevy::log::Level::INFO,
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
