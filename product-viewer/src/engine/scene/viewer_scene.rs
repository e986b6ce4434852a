use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_LIGHT_BRIGHTNESS, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR,
    DIRECTIONAL_LIGHT_ILLUMINANCE, DIRECTIONAL_LIGHT_POSITION,
};

use crate::engine::camera::orbit_controls::OrbitControls;
use crate::engine::core::app_state::{
    ProductModel, SessionEvent, SessionState, ViewerCamera, ViewerSession, transition,
};

/// Build the session scene: camera at the configured offset, orbit controls
/// and lighting. Any previously attached product is removed first.
pub fn setup_scene(
    mut commands: Commands,
    mut session: ResMut<ViewerSession>,
    models: Query<Entity, With<ProductModel>>,
    state: Res<State<SessionState>>,
    mut next_state: ResMut<NextState<SessionState>>,
) {
    session.current_model = None;
    for entity in &models {
        commands.entity(entity).despawn();
    }

    let controls = OrbitControls::from_offset(Vec3::ZERO, session.config.camera_offset);
    spawn_camera(&mut commands, &controls);
    commands.insert_resource(controls);
    spawn_lighting(&mut commands);

    info!(
        "Viewer scene ready, camera at {}",
        session.config.camera_offset
    );
    transition(&state, &mut next_state, SessionEvent::SceneBuilt);
}

fn spawn_camera(commands: &mut Commands, controls: &OrbitControls) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        controls.transform(),
        ViewerCamera,
    ));
}

fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_LIGHT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: DIRECTIONAL_LIGHT_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(DIRECTIONAL_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
