use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::render_settings::MODEL_SCALE;

use crate::engine::core::app_state::{
    ProductModel, SessionEvent, SessionState, ViewerSession, transition,
};
use crate::engine::loading::material_override::normalize_materials_on_ready;
use crate::error::ViewerError;

/// Submit the asynchronous product load once the scene is ready.
pub fn submit_model_load(
    mut session: ResMut<ViewerSession>,
    asset_server: Res<AssetServer>,
    state: Res<State<SessionState>>,
    mut next_state: ResMut<NextState<SessionState>>,
) {
    let path = session.config.engine_asset_path();
    info!("Loading product model from: {}", path);
    session.model = Some(asset_server.load::<Gltf>(path));
    session.failure = None;
    transition(&state, &mut next_state, SessionEvent::LoadSubmitted);
}

/// Watch the in-flight load and attach the product or record the failure.
pub fn poll_model_load(
    mut commands: Commands,
    mut session: ResMut<ViewerSession>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    state: Res<State<SessionState>>,
    mut next_state: ResMut<NextState<SessionState>>,
) {
    let Some(handle) = session.model.clone() else {
        return;
    };

    match asset_server.get_load_state(&handle) {
        Some(LoadState::Loaded) => {
            let Some(gltf) = gltfs.get(&handle) else {
                return;
            };
            match default_scene(gltf) {
                Some(scene) => {
                    attach_model(&mut commands, &mut session, scene);
                    transition(&state, &mut next_state, SessionEvent::LoadSucceeded);
                }
                None => {
                    record_load_failure(&mut session, "asset contains no scene".to_string());
                    transition(&state, &mut next_state, SessionEvent::LoadFailed);
                }
            }
        }
        Some(LoadState::Failed(err)) => {
            record_load_failure(&mut session, err.to_string());
            transition(&state, &mut next_state, SessionEvent::LoadFailed);
        }
        _ => {}
    }
}

fn default_scene(gltf: &Gltf) -> Option<Handle<Scene>> {
    gltf.default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
}

/// Attach `scene` as the session's only product, scaled uniformly.
///
/// Any previously attached product is despawned first. Materials are
/// normalised when the scene instance finishes spawning.
pub fn attach_model(
    commands: &mut Commands,
    session: &mut ViewerSession,
    scene: Handle<Scene>,
) -> Entity {
    if let Some(previous) = session.current_model.take() {
        if let Ok(mut entity) = commands.get_entity(previous) {
            entity.despawn();
        }
    }

    let entity = commands
        .spawn((
            Name::new("product"),
            SceneRoot(scene),
            Transform::from_scale(Vec3::splat(MODEL_SCALE)),
            ProductModel,
        ))
        .observe(normalize_materials_on_ready)
        .id();

    session.current_model = Some(entity);
    info!("Product attached to scene");
    entity
}

/// Log a load failure once and keep it on the session. Nothing is attached
/// and no retry is scheduled.
pub fn record_load_failure(session: &mut ViewerSession, reason: String) -> ViewerError {
    let err = ViewerError::AssetLoadFailure {
        path: session.config.asset_path.clone(),
        reason,
    };
    error!("{}", err);
    session.failure = Some(err.to_string());
    session.model = None;
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::SessionConfig;
    use bevy::ecs::system::RunSystemOnce;

    fn session_world() -> World {
        let mut world = World::new();
        world.insert_resource(ViewerSession::new(SessionConfig {
            asset_path: "./Products/appleVisionPro.glb".into(),
            camera_offset: Vec3::new(0.0, 0.0, 0.4),
        }));
        world
    }

    fn attach(world: &mut World) -> Entity {
        world
            .run_system_once(|mut commands: Commands, mut session: ResMut<ViewerSession>| {
                attach_model(&mut commands, &mut session, Handle::default())
            })
            .expect("attach ran")
    }

    #[test]
    fn attached_model_is_scaled_twice() {
        let mut world = session_world();
        let entity = attach(&mut world);

        let transform = world.get::<Transform>(entity).expect("transform");
        assert_eq!(transform.scale, Vec3::splat(2.0));
        assert!(world.get::<ProductModel>(entity).is_some());
        assert_eq!(
            world.resource::<ViewerSession>().current_model,
            Some(entity)
        );
    }

    #[test]
    fn reattaching_keeps_a_single_model() {
        let mut world = session_world();
        let first = attach(&mut world);
        let second = attach(&mut world);

        assert_ne!(first, second);
        assert!(world.get_entity(first).is_err());

        let mut models = world.query_filtered::<Entity, With<ProductModel>>();
        let remaining: Vec<Entity> = models.iter(&world).collect();
        assert_eq!(remaining, vec![second]);
    }

    #[test]
    fn failure_is_recorded_without_attaching() {
        let mut world = session_world();
        let err = {
            let mut session = world.resource_mut::<ViewerSession>();
            record_load_failure(&mut session, "unexpected end of file".into())
        };

        assert!(matches!(err, ViewerError::AssetLoadFailure { .. }));
        let session = world.resource::<ViewerSession>();
        assert!(session.model.is_none());
        assert!(session.current_model.is_none());
        assert!(
            session
                .failure
                .as_deref()
                .is_some_and(|message| message.contains("unexpected end of file"))
        );

        let mut models = world.query_filtered::<Entity, With<ProductModel>>();
        assert_eq!(models.iter(&world).count(), 0);
    }

    const TEST_ASSET_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/test_assets");

    /// Headless app running the real load pipeline against `test_assets/`.
    fn loading_app(asset_path: &str) -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin {
                file_path: TEST_ASSET_ROOT.into(),
                ..default()
            },
            bevy::state::app::StatesPlugin,
            bevy::transform::TransformPlugin,
            bevy::scene::ScenePlugin,
        ))
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .init_asset::<Image>()
        .init_asset::<bevy::animation::AnimationClip>()
        .register_type::<Name>()
        .register_type::<Visibility>()
        .register_type::<InheritedVisibility>()
        .register_type::<ViewVisibility>()
        .register_type::<bevy::render::view::visibility::VisibilityClass>()
        .register_type::<bevy::render::primitives::Aabb>()
        .register_type::<Mesh3d>()
        .register_type::<MeshMaterial3d<StandardMaterial>>()
        .add_plugins(bevy::gltf::GltfPlugin::default())
        .init_state::<SessionState>()
        .insert_resource(ViewerSession::new(SessionConfig {
            asset_path: asset_path.into(),
            camera_offset: Vec3::ZERO,
        }))
        .add_systems(OnEnter(SessionState::SceneReady), submit_model_load)
        .add_systems(
            Update,
            poll_model_load.run_if(in_state(SessionState::Loading)),
        );
        app.finish();
        app.cleanup();
        app.world_mut()
            .resource_mut::<NextState<SessionState>>()
            .set(SessionState::SceneReady);
        app
    }

    fn update_until(app: &mut App, done: impl Fn(&mut World) -> bool) {
        for _ in 0..500 {
            app.update();
            if done(app.world_mut()) {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("load did not settle");
    }

    fn session_state(world: &World) -> SessionState {
        *world.resource::<State<SessionState>>().get()
    }

    fn overridden(material: &StandardMaterial) -> bool {
        material.perceptual_roughness == 1.0 && material.metallic == 0.7
    }

    #[test]
    fn missing_asset_ends_in_failed_without_a_model() {
        let mut app = loading_app("./Products/does_not_exist.glb");
        update_until(&mut app, |world| {
            session_state(world) == SessionState::Failed
        });

        let world = app.world_mut();
        let session = world.resource::<ViewerSession>();
        assert!(session.model.is_none());
        assert!(session.current_model.is_none());
        assert!(session.failure.as_deref().is_some_and(|message| {
            message.starts_with("An error occurred while loading the model:")
                && message.contains("does_not_exist.glb")
        }));

        let mut models = world.query_filtered::<Entity, With<ProductModel>>();
        assert_eq!(models.iter(world).count(), 0);
    }

    #[test]
    fn loaded_asset_is_attached_scaled_with_materials_overridden() {
        let mut app = loading_app("./Products/triangle.gltf");
        update_until(&mut app, |world| {
            let materials = world.resource::<Assets<StandardMaterial>>();
            session_state(world) == SessionState::Attached
                && !materials.is_empty()
                && materials.iter().all(|(_, material)| overridden(material))
        });

        let world = app.world_mut();
        assert!(world.resource::<ViewerSession>().failure.is_none());

        let mut models = world.query_filtered::<&Transform, With<ProductModel>>();
        let scales: Vec<Vec3> = models.iter(world).map(|transform| transform.scale).collect();
        assert_eq!(scales, vec![Vec3::splat(2.0)]);

        let mut meshes = world.query::<&MeshMaterial3d<StandardMaterial>>();
        let handles: Vec<_> = meshes.iter(world).map(|mesh| mesh.0.clone()).collect();
        assert!(!handles.is_empty());
        let materials = world.resource::<Assets<StandardMaterial>>();
        for handle in handles {
            assert!(materials.get(&handle).is_some_and(overridden));
        }
    }
}
