use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::render_settings::{MODEL_METALNESS, MODEL_ROUGHNESS};

/// Force the viewer's roughness and metalness onto every mesh material under
/// `root`, the root included. Authored values are discarded.
///
/// Returns the number of mesh entities visited.
pub fn apply_material_override(
    root: Entity,
    children: &Query<&Children>,
    mesh_materials: &Query<&MeshMaterial3d<StandardMaterial>>,
    materials: &mut Assets<StandardMaterial>,
) -> usize {
    let mut overridden = 0;
    for entity in std::iter::once(root).chain(children.iter_descendants(root)) {
        let Ok(mesh_material) = mesh_materials.get(entity) else {
            continue;
        };
        if let Some(material) = materials.get_mut(&mesh_material.0) {
            material.perceptual_roughness = MODEL_ROUGHNESS;
            material.metallic = MODEL_METALNESS;
            overridden += 1;
        }
    }
    overridden
}

/// Observer run once the product's scene instance has been spawned.
pub fn normalize_materials_on_ready(
    trigger: Trigger<SceneInstanceReady>,
    children: Query<&Children>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let count = apply_material_override(
        trigger.target(),
        &children,
        &mesh_materials,
        &mut materials,
    );
    info!("Normalised materials on {count} product meshes");
}
