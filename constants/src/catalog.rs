use bevy::math::Vec3;

/// Camera offset used when a product key has no catalog entry.
pub const DEFAULT_CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 20.0);

pub struct CatalogEntry {
    pub id: u8,
    pub name: &'static str,
    /// Relative URL of the binary glTF file, as handed to the viewer page.
    pub asset_path: &'static str,
    /// Initial camera position; the camera always looks at the origin.
    pub camera_offset: Vec3,
}

pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: 1,
        name: "Apple Logo",
        asset_path: "./Products/appleLogo.glb",
        camera_offset: Vec3::new(0.0, 0.0, 20.0),
    },
    CatalogEntry {
        id: 2,
        name: "iPhone",
        asset_path: "./Products/appleIphone.glb",
        camera_offset: Vec3::new(0.0, 0.0, 2.0),
    },
    CatalogEntry {
        id: 3,
        name: "AirPods",
        asset_path: "./Products/airPods.glb",
        camera_offset: Vec3::new(0.0, -5.0, 15.0),
    },
    CatalogEntry {
        id: 4,
        name: "Vision Pro",
        asset_path: "./Products/appleVisionPro.glb",
        camera_offset: Vec3::new(0.0, 0.0, 0.4),
    },
    CatalogEntry {
        id: 5,
        name: "Apple Watch",
        asset_path: "./Products/appleWatch.glb",
        camera_offset: Vec3::new(0.0, 0.0, 110.0),
    },
];

/// Strict lookup used by the launcher. Unknown ids have no entry.
pub fn find_entry(id: i32) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| i32::from(entry.id) == id)
}

/// Lenient camera lookup keyed by the raw `modelNum` query value.
///
/// The key must be the exact decimal form of a catalog id ("5", not "05" or
/// " 5"); anything else falls back to [`DEFAULT_CAMERA_OFFSET`].
pub fn camera_offset_for_key(key: &str) -> Vec3 {
    CATALOG
        .iter()
        .find(|entry| entry.id.to_string() == key)
        .map_or(DEFAULT_CAMERA_OFFSET, |entry| entry.camera_offset)
}
