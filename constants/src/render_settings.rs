use bevy::math::Vec3;

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Fraction of the pending orbit delta applied per frame.
pub const ORBIT_DAMPING_FACTOR: f32 = 0.25;
pub const ORBIT_ZOOM_ENABLED: bool = true;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
pub const ORBIT_PAN_SPEED: f32 = 0.001;
/// Scale applied to the orbit radius per wheel line.
pub const ORBIT_ZOOM_STEP: f32 = 0.95;
pub const ORBIT_MIN_DISTANCE: f32 = 0.01;
pub const ORBIT_MAX_DISTANCE: f32 = CAMERA_FAR;

/// Ambient intensity 2 expressed in Bevy's ambient brightness units.
pub const AMBIENT_LIGHT_BRIGHTNESS: f32 = 2.0 * 250.0;
/// Directional intensity 5 expressed in lux.
pub const DIRECTIONAL_LIGHT_ILLUMINANCE: f32 = 5.0 * 2000.0;
pub const DIRECTIONAL_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);

/// Uniform scale applied to every loaded product.
pub const MODEL_SCALE: f32 = 2.0;
/// Material values forced onto every mesh of a loaded product.
pub const MODEL_ROUGHNESS: f32 = 1.0;
pub const MODEL_METALNESS: f32 = 0.7;
