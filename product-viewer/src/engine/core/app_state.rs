use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::bootstrap::SessionConfig;

/// Viewer session lifecycle.
#[derive(States, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum SessionState {
    #[default]
    Uninitialized,
    SceneReady,
    Loading,
    Attached,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SceneBuilt,
    LoadSubmitted,
    LoadSucceeded,
    LoadFailed,
}

impl SessionState {
    /// Next state for `event`, or `None` when the event is not valid here.
    ///
    /// A rebuilt scene restarts the lifecycle from any settled state.
    pub fn advance(self, event: SessionEvent) -> Option<Self> {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Uninitialized | Attached | Failed, SceneBuilt) => Some(SceneReady),
            (SceneReady, LoadSubmitted) => Some(Loading),
            (Loading, LoadSucceeded) => Some(Attached),
            (Loading, LoadFailed) => Some(Failed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::SceneReady => "scene_ready",
            Self::Loading => "loading",
            Self::Attached => "attached",
            Self::Failed => "failed",
        }
    }
}

/// Apply a lifecycle event, logging rejected transitions.
pub fn transition(
    current: &State<SessionState>,
    next_state: &mut NextState<SessionState>,
    event: SessionEvent,
) {
    match current.get().advance(event) {
        Some(next) => {
            info!("→ Session {} → {} ({:?})", current.get().as_str(), next.as_str(), event);
            next_state.set(next);
        }
        None => warn!(
            "Ignoring {:?} while session is {}",
            event,
            current.get().as_str()
        ),
    }
}

/// Marker for the root entity of the currently attached product.
#[derive(Component)]
pub struct ProductModel;

/// Marker for the session camera.
#[derive(Component)]
pub struct ViewerCamera;

/// State owned by the single viewer session of this page.
#[derive(Resource)]
pub struct ViewerSession {
    pub config: SessionConfig,
    /// In-flight or completed asset load.
    pub model: Option<Handle<Gltf>>,
    /// Root entity of the attached model. At most one exists.
    pub current_model: Option<Entity>,
    pub failure: Option<String>,
}

impl ViewerSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            model: None,
            current_model: None,
            failure: None,
        }
    }
}
