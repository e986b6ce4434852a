use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::{SessionState, ViewerCamera, ViewerSession};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

const JSONRPC_VERSION: &str = "2.0";

/// Query from the host page. Every supported method is parameterless.
#[derive(Deserialize, Debug)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub id: Option<serde_json::Value>,
}

#[derive(Serialize, Debug)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: serde_json::Value,
}

impl RpcResponse {
    fn answer(id: serde_json::Value, outcome: Result<serde_json::Value, RpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: JSONRPC_VERSION,
            result,
            error,
            id,
        }
    }
}

/// One-way message to the host page.
#[derive(Serialize, Debug)]
pub struct RpcNotification {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: serde_json::Value,
}

#[derive(Serialize, Debug)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    fn invalid_request(version: &str) -> Self {
        Self {
            code: -32600,
            message: "Invalid Request".to_string(),
            data: Some(serde_json::json!({ "jsonrpc": version })),
        }
    }

    fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource queueing messages for the host page until the end of the frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &'static str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Snapshot of the session answered to host queries.
pub struct SessionSnapshot<'a> {
    pub state: SessionState,
    pub model: &'a str,
    pub failure: Option<&'a str>,
    pub camera: Option<Vec3>,
    pub fps: Option<f64>,
}

/// Plugin bridging the viewer and the page that opened or embeds it.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>().add_systems(
            Update,
            (
                notify_session_state,
                handle_rpc_messages,
                send_outgoing_messages,
            )
                .chain(),
        );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(err) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", err);
        }
    }

    // Listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Tell the host about every session state change.
fn notify_session_state(
    state: Option<Res<State<SessionState>>>,
    session: Option<Res<ViewerSession>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let (Some(state), Some(session)) = (state, session) else {
        return;
    };
    if !state.is_changed() {
        return;
    }

    rpc_interface.send_notification(
        "session_state",
        serde_json::json!({
            "state": state.get().as_str(),
            "model": session.config.asset_path,
            "error": session.failure,
        }),
    );
}

fn handle_rpc_messages(
    message_queue: Option<Res<MessageQueue>>,
    diagnostics: Option<Res<DiagnosticsStore>>,
    state: Option<Res<State<SessionState>>>,
    session: Option<Res<ViewerSession>>,
    cameras: Query<&Transform, With<ViewerCamera>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let (Some(queue), Some(state), Some(session)) = (message_queue, state, session) else {
        return;
    };
    let messages = match queue.0.lock() {
        Ok(mut pending) => std::mem::take(&mut *pending),
        Err(_) => return,
    };

    for message in messages {
        match serde_json::from_str::<RpcRequest>(&message) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let snapshot = SessionSnapshot {
                    state: *state.get(),
                    model: &session.config.asset_path,
                    failure: session.failure.as_deref(),
                    camera: cameras.single().ok().map(|transform| transform.translation),
                    fps: diagnostics
                        .as_deref()
                        .and_then(|store| store.get(&FrameTimeDiagnosticsPlugin::FPS))
                        .and_then(|fps| fps.smoothed()),
                };
                if let Some(response) = handle_rpc_request(&request, &snapshot) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => warn!("Ignoring malformed RPC message: {}", parse_error),
        }
    }
}

/// Answer one request. Notifications (no id) get no response.
pub fn handle_rpc_request(request: &RpcRequest, snapshot: &SessionSnapshot) -> Option<RpcResponse> {
    let id = request.id.clone()?;
    if request.jsonrpc != JSONRPC_VERSION {
        return Some(RpcResponse::answer(
            id,
            Err(RpcError::invalid_request(&request.jsonrpc)),
        ));
    }

    let outcome = match request.method.as_str() {
        "get_session_state" => Ok(serde_json::json!({
            "state": snapshot.state.as_str(),
            "model": snapshot.model,
            "error": snapshot.failure,
        })),
        "get_camera" => handle_get_camera(snapshot),
        "get_fps" => Ok(serde_json::json!({ "fps": snapshot.fps.unwrap_or(0.0) as f32 })),
        method => {
            warn!("Unknown RPC method: {}", method);
            Err(RpcError::method_not_found(method))
        }
    };
    Some(RpcResponse::answer(id, outcome))
}

fn handle_get_camera(snapshot: &SessionSnapshot) -> Result<serde_json::Value, RpcError> {
    let position = snapshot
        .camera
        .ok_or_else(|| RpcError::internal_error("Camera not spawned"))?;
    Ok(serde_json::json!({
        "position": [position.x, position.y, position.z]
    }))
}

fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_host(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_host(&response);
    }
}

/// Post a message to the opener tab, or to the embedding page when framed.
fn send_message_to_host<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        let json = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize message: {}", e);
                return;
            }
        };
        let Some(window) = window() else {
            error!("Window object not available");
            return;
        };

        let opener = window
            .opener()
            .ok()
            .filter(|opener| !opener.is_null() && !opener.is_undefined())
            .and_then(|opener| opener.dyn_into::<web_sys::Window>().ok());
        let parent = window
            .parent()
            .ok()
            .flatten()
            .filter(|parent| !js_sys::Object::is(parent.as_ref(), window.as_ref()));

        if let Some(host) = opener.or(parent) {
            if let Err(e) = host.post_message(&JsValue::from_str(&json), "*") {
                error!("Failed to send message to host: {:?}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}
