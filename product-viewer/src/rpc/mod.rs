//! JSON-RPC 2.0 messaging between the viewer and its host page.
//!
//! The viewer runs in a tab opened by the product page (or in an iframe).
//! It reports session progress to that page via `postMessage` and answers
//! simple queries about the session.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (opener/parent)  <──postMessage──>  Viewer
//!        │                                        │
//!        │ <──────── session_state notification ──┤  on every state change
//!        ├─ Request (with ID) ──────────────────> │
//!        │ <───────────────── Response (with ID) ─┤
//! ```
//!
//! ## Methods
//!
//! - `get_session_state`: lifecycle state, model path and failure message
//! - `get_camera`: current camera position
//! - `get_fps`: smoothed frame rate
//!
//! Requests whose `jsonrpc` is not `"2.0"` answer `-32600`. Unknown methods
//! answer `-32601 Method not found`; a missing camera answers `-32603`.

/// JSON-RPC 2.0 bridge plugin, request handling and host message transport.
pub mod web_rpc;
