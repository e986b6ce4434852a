use bevy::prelude::*;
use constants::catalog::camera_offset_for_key;
use constants::paths::{MODEL_NUM_PARAM, MODEL_PARAM};

/// Parameters the viewer page was opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerRequest {
    pub model: String,
    pub model_num: String,
}

impl ViewerRequest {
    /// Parse a page query string with `URLSearchParams` semantics.
    ///
    /// Returns `None` unless both `model` and `modelNum` are present and
    /// non-empty. The first occurrence of a repeated key wins.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut model = None;
        let mut model_num = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key == MODEL_PARAM && model.is_none() {
                model = Some(value.into_owned());
            } else if key == MODEL_NUM_PARAM && model_num.is_none() {
                model_num = Some(value.into_owned());
            }
        }

        let model = model.filter(|value| !value.is_empty())?;
        let model_num = model_num.filter(|value| !value.is_empty())?;
        Some(Self { model, model_num })
    }
}

/// Everything a viewer session needs to start.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Path as received in the query, before normalisation for the asset server.
    pub asset_path: String,
    pub camera_offset: Vec3,
}

impl SessionConfig {
    pub fn from_request(request: &ViewerRequest) -> Self {
        Self {
            asset_path: request.model.clone(),
            camera_offset: camera_offset_for_key(&request.model_num),
        }
    }

    /// Asset server path: relative to the asset root, without `./` or `/`.
    pub fn engine_asset_path(&self) -> String {
        let mut path = self.asset_path.as_str();
        loop {
            if let Some(rest) = path.strip_prefix("./") {
                path = rest;
            } else if let Some(rest) = path.strip_prefix('/') {
                path = rest;
            } else {
                break;
            }
        }
        path.to_string()
    }
}

/// Read the viewer request from the current page location.
#[cfg(target_arch = "wasm32")]
pub fn current_page_request() -> Option<ViewerRequest> {
    let search = web_sys::window()?.location().search().ok()?;
    ViewerRequest::from_query(&search)
}

/// Native builds take the query string as the first argument, e.g.
/// `product-viewer "model=./Products/appleWatch.glb&modelNum=5"`.
#[cfg(not(target_arch = "wasm32"))]
pub fn current_page_request() -> Option<ViewerRequest> {
    let query = std::env::args().nth(1)?;
    ViewerRequest::from_query(&query)
}
