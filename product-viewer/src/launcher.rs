use constants::catalog::{CatalogEntry, find_entry};
use constants::paths::{LAUNCH_TARGET, MODEL_NUM_PARAM, MODEL_PARAM, VIEWER_PAGE};

use crate::error::ViewerError;

/// Browser surface the launcher needs: opening a tab and reporting errors.
pub trait BrowsingContext {
    fn open_tab(&mut self, url: &str, target: &str) -> Result<(), ViewerError>;
    fn log_error(&mut self, message: &str);
}

/// Viewer page URL for a catalog entry, with the asset path form-encoded.
pub fn viewer_url(entry: &CatalogEntry) -> String {
    let encoded_path: String =
        url::form_urlencoded::byte_serialize(entry.asset_path.as_bytes()).collect();
    format!(
        "{VIEWER_PAGE}?{MODEL_PARAM}={encoded_path}&{MODEL_NUM_PARAM}={}",
        entry.id
    )
}

/// Resolve a product and open its viewer page in a new browsing context.
///
/// Unknown ids and browser failures are logged through the context and
/// returned; nothing is opened for an unknown id.
pub fn open_product<C: BrowsingContext>(
    context: &mut C,
    product_id: i32,
) -> Result<String, ViewerError> {
    let result = find_entry(product_id)
        .ok_or(ViewerError::InvalidProductId(product_id))
        .and_then(|entry| {
            let url = viewer_url(entry);
            context.open_tab(&url, LAUNCH_TARGET)?;
            Ok(url)
        });

    if let Err(err) = &result {
        context.log_error(&err.to_string());
    }
    result
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use constants::paths::PRODUCT_ID_ATTRIBUTE;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    /// Launcher context backed by the page's `window`.
    pub struct WindowContext;

    impl BrowsingContext for WindowContext {
        fn open_tab(&mut self, url: &str, target: &str) -> Result<(), ViewerError> {
            let window =
                web_sys::window().ok_or_else(|| ViewerError::Browser("no window".into()))?;
            match window.open_with_url_and_target(url, target) {
                Ok(Some(_)) => Ok(()),
                Ok(None) => Err(ViewerError::Browser(format!("popup blocked for {url}"))),
                Err(err) => Err(ViewerError::Browser(format!("{err:?}"))),
            }
        }

        fn log_error(&mut self, message: &str) {
            web_sys::console::error_1(&JsValue::from_str(message));
        }
    }

    /// Markup entry point: `onclick="view3DModel(4)"`.
    #[wasm_bindgen(js_name = view3DModel)]
    pub fn view_3d_model(product_id: i32) {
        let _ = open_product(&mut WindowContext, product_id);
    }

    /// Attach a launcher click handler to every element carrying a product id.
    ///
    /// Returns the number of elements wired up.
    #[wasm_bindgen(js_name = registerProductButtons)]
    pub fn register_product_buttons() -> u32 {
        match try_register_product_buttons() {
            Ok(count) => count,
            Err(err) => {
                WindowContext.log_error(&err.to_string());
                0
            }
        }
    }

    fn try_register_product_buttons() -> Result<u32, ViewerError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ViewerError::Browser("no document".into()))?;
        let elements = document
            .query_selector_all(&format!("[{PRODUCT_ID_ATTRIBUTE}]"))
            .map_err(|err| ViewerError::Browser(format!("{err:?}")))?;

        let mut registered = 0;
        for index in 0..elements.length() {
            let Some(element) = elements
                .item(index)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };

            // Unparseable ids still get a handler so the click reports the error.
            let product_id = element
                .get_attribute(PRODUCT_ID_ATTRIBUTE)
                .and_then(|value| value.trim().parse::<i32>().ok())
                .unwrap_or(0);

            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                view_3d_model(product_id);
            }) as Box<dyn FnMut(web_sys::Event)>);

            element
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .map_err(|err| ViewerError::Browser(format!("{err:?}")))?;
            // Handlers live as long as the page.
            closure.forget();
            registered += 1;
        }

        Ok(registered)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::register_product_buttons;
