use bootstrap::{SessionConfig, current_page_request};
use engine::core::app_setup::create_app;

mod bootstrap;
mod engine;
mod error;
// Launcher is only reachable from the page exports.
#[cfg(any(target_arch = "wasm32", test))]
mod launcher;
mod rpc;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    // Without both query parameters this is a product page: only the
    // launcher is wired up and no canvas is created.
    let Some(request) = current_page_request() else {
        #[cfg(target_arch = "wasm32")]
        launcher::register_product_buttons();
        return;
    };

    let mut app = create_app(SessionConfig::from_request(&request));

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}
